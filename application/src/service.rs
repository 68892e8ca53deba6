mod book;
mod loan;
mod user;

pub use self::{book::*, loan::*, user::*};

use error_stack::Report;
use uuid::Uuid;

use kernel::prelude::entity::User;
use kernel::KernelError;

pub(in crate::service) fn not_found(entity: &'static str, id: Uuid) -> Report<KernelError> {
    Report::new(KernelError::NotFound { entity, id })
}

/// Capability check for privileged operations, evaluated once at the top of
/// each engine operation.
pub(in crate::service) fn ensure_admin(actor: &User) -> error_stack::Result<(), KernelError> {
    if actor.role().is_admin() {
        Ok(())
    } else {
        Err(Report::new(KernelError::Unauthorized).attach_printable("administrator role required"))
    }
}
