use error_stack::{Report, ResultExt};
use kernel::KernelError;

pub mod database;
pub mod error;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .map_err(|error| Report::from(error).change_context(KernelError::Internal))
        .attach_printable_lazy(|| format!("Environment variable {key} is not set"))
}
