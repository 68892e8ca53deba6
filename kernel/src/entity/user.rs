mod id;
mod name;
mod role;
mod status;

pub use self::{id::*, name::*, role::*, status::*};
use serde::{Deserialize, Serialize};

/// Name of the seeded administrator account that must survive any cleanup.
const BOOTSTRAP_ADMIN: &str = "admin";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
    role: UserRole,
    status: UserStatus,
}

impl User {
    pub fn new(id: UserId, name: UserName, role: UserRole, status: UserStatus) -> Self {
        Self {
            id,
            name,
            role,
            status,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn role(&self) -> &UserRole {
        &self.role
    }

    pub fn status(&self) -> &UserStatus {
        &self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// The bootstrap administrator can never be deleted.
    pub fn is_protected(&self) -> bool {
        self.name.as_ref().eq_ignore_ascii_case(BOOTSTRAP_ADMIN)
    }
}
