use uuid::Uuid;

use kernel::prelude::entity::{User, UserRole, UserStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: *user.id().as_ref(),
            name: user.name().as_ref().to_string(),
            role: *user.role(),
            status: *user.status(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct GetUserDto {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct DeleteUserDto {
    pub id: Uuid,
    pub actor_id: Uuid,
}
