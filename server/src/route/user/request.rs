use crate::controller::Intake;
use application::transfer::{CreateUserDto, DeleteUserDto, GetUserDto};
use kernel::prelude::entity::UserRole;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    name: String,
    role: UserRole,
}

#[derive(Debug)]
pub struct GetUserRequest {
    id: Uuid,
}

impl GetUserRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    actor_id: Uuid,
}

pub struct UserTransformer;

impl Intake<CreateUserRequest> for UserTransformer {
    type To = CreateUserDto;
    fn emit(&self, input: CreateUserRequest) -> Self::To {
        CreateUserDto {
            name: input.name,
            role: input.role,
        }
    }
}

impl Intake<GetUserRequest> for UserTransformer {
    type To = GetUserDto;
    fn emit(&self, input: GetUserRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}

impl Intake<(Uuid, DeleteUserRequest)> for UserTransformer {
    type To = DeleteUserDto;
    fn emit(&self, input: (Uuid, DeleteUserRequest)) -> Self::To {
        let (id, input) = input;
        DeleteUserDto {
            id,
            actor_id: input.actor_id,
        }
    }
}
