use crate::controller::Exhaust;
use application::transfer::UserDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::prelude::entity::{UserRole, UserStatus};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    name: String,
    role: UserRole,
    status: UserStatus,
}

impl From<UserDto> for UserResponse {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            role: dto.role,
            status: dto.status,
        }
    }
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct UserPresenter;

impl Exhaust<Option<UserDto>> for UserPresenter {
    type To = Option<UserResponse>;
    fn emit(&self, input: Option<UserDto>) -> Self::To {
        input.map(UserResponse::from)
    }
}

impl Exhaust<()> for UserPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

pub struct CreatedUserPresenter;

impl Exhaust<UserDto> for CreatedUserPresenter {
    type To = (StatusCode, axum::Json<UserResponse>);
    fn emit(&self, input: UserDto) -> Self::To {
        (StatusCode::CREATED, axum::Json(UserResponse::from(input)))
    }
}
