use crate::controller::Exhaust;
use application::transfer::LoanDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::prelude::entity::LoanStatus;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    borrowed_at: OffsetDateTime,
    due_at: OffsetDateTime,
    returned_at: Option<OffsetDateTime>,
    status: LoanStatus,
}

impl From<LoanDto> for LoanResponse {
    fn from(dto: LoanDto) -> Self {
        Self {
            id: dto.id,
            book_id: dto.book_id,
            user_id: dto.user_id,
            borrowed_at: dto.borrowed_at,
            due_at: dto.due_at,
            returned_at: dto.returned_at,
            status: dto.status,
        }
    }
}

impl IntoResponse for LoanResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct LoanPresenter;

impl Exhaust<LoanDto> for LoanPresenter {
    type To = LoanResponse;
    fn emit(&self, input: LoanDto) -> Self::To {
        LoanResponse::from(input)
    }
}

impl Exhaust<Vec<LoanDto>> for LoanPresenter {
    type To = axum::Json<Vec<LoanResponse>>;
    fn emit(&self, input: Vec<LoanDto>) -> Self::To {
        axum::Json::from(input.into_iter().map(LoanResponse::from).collect::<Vec<_>>())
    }
}

pub struct CreatedLoanPresenter;

impl Exhaust<LoanDto> for CreatedLoanPresenter {
    type To = (StatusCode, axum::Json<LoanResponse>);
    fn emit(&self, input: LoanDto) -> Self::To {
        (StatusCode::CREATED, axum::Json(LoanResponse::from(input)))
    }
}
