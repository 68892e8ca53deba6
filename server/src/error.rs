use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde_json::json;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let error = self.0.current_context();
        let status = match error {
            KernelError::NotFound { .. } => StatusCode::NOT_FOUND,
            KernelError::InsufficientStock
            | KernelError::InvalidState { .. }
            | KernelError::ActiveLoansExist { .. }
            | KernelError::Concurrency => StatusCode::CONFLICT,
            KernelError::Unauthorized | KernelError::ProtectedAccount => StatusCode::FORBIDDEN,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "kind": error.kind(),
            "message": error.to_string(),
        }));
        tracing::error!("{:?}", self.0);
        (status, body).into_response()
    }
}
