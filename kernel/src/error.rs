use std::fmt::Display;

use error_stack::Context;
use uuid::Uuid;

use crate::entity::LoanStatus;

#[derive(Debug)]
pub enum KernelError {
    NotFound {
        entity: &'static str,
        id: Uuid,
    },
    InsufficientStock,
    InvalidState {
        current: LoanStatus,
        expected: LoanStatus,
    },
    Unauthorized,
    ActiveLoansExist {
        count: i64,
    },
    ProtectedAccount,
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    /// Stable kind identifier. Callers branch on this, never on message text.
    pub fn kind(&self) -> &'static str {
        match self {
            KernelError::NotFound { .. } => "NOT_FOUND",
            KernelError::InsufficientStock => "INSUFFICIENT_STOCK",
            KernelError::InvalidState { .. } => "INVALID_STATE",
            KernelError::Unauthorized => "UNAUTHORIZED",
            KernelError::ActiveLoansExist { .. } => "ACTIVE_LOANS_EXIST",
            KernelError::ProtectedAccount => "PROTECTED_ACCOUNT",
            KernelError::Concurrency => "CONCURRENCY",
            KernelError::Timeout => "TIMEOUT",
            KernelError::Internal => "INTERNAL",
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound { entity, id } => write!(f, "{entity} {id} was not found"),
            KernelError::InsufficientStock => write!(f, "No copies available"),
            KernelError::InvalidState { current, expected } => {
                write!(f, "Loan is {current}, expected {expected}")
            }
            KernelError::Unauthorized => write!(f, "Operation not permitted for this user"),
            KernelError::ActiveLoansExist { count } => {
                write!(f, "{count} active loan records exist")
            }
            KernelError::ProtectedAccount => {
                write!(f, "The bootstrap administrator account cannot be deleted")
            }
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
