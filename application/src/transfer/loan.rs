use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Loan, LoanStatus, ReturnedAt, SelectLimit, SelectOffset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub borrowed_at: OffsetDateTime,
    pub due_at: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
    pub status: LoanStatus,
}

impl From<Loan> for LoanDto {
    fn from(loan: Loan) -> Self {
        Self {
            id: *loan.id().as_ref(),
            book_id: *loan.book_id().as_ref(),
            user_id: *loan.user_id().as_ref(),
            borrowed_at: *loan.borrowed_at().as_ref(),
            due_at: *loan.due_at().as_ref(),
            returned_at: loan.returned_at().map(ReturnedAt::as_ref).copied(),
            status: *loan.status(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BorrowBookDto {
    pub book_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ApproveLoanDto {
    pub loan_id: Uuid,
    pub actor_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct RejectLoanDto {
    pub loan_id: Uuid,
    pub actor_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ReturnLoanDto {
    pub loan_id: Uuid,
    pub actor_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct AdminReturnLoanDto {
    pub loan_id: Uuid,
    pub actor_id: Uuid,
}

/// Which slice of the ledger a listing targets. `All` is an administrative
/// capability; `Mine` is always the caller's own records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanScope {
    All,
    Mine,
}

#[derive(Debug, Clone)]
pub struct ListLoansDto {
    pub actor_id: Uuid,
    pub scope: LoanScope,
    pub status: Option<LoanStatus>,
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}
