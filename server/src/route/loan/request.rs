use crate::controller::Intake;
use application::transfer::{
    AdminReturnLoanDto, ApproveLoanDto, BorrowBookDto, ListLoansDto, LoanScope, RejectLoanDto,
    ReturnLoanDto,
};
use kernel::prelude::entity::{LoanStatus, SelectLimit, SelectOffset};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct BorrowRequest {
    book_id: Uuid,
    user_id: Uuid,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeParam {
    All,
    #[default]
    Mine,
}

#[derive(Debug, Deserialize)]
pub struct ListLoansRequest {
    actor_id: Uuid,
    #[serde(default)]
    scope: ScopeParam,
    status: Option<LoanStatus>,
    #[serde(default)]
    limit: SelectLimit,
    #[serde(default)]
    offset: SelectOffset,
}

// The transition bodies carry the same shape, but each endpoint keeps its own
// type so the transformer can map them to distinct operations.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AdminReturnRequest {
    user_id: Uuid,
}

pub struct LoanTransformer;

impl Intake<BorrowRequest> for LoanTransformer {
    type To = BorrowBookDto;
    fn emit(&self, input: BorrowRequest) -> Self::To {
        BorrowBookDto {
            book_id: input.book_id,
            user_id: input.user_id,
        }
    }
}

impl Intake<ListLoansRequest> for LoanTransformer {
    type To = ListLoansDto;
    fn emit(&self, input: ListLoansRequest) -> Self::To {
        ListLoansDto {
            actor_id: input.actor_id,
            scope: match input.scope {
                ScopeParam::All => LoanScope::All,
                ScopeParam::Mine => LoanScope::Mine,
            },
            status: input.status,
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<(Uuid, ApproveRequest)> for LoanTransformer {
    type To = ApproveLoanDto;
    fn emit(&self, input: (Uuid, ApproveRequest)) -> Self::To {
        let (id, input) = input;
        ApproveLoanDto {
            loan_id: id,
            actor_id: input.user_id,
        }
    }
}

impl Intake<(Uuid, RejectRequest)> for LoanTransformer {
    type To = RejectLoanDto;
    fn emit(&self, input: (Uuid, RejectRequest)) -> Self::To {
        let (id, input) = input;
        RejectLoanDto {
            loan_id: id,
            actor_id: input.user_id,
        }
    }
}

impl Intake<(Uuid, ReturnRequest)> for LoanTransformer {
    type To = ReturnLoanDto;
    fn emit(&self, input: (Uuid, ReturnRequest)) -> Self::To {
        let (id, input) = input;
        ReturnLoanDto {
            loan_id: id,
            actor_id: input.user_id,
        }
    }
}

impl Intake<(Uuid, AdminReturnRequest)> for LoanTransformer {
    type To = AdminReturnLoanDto;
    fn emit(&self, input: (Uuid, AdminReturnRequest)) -> Self::To {
        let (id, input) = input;
        AdminReturnLoanDto {
            loan_id: id,
            actor_id: input.user_id,
        }
    }
}
