use crate::database::Transaction;
use crate::entity::{BookId, Loan, LoanId, LoanStatus, SelectLimit, SelectOffset, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LoanQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError>;

    /// Ledger page, ordered by borrow timestamp descending with id ascending
    /// as tie-break. Filters narrow to one user and/or one status.
    async fn list(
        &self,
        con: &mut Connection,
        user_id: Option<&UserId>,
        status: Option<LoanStatus>,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Loan>, KernelError>;

    /// Count of `PENDING`/`BORROWED` records holding a reservation on the book.
    async fn count_active_by_book(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError>;

    /// Count of `PENDING`/`BORROWED` records owned by the user.
    async fn count_active_by_user(
        &self,
        con: &mut Connection,
        user_id: &UserId,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnLoanQuery<Connection: Transaction>: Sync + Send + 'static {
    type LoanQuery: LoanQuery<Connection>;
    fn loan_query(&self) -> &Self::LoanQuery;
}
