use crate::database::Transaction;
use crate::entity::{BookId, Loan, LoanId, LoanStatus, ReturnedAt, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LoanModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError>;

    /// Checked-and-set status move: applies `from -> to` only while the
    /// stored status still equals `from`, stamping `returned_at` when given.
    /// Returns the updated record, or `None` when the precondition no longer
    /// holds (a concurrent caller won the transition).
    async fn transition(
        &self,
        con: &mut Connection,
        id: &LoanId,
        from: LoanStatus,
        to: LoanStatus,
        returned_at: Option<&ReturnedAt>,
    ) -> error_stack::Result<Option<Loan>, KernelError>;

    /// Removes every terminal record referencing the book; returns the count.
    async fn purge_by_book(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError>;

    /// Removes every terminal record owned by the user; returns the count.
    async fn purge_by_user(
        &self,
        con: &mut Connection,
        user_id: &UserId,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnLoanModifier<Connection: Transaction>: 'static + Sync + Send {
    type LoanModifier: LoanModifier<Connection>;
    fn loan_modifier(&self) -> &Self::LoanModifier;
}
