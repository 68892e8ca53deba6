use kernel::interface::query::{DependOnLoanQuery, LoanQuery};
use kernel::interface::update::{DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{
    BookId, Loan, LoanId, LoanStatus, ReturnedAt, SelectLimit, SelectOffset, UserId,
};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryLoanRepository;

#[async_trait::async_trait]
impl LoanQuery<InMemoryTransaction> for InMemoryLoanRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        Ok(con.state().loans.get(id.as_ref()).cloned())
    }

    async fn list(
        &self,
        con: &mut InMemoryTransaction,
        user_id: Option<&UserId>,
        status: Option<LoanStatus>,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let mut loans = con
            .state()
            .loans
            .values()
            .filter(|loan| user_id.map_or(true, |user| loan.user_id() == user))
            .filter(|loan| status.map_or(true, |status| loan.status() == &status))
            .cloned()
            .collect::<Vec<_>>();
        loans.sort_by(|a, b| {
            b.borrowed_at()
                .cmp(a.borrowed_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        let offset = usize::try_from(*offset.as_ref()).unwrap_or(0);
        let limit = usize::try_from(*limit.as_ref()).unwrap_or(0);
        Ok(loans.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_active_by_book(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        let count = con
            .state()
            .loans
            .values()
            .filter(|loan| loan.book_id() == book_id && !loan.status().is_terminal())
            .count();
        Ok(count as i64)
    }

    async fn count_active_by_user(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<i64, KernelError> {
        let count = con
            .state()
            .loans
            .values()
            .filter(|loan| loan.user_id() == user_id && !loan.status().is_terminal())
            .count();
        Ok(count as i64)
    }
}

#[async_trait::async_trait]
impl LoanModifier<InMemoryTransaction> for InMemoryLoanRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        con.state()
            .loans
            .insert(*loan.id().as_ref(), loan.clone());
        Ok(())
    }

    async fn transition(
        &self,
        con: &mut InMemoryTransaction,
        id: &LoanId,
        from: LoanStatus,
        to: LoanStatus,
        returned_at: Option<&ReturnedAt>,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        let loans = &mut con.state().loans;
        let Some(loan) = loans.get(id.as_ref()) else {
            return Ok(None);
        };
        if loan.status() != &from {
            return Ok(None);
        }
        let moved = loan.transitioned(to, returned_at.cloned());
        loans.insert(*id.as_ref(), moved.clone());
        Ok(Some(moved))
    }

    async fn purge_by_book(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        let loans = &mut con.state().loans;
        let before = loans.len();
        loans.retain(|_, loan| !(loan.book_id() == book_id && loan.status().is_terminal()));
        Ok((before - loans.len()) as i64)
    }

    async fn purge_by_user(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<i64, KernelError> {
        let loans = &mut con.state().loans;
        let before = loans.len();
        loans.retain(|_, loan| !(loan.user_id() == user_id && loan.status().is_terminal()));
        Ok((before - loans.len()) as i64)
    }
}

impl DependOnLoanQuery<InMemoryTransaction> for InMemoryDatabase {
    type LoanQuery = InMemoryLoanRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &InMemoryLoanRepository
    }
}

impl DependOnLoanModifier<InMemoryTransaction> for InMemoryDatabase {
    type LoanModifier = InMemoryLoanRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &InMemoryLoanRepository
    }
}
