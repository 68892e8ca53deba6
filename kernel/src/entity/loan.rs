mod borrowed_at;
mod due_at;
mod id;
mod returned_at;
mod status;

pub use self::{borrowed_at::*, due_at::*, id::*, returned_at::*, status::*};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::entity::{BookId, UserId};

/// Fixed lending period applied to every new request.
pub const LOAN_PERIOD: Duration = Duration::days(14);

/// One borrow request and its lifecycle. References book and user by id only;
/// the stores own the referenced entities.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    id: LoanId,
    book_id: BookId,
    user_id: UserId,
    borrowed_at: BorrowedAt,
    due_at: DueAt,
    returned_at: Option<ReturnedAt>,
    status: LoanStatus,
}

impl Loan {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LoanId,
        book_id: BookId,
        user_id: UserId,
        borrowed_at: BorrowedAt,
        due_at: DueAt,
        returned_at: Option<ReturnedAt>,
        status: LoanStatus,
    ) -> Self {
        Self {
            id,
            book_id,
            user_id,
            borrowed_at,
            due_at,
            returned_at,
            status,
        }
    }

    /// Builds the `Pending` record for a fresh borrow request. The due date
    /// is data only; nothing in the engine enforces it.
    pub fn request(id: LoanId, book_id: BookId, user_id: UserId, now: OffsetDateTime) -> Self {
        Self {
            id,
            book_id,
            user_id,
            borrowed_at: BorrowedAt::new(now),
            due_at: DueAt::new(now + LOAN_PERIOD),
            returned_at: None,
            status: LoanStatus::Pending,
        }
    }

    pub fn id(&self) -> &LoanId {
        &self.id
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn borrowed_at(&self) -> &BorrowedAt {
        &self.borrowed_at
    }

    pub fn due_at(&self) -> &DueAt {
        &self.due_at
    }

    pub fn returned_at(&self) -> Option<&ReturnedAt> {
        self.returned_at.as_ref()
    }

    pub fn status(&self) -> &LoanStatus {
        &self.status
    }

    /// Record with the status moved on, stamping `returned_at` when given.
    /// Legality of the move is checked by the caller before the store applies
    /// it atomically.
    pub fn transitioned(&self, to: LoanStatus, returned_at: Option<ReturnedAt>) -> Self {
        let mut moved = self.clone();
        moved.status = to;
        if returned_at.is_some() {
            moved.returned_at = returned_at;
        }
        moved
    }
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;

    use crate::entity::{BookId, Loan, LoanId, LoanStatus, ReturnedAt, UserId, LOAN_PERIOD};

    fn request() -> Loan {
        Loan::request(
            LoanId::new(uuid::Uuid::new_v4()),
            BookId::new(uuid::Uuid::new_v4()),
            UserId::new(uuid::Uuid::new_v4()),
            OffsetDateTime::now_utc(),
        )
    }

    #[test]
    fn request_is_pending_with_fixed_period() {
        let loan = request();
        assert_eq!(loan.status(), &LoanStatus::Pending);
        assert!(loan.returned_at().is_none());
        let expected = *loan.borrowed_at().as_ref() + LOAN_PERIOD;
        assert_eq!(loan.due_at().as_ref(), &expected);
    }

    #[test]
    fn transition_stamps_return_time_only_when_given() {
        let loan = request();
        let borrowed = loan.transitioned(LoanStatus::Borrowed, None);
        assert_eq!(borrowed.status(), &LoanStatus::Borrowed);
        assert!(borrowed.returned_at().is_none());

        let stamp = ReturnedAt::new(OffsetDateTime::now_utc());
        let returned = borrowed.transitioned(LoanStatus::Returned, Some(stamp.clone()));
        assert_eq!(returned.status(), &LoanStatus::Returned);
        assert_eq!(returned.returned_at(), Some(&stamp));
    }
}
