use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, DependOnUserQuery, LoanQuery, UserQuery,
};
use kernel::interface::update::{BookModifier, DependOnBookModifier, DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{
    BookId, Loan, LoanId, LoanStatus, ReturnedAt, UserId,
};
use kernel::KernelError;

use crate::service::{ensure_admin, not_found};
use crate::transfer::{
    AdminReturnLoanDto, ApproveLoanDto, BorrowBookDto, ListLoansDto, LoanDto, LoanScope,
    RejectLoanDto, ReturnLoanDto,
};

/// The lending lifecycle engine. Every operation is one atomic unit of work:
/// status moves and stock moves commit together or not at all, keeping
/// `stock + active reservations` constant per book.
#[async_trait::async_trait]
pub trait LendingService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnUserQuery<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnLoanModifier<Connection>
{
    async fn borrow_book(&self, dto: BorrowBookDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let user = self
            .user_query()
            .find_by_id(&mut con, &user_id)
            .await?
            .ok_or_else(|| not_found("user", dto.user_id))?;
        if !user.is_active() {
            return Err(Report::new(KernelError::Unauthorized)
                .attach_printable("inactive users cannot borrow"));
        }

        let book_id = BookId::new(dto.book_id);
        if self
            .book_query()
            .find_by_id(&mut con, &book_id)
            .await?
            .is_none()
        {
            return Err(not_found("book", dto.book_id));
        }

        // The conditional decrement is the only stock check; a plain
        // read-then-write here would race with concurrent borrows.
        let reserved = self.book_modifier().reserve_stock(&mut con, &book_id).await?;
        if !reserved {
            return Err(Report::new(KernelError::InsufficientStock)
                .attach_printable(format!("no copies of book {} on the shelf", dto.book_id)));
        }

        let loan = Loan::request(
            LoanId::new(Uuid::new_v4()),
            book_id,
            user_id,
            OffsetDateTime::now_utc(),
        );
        self.loan_modifier().create(&mut con, &loan).await?;

        con.commit().await?;
        tracing::info!(
            loan = %loan.id().as_ref(),
            book = %dto.book_id,
            user = %dto.user_id,
            "borrow request accepted"
        );
        Ok(LoanDto::from(loan))
    }

    async fn approve_loan(&self, dto: ApproveLoanDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let actor = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.actor_id))
            .await?
            .ok_or_else(|| not_found("user", dto.actor_id))?;
        ensure_admin(&actor)?;

        let loan_id = LoanId::new(dto.loan_id);
        let loan = self
            .loan_query()
            .find_by_id(&mut con, &loan_id)
            .await?
            .ok_or_else(|| not_found("loan", dto.loan_id))?;
        expect_status(&loan, LoanStatus::Pending)?;

        // Stock stays where it is: the reservation was taken at borrow time.
        let approved = self
            .loan_modifier()
            .transition(&mut con, &loan_id, LoanStatus::Pending, LoanStatus::Borrowed, None)
            .await?
            .ok_or_else(lost_race)?;

        con.commit().await?;
        tracing::info!(loan = %dto.loan_id, "loan approved");
        Ok(LoanDto::from(approved))
    }

    async fn reject_loan(&self, dto: RejectLoanDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let actor = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.actor_id))
            .await?
            .ok_or_else(|| not_found("user", dto.actor_id))?;
        ensure_admin(&actor)?;

        let loan_id = LoanId::new(dto.loan_id);
        let loan = self
            .loan_query()
            .find_by_id(&mut con, &loan_id)
            .await?
            .ok_or_else(|| not_found("loan", dto.loan_id))?;
        expect_status(&loan, LoanStatus::Pending)?;

        let rejected = self
            .loan_modifier()
            .transition(&mut con, &loan_id, LoanStatus::Pending, LoanStatus::Rejected, None)
            .await?
            .ok_or_else(lost_race)?;
        self.book_modifier()
            .release_stock(&mut con, rejected.book_id())
            .await?;

        con.commit().await?;
        tracing::info!(loan = %dto.loan_id, "loan rejected, reservation released");
        Ok(LoanDto::from(rejected))
    }

    async fn return_loan(&self, dto: ReturnLoanDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let actor = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.actor_id))
            .await?
            .ok_or_else(|| not_found("user", dto.actor_id))?;

        let loan_id = LoanId::new(dto.loan_id);
        let loan = self
            .loan_query()
            .find_by_id(&mut con, &loan_id)
            .await?
            .ok_or_else(|| not_found("loan", dto.loan_id))?;
        expect_status(&loan, LoanStatus::Borrowed)?;

        if !actor.role().is_admin() && loan.user_id() != actor.id() {
            return Err(Report::new(KernelError::Unauthorized)
                .attach_printable("only the borrower or an administrator may return this loan"));
        }

        let returned = self
            .loan_modifier()
            .transition(
                &mut con,
                &loan_id,
                LoanStatus::Borrowed,
                LoanStatus::Returned,
                Some(&ReturnedAt::new(OffsetDateTime::now_utc())),
            )
            .await?
            .ok_or_else(lost_race)?;
        self.book_modifier()
            .release_stock(&mut con, returned.book_id())
            .await?;

        con.commit().await?;
        tracing::info!(loan = %dto.loan_id, "loan returned");
        Ok(LoanDto::from(returned))
    }

    /// Administrative override of [`LendingService::return_loan`]: same
    /// transition, no ownership check.
    async fn admin_return_loan(
        &self,
        dto: AdminReturnLoanDto,
    ) -> error_stack::Result<LoanDto, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let actor = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.actor_id))
            .await?
            .ok_or_else(|| not_found("user", dto.actor_id))?;
        ensure_admin(&actor)?;

        let loan_id = LoanId::new(dto.loan_id);
        let loan = self
            .loan_query()
            .find_by_id(&mut con, &loan_id)
            .await?
            .ok_or_else(|| not_found("loan", dto.loan_id))?;
        expect_status(&loan, LoanStatus::Borrowed)?;

        let returned = self
            .loan_modifier()
            .transition(
                &mut con,
                &loan_id,
                LoanStatus::Borrowed,
                LoanStatus::Returned,
                Some(&ReturnedAt::new(OffsetDateTime::now_utc())),
            )
            .await?
            .ok_or_else(lost_race)?;
        self.book_modifier()
            .release_stock(&mut con, returned.book_id())
            .await?;

        con.commit().await?;
        tracing::info!(loan = %dto.loan_id, "loan returned by administrator");
        Ok(LoanDto::from(returned))
    }
}

impl<Connection: Transaction + Send, T> LendingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnUserQuery<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnLoanModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait GetLoanService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnUserQuery<Connection>
    + DependOnLoanQuery<Connection>
{
    async fn list_loans(&self, dto: ListLoansDto) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let actor = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.actor_id))
            .await?
            .ok_or_else(|| not_found("user", dto.actor_id))?;
        let user_filter = match dto.scope {
            LoanScope::All => {
                ensure_admin(&actor)?;
                None
            }
            LoanScope::Mine => Some(UserId::new(dto.actor_id)),
        };

        let loans = self
            .loan_query()
            .list(&mut con, user_filter.as_ref(), dto.status, &dto.limit, &dto.offset)
            .await?;
        Ok(loans.into_iter().map(LoanDto::from).collect())
    }
}

impl<Connection: Transaction + Send, T> GetLoanService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnUserQuery<Connection>
        + DependOnLoanQuery<Connection>
{
}

fn expect_status(loan: &Loan, expected: LoanStatus) -> error_stack::Result<(), KernelError> {
    let current = *loan.status();
    if current == expected {
        Ok(())
    } else {
        Err(Report::new(KernelError::InvalidState { current, expected }))
    }
}

fn lost_race() -> Report<KernelError> {
    Report::new(KernelError::Concurrency).attach_printable("loan state changed concurrently")
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use driver::database::{
        InMemoryBookRepository, InMemoryDatabase, InMemoryLoanRepository, InMemoryUserRepository,
    };
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{BookQuery, LoanQuery};
    use kernel::interface::update::{BookModifier, UserModifier};
    use kernel::prelude::entity::{
        Book, BookAuthor, BookId, BookStock, BookTitle, Isbn, LoanStatus, SelectLimit,
        SelectOffset, User, UserId, UserName, UserRole, UserStatus,
    };
    use kernel::KernelError;

    use crate::service::{GetLoanService, LendingService};
    use crate::transfer::{
        AdminReturnLoanDto, ApproveLoanDto, BorrowBookDto, ListLoansDto, LoanScope, RejectLoanDto,
        ReturnLoanDto,
    };

    async fn seed_user(
        db: &InMemoryDatabase,
        name: &str,
        role: UserRole,
        status: UserStatus,
    ) -> error_stack::Result<Uuid, KernelError> {
        let id = Uuid::new_v4();
        let user = User::new(UserId::new(id), UserName::new(name.to_string()), role, status);
        let mut con = db.transact().await?;
        InMemoryUserRepository.create(&mut con, &user).await?;
        con.commit().await?;
        Ok(id)
    }

    async fn seed_admin(db: &InMemoryDatabase) -> error_stack::Result<Uuid, KernelError> {
        seed_user(db, "librarian", UserRole::Admin, UserStatus::Active).await
    }

    async fn seed_member(
        db: &InMemoryDatabase,
        name: &str,
    ) -> error_stack::Result<Uuid, KernelError> {
        seed_user(db, name, UserRole::Member, UserStatus::Active).await
    }

    async fn seed_book(
        db: &InMemoryDatabase,
        stock: i32,
    ) -> error_stack::Result<Uuid, KernelError> {
        let id = Uuid::new_v4();
        let book = Book::new(
            BookId::new(id),
            BookTitle::new("The Rust Programming Language".to_string()),
            BookAuthor::new("Klabnik & Nichols".to_string()),
            Isbn::new("978-1718503106".to_string()),
            BookStock::new(stock),
        );
        let mut con = db.transact().await?;
        InMemoryBookRepository.create(&mut con, &book).await?;
        con.commit().await?;
        Ok(id)
    }

    async fn stock_of(
        db: &InMemoryDatabase,
        book_id: Uuid,
    ) -> error_stack::Result<i32, KernelError> {
        let mut con = db.transact().await?;
        let book = InMemoryBookRepository
            .find_by_id(&mut con, &BookId::new(book_id))
            .await?;
        Ok(book.map(|b| *b.stock().as_ref()).unwrap_or_default())
    }

    /// `stock + PENDING/BORROWED records` per book, which every engine
    /// operation must leave unchanged.
    async fn stock_plus_active(
        db: &InMemoryDatabase,
        book_id: Uuid,
    ) -> error_stack::Result<i64, KernelError> {
        let mut con = db.transact().await?;
        let book_id = BookId::new(book_id);
        let stock = InMemoryBookRepository
            .find_by_id(&mut con, &book_id)
            .await?
            .map(|b| *b.stock().as_ref())
            .unwrap_or_default();
        let active = InMemoryLoanRepository
            .count_active_by_book(&mut con, &book_id)
            .await?;
        Ok(i64::from(stock) + active)
    }

    fn failure_kind<T: std::fmt::Debug>(
        result: error_stack::Result<T, KernelError>,
    ) -> &'static str {
        result.unwrap_err().current_context().kind()
    }

    #[tokio::test]
    async fn full_lifecycle_conserves_stock() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let admin = seed_admin(&db).await?;
        let alice = seed_member(&db, "alice").await?;
        let bob = seed_member(&db, "bob").await?;
        let book = seed_book(&db, 1).await?;

        let loan = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;
        assert_eq!(loan.status, LoanStatus::Pending);
        assert!(loan.returned_at.is_none());
        assert_eq!(stock_of(&db, book).await?, 0);
        assert_eq!(stock_plus_active(&db, book).await?, 1);

        let depleted = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: bob,
            })
            .await;
        assert_eq!(failure_kind(depleted), "INSUFFICIENT_STOCK");
        assert_eq!(stock_plus_active(&db, book).await?, 1);

        let approved = db
            .approve_loan(ApproveLoanDto {
                loan_id: loan.id,
                actor_id: admin,
            })
            .await?;
        assert_eq!(approved.status, LoanStatus::Borrowed);
        assert_eq!(stock_of(&db, book).await?, 0);

        let returned = db
            .return_loan(ReturnLoanDto {
                loan_id: loan.id,
                actor_id: alice,
            })
            .await?;
        assert_eq!(returned.status, LoanStatus::Returned);
        assert!(returned.returned_at.is_some());
        assert_eq!(stock_of(&db, book).await?, 1);
        assert_eq!(stock_plus_active(&db, book).await?, 1);

        // the returned copy is immediately lendable again
        let next = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: bob,
            })
            .await?;
        assert_eq!(next.status, LoanStatus::Pending);
        Ok(())
    }

    #[tokio::test]
    async fn reject_releases_the_reservation_exactly_once() -> error_stack::Result<(), KernelError>
    {
        let db = InMemoryDatabase::new();
        let admin = seed_admin(&db).await?;
        let alice = seed_member(&db, "alice").await?;
        let book = seed_book(&db, 3).await?;

        let loan = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;
        assert_eq!(stock_of(&db, book).await?, 2);

        let rejected = db
            .reject_loan(RejectLoanDto {
                loan_id: loan.id,
                actor_id: admin,
            })
            .await?;
        assert_eq!(rejected.status, LoanStatus::Rejected);
        assert_eq!(stock_of(&db, book).await?, 3);

        let again = db
            .reject_loan(RejectLoanDto {
                loan_id: loan.id,
                actor_id: admin,
            })
            .await;
        assert_eq!(failure_kind(again), "INVALID_STATE");
        assert_eq!(stock_of(&db, book).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn approval_requires_a_pending_loan() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let admin = seed_admin(&db).await?;
        let alice = seed_member(&db, "alice").await?;
        let book = seed_book(&db, 1).await?;

        let loan = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;
        db.approve_loan(ApproveLoanDto {
            loan_id: loan.id,
            actor_id: admin,
        })
        .await?;

        let again = db
            .approve_loan(ApproveLoanDto {
                loan_id: loan.id,
                actor_id: admin,
            })
            .await;
        assert_eq!(failure_kind(again), "INVALID_STATE");
        Ok(())
    }

    #[tokio::test]
    async fn terminal_loans_are_immutable() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let admin = seed_admin(&db).await?;
        let alice = seed_member(&db, "alice").await?;
        let book = seed_book(&db, 1).await?;

        let loan = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;
        db.approve_loan(ApproveLoanDto {
            loan_id: loan.id,
            actor_id: admin,
        })
        .await?;
        db.return_loan(ReturnLoanDto {
            loan_id: loan.id,
            actor_id: alice,
        })
        .await?;

        for result in [
            db.approve_loan(ApproveLoanDto {
                loan_id: loan.id,
                actor_id: admin,
            })
            .await,
            db.reject_loan(RejectLoanDto {
                loan_id: loan.id,
                actor_id: admin,
            })
            .await,
            db.return_loan(ReturnLoanDto {
                loan_id: loan.id,
                actor_id: alice,
            })
            .await,
        ] {
            assert_eq!(failure_kind(result), "INVALID_STATE");
        }
        assert_eq!(stock_of(&db, book).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn approval_and_rejection_require_an_administrator(
    ) -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let alice = seed_member(&db, "alice").await?;
        let book = seed_book(&db, 1).await?;

        let loan = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;

        let approve = db
            .approve_loan(ApproveLoanDto {
                loan_id: loan.id,
                actor_id: alice,
            })
            .await;
        assert_eq!(failure_kind(approve), "UNAUTHORIZED");

        let reject = db
            .reject_loan(RejectLoanDto {
                loan_id: loan.id,
                actor_id: alice,
            })
            .await;
        assert_eq!(failure_kind(reject), "UNAUTHORIZED");

        // the failed attempts must not have moved anything
        assert_eq!(stock_plus_active(&db, book).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn returns_are_owner_or_administrator_only() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let admin = seed_admin(&db).await?;
        let alice = seed_member(&db, "alice").await?;
        let bob = seed_member(&db, "bob").await?;
        let book = seed_book(&db, 1).await?;

        let loan = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;
        db.approve_loan(ApproveLoanDto {
            loan_id: loan.id,
            actor_id: admin,
        })
        .await?;

        let stranger = db
            .return_loan(ReturnLoanDto {
                loan_id: loan.id,
                actor_id: bob,
            })
            .await;
        assert_eq!(failure_kind(stranger), "UNAUTHORIZED");

        let forced = db
            .admin_return_loan(AdminReturnLoanDto {
                loan_id: loan.id,
                actor_id: admin,
            })
            .await?;
        assert_eq!(forced.status, LoanStatus::Returned);
        assert_eq!(stock_of(&db, book).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn administrative_return_still_requires_the_role(
    ) -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let admin = seed_admin(&db).await?;
        let alice = seed_member(&db, "alice").await?;
        let book = seed_book(&db, 1).await?;

        let loan = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;
        db.approve_loan(ApproveLoanDto {
            loan_id: loan.id,
            actor_id: admin,
        })
        .await?;

        let result = db
            .admin_return_loan(AdminReturnLoanDto {
                loan_id: loan.id,
                actor_id: alice,
            })
            .await;
        assert_eq!(failure_kind(result), "UNAUTHORIZED");
        Ok(())
    }

    #[tokio::test]
    async fn inactive_users_cannot_borrow() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let dormant = seed_user(&db, "mallory", UserRole::Member, UserStatus::Inactive).await?;
        let book = seed_book(&db, 1).await?;

        let result = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: dormant,
            })
            .await;
        assert_eq!(failure_kind(result), "UNAUTHORIZED");
        assert_eq!(stock_of(&db, book).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_parties_are_reported_as_missing() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let admin = seed_admin(&db).await?;
        let alice = seed_member(&db, "alice").await?;
        let book = seed_book(&db, 1).await?;

        let no_user = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: Uuid::new_v4(),
            })
            .await;
        assert_eq!(failure_kind(no_user), "NOT_FOUND");

        let no_book = db
            .borrow_book(BorrowBookDto {
                book_id: Uuid::new_v4(),
                user_id: alice,
            })
            .await;
        assert_eq!(failure_kind(no_book), "NOT_FOUND");

        let no_loan = db
            .approve_loan(ApproveLoanDto {
                loan_id: Uuid::new_v4(),
                actor_id: admin,
            })
            .await;
        assert_eq!(failure_kind(no_loan), "NOT_FOUND");
        Ok(())
    }

    #[tokio::test]
    async fn one_of_two_concurrent_borrowers_wins_the_last_copy(
    ) -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let alice = seed_member(&db, "alice").await?;
        let bob = seed_member(&db, "bob").await?;
        let book = seed_book(&db, 1).await?;

        let left = tokio::spawn({
            let db = db.clone();
            async move {
                db.borrow_book(BorrowBookDto {
                    book_id: book,
                    user_id: alice,
                })
                .await
            }
        });
        let right = tokio::spawn({
            let db = db.clone();
            async move {
                db.borrow_book(BorrowBookDto {
                    book_id: book,
                    user_id: bob,
                })
                .await
            }
        });
        let outcomes = [left.await.unwrap(), right.await.unwrap()];

        let won = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(won, 1);
        for result in outcomes {
            if let Err(report) = result {
                assert_eq!(report.current_context().kind(), "INSUFFICIENT_STOCK");
            }
        }
        assert_eq!(stock_plus_active(&db, book).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn listing_scopes_to_caller_unless_administrator(
    ) -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let admin = seed_admin(&db).await?;
        let alice = seed_member(&db, "alice").await?;
        let bob = seed_member(&db, "bob").await?;
        let book = seed_book(&db, 5).await?;

        let alices = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;
        db.borrow_book(BorrowBookDto {
            book_id: book,
            user_id: bob,
        })
        .await?;
        db.approve_loan(ApproveLoanDto {
            loan_id: alices.id,
            actor_id: admin,
        })
        .await?;

        let mine = db
            .list_loans(ListLoansDto {
                actor_id: alice,
                scope: LoanScope::Mine,
                status: None,
                limit: SelectLimit::default(),
                offset: SelectOffset::default(),
            })
            .await?;
        assert_eq!(mine.len(), 1);
        assert!(mine.iter().all(|l| l.user_id == alice));

        let everything = db
            .list_loans(ListLoansDto {
                actor_id: admin,
                scope: LoanScope::All,
                status: None,
                limit: SelectLimit::default(),
                offset: SelectOffset::default(),
            })
            .await?;
        assert_eq!(everything.len(), 2);
        assert!(everything
            .windows(2)
            .all(|pair| pair[0].borrowed_at >= pair[1].borrowed_at));

        let pending_only = db
            .list_loans(ListLoansDto {
                actor_id: admin,
                scope: LoanScope::All,
                status: Some(LoanStatus::Pending),
                limit: SelectLimit::default(),
                offset: SelectOffset::default(),
            })
            .await?;
        assert_eq!(pending_only.len(), 1);
        assert_eq!(pending_only[0].user_id, bob);

        let denied = db
            .list_loans(ListLoansDto {
                actor_id: bob,
                scope: LoanScope::All,
                status: None,
                limit: SelectLimit::default(),
                offset: SelectOffset::default(),
            })
            .await;
        assert_eq!(failure_kind(denied), "UNAUTHORIZED");
        Ok(())
    }
}
