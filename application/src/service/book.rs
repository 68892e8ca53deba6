use uuid::Uuid;

use error_stack::Report;
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, DependOnUserQuery, LoanQuery, UserQuery,
};
use kernel::interface::update::{BookModifier, DependOnBookModifier, DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookStock, BookTitle, Isbn, UserId,
};
use kernel::KernelError;

use crate::service::{ensure_admin, not_found};
use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookDto};

#[async_trait::async_trait]
pub trait GetBookService<Connection: Transaction + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let book = self
            .book_query()
            .find_by_id(&mut con, &BookId::new(dto.id))
            .await?;
        Ok(book.map(BookDto::from))
    }

    async fn get_all_books(
        &self,
        dto: GetAllBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let books = self
            .book_query()
            .get_all(&mut con, &dto.limit, &dto.offset)
            .await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<Connection: Transaction + Send, T> GetBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
}

/// Catalog surface. Creation is a thin wrapper; deletion runs the integrity
/// guard so active business state can never be cascaded away.
#[async_trait::async_trait]
pub trait CatalogService<Connection: Transaction + Send>:
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
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            Isbn::new(dto.isbn),
            BookStock::new(dto.stock),
        );
        self.book_modifier().create(&mut con, &book).await?;

        con.commit().await?;
        tracing::info!(book = %book.id().as_ref(), "book registered");
        Ok(BookDto::from(book))
    }

    /// Refuses while any `PENDING`/`BORROWED` record references the book,
    /// otherwise purges the terminal records and removes the book.
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;

        let actor = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.actor_id))
            .await?
            .ok_or_else(|| not_found("user", dto.actor_id))?;
        ensure_admin(&actor)?;

        let book_id = BookId::new(dto.id);
        if self
            .book_query()
            .find_by_id(&mut con, &book_id)
            .await?
            .is_none()
        {
            return Err(not_found("book", dto.id));
        }

        let active = self
            .loan_query()
            .count_active_by_book(&mut con, &book_id)
            .await?;
        if active > 0 {
            return Err(Report::new(KernelError::ActiveLoansExist { count: active })
                .attach_printable(format!("book {} still has open loans", dto.id)));
        }

        let purged = self.loan_modifier().purge_by_book(&mut con, &book_id).await?;
        self.book_modifier().delete(&mut con, &book_id).await?;

        con.commit().await?;
        tracing::info!(book = %dto.id, purged, "book deleted");
        Ok(())
    }
}

impl<Connection: Transaction + Send, T> CatalogService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnUserQuery<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnLoanModifier<Connection>
{
}

#[cfg(test)]
mod test {
    use driver::database::{InMemoryDatabase, InMemoryLoanRepository};
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::LoanQuery;
    use kernel::prelude::entity::{LoanId, UserRole};
    use kernel::KernelError;

    use crate::service::{AccountService, CatalogService, GetBookService, LendingService};
    use crate::transfer::{
        ApproveLoanDto, BorrowBookDto, CreateBookDto, CreateUserDto, DeleteBookDto, GetBookDto,
        ReturnLoanDto,
    };

    async fn seed(
        db: &InMemoryDatabase,
    ) -> error_stack::Result<(uuid::Uuid, uuid::Uuid, uuid::Uuid), KernelError> {
        let admin = db
            .create_user(CreateUserDto {
                name: "librarian".to_string(),
                role: UserRole::Admin,
            })
            .await?;
        let alice = db
            .create_user(CreateUserDto {
                name: "alice".to_string(),
                role: UserRole::Member,
            })
            .await?;
        let book = db
            .create_book(CreateBookDto {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                isbn: "978-0441013593".to_string(),
                stock: 1,
            })
            .await?;
        Ok((admin.id, alice.id, book.id))
    }

    #[tokio::test]
    async fn deletion_is_blocked_while_loans_are_open() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (admin, alice, book) = seed(&db).await?;

        let loan = db
            .borrow_book(BorrowBookDto {
                book_id: book,
                user_id: alice,
            })
            .await?;

        let blocked = db
            .delete_book(DeleteBookDto {
                id: book,
                actor_id: admin,
            })
            .await;
        let context = blocked.unwrap_err();
        assert!(matches!(
            context.current_context(),
            KernelError::ActiveLoansExist { count: 1 }
        ));

        db.approve_loan(ApproveLoanDto {
            loan_id: loan.id,
            actor_id: admin,
        })
        .await?;
        let still_blocked = db
            .delete_book(DeleteBookDto {
                id: book,
                actor_id: admin,
            })
            .await;
        assert!(matches!(
            still_blocked.unwrap_err().current_context(),
            KernelError::ActiveLoansExist { count: 1 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn deletion_purges_terminal_records() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (admin, alice, book) = seed(&db).await?;

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

        db.delete_book(DeleteBookDto {
            id: book,
            actor_id: admin,
        })
        .await?;

        let gone = db.get_book(GetBookDto { id: book }).await?;
        assert!(gone.is_none());
        let mut con = db.transact().await?;
        let record = InMemoryLoanRepository
            .find_by_id(&mut con, &LoanId::new(loan.id))
            .await?;
        assert!(record.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn deletion_requires_an_administrator() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (_, alice, book) = seed(&db).await?;

        let denied = db
            .delete_book(DeleteBookDto {
                id: book,
                actor_id: alice,
            })
            .await;
        assert!(matches!(
            denied.unwrap_err().current_context(),
            KernelError::Unauthorized
        ));
        assert!(db.get_book(GetBookDto { id: book }).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn deleting_an_unknown_book_is_reported() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (admin, _, _) = seed(&db).await?;

        let missing = db
            .delete_book(DeleteBookDto {
                id: uuid::Uuid::new_v4(),
                actor_id: admin,
            })
            .await;
        assert!(matches!(
            missing.unwrap_err().current_context(),
            KernelError::NotFound { entity: "book", .. }
        ));
        Ok(())
    }
}
