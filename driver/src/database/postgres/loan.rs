use error_stack::Report;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{DependOnLoanQuery, LoanQuery};
use kernel::interface::update::{DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{
    BookId, BorrowedAt, DueAt, Loan, LoanId, LoanStatus, ReturnedAt, SelectLimit, SelectOffset,
    UserId,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresLoanRepository;

#[async_trait::async_trait]
impl LoanQuery<PostgresTransaction> for PostgresLoanRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        PgLoanInternal::find_by_id(con.conn(), id).await
    }

    async fn list(
        &self,
        con: &mut PostgresTransaction,
        user_id: Option<&UserId>,
        status: Option<LoanStatus>,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::list(con.conn(), user_id, status, limit, offset).await
    }

    async fn count_active_by_book(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        PgLoanInternal::count_active_by_book(con.conn(), book_id).await
    }

    async fn count_active_by_user(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<i64, KernelError> {
        PgLoanInternal::count_active_by_user(con.conn(), user_id).await
    }
}

#[async_trait::async_trait]
impl LoanModifier<PostgresTransaction> for PostgresLoanRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::create(con.conn(), loan).await
    }

    async fn transition(
        &self,
        con: &mut PostgresTransaction,
        id: &LoanId,
        from: LoanStatus,
        to: LoanStatus,
        returned_at: Option<&ReturnedAt>,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        PgLoanInternal::transition(con.conn(), id, from, to, returned_at).await
    }

    async fn purge_by_book(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        PgLoanInternal::purge_by_book(con.conn(), book_id).await
    }

    async fn purge_by_user(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<i64, KernelError> {
        PgLoanInternal::purge_by_user(con.conn(), user_id).await
    }
}

impl DependOnLoanQuery<PostgresTransaction> for PostgresDatabase {
    type LoanQuery = PostgresLoanRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &PostgresLoanRepository
    }
}

impl DependOnLoanModifier<PostgresTransaction> for PostgresDatabase {
    type LoanModifier = PostgresLoanRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &PostgresLoanRepository
    }
}

#[derive(sqlx::FromRow)]
struct LoanRow {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    borrowed_at: OffsetDateTime,
    due_at: OffsetDateTime,
    returned_at: Option<OffsetDateTime>,
    status: String,
}

impl TryFrom<LoanRow> for Loan {
    type Error = Report<KernelError>;

    fn try_from(row: LoanRow) -> Result<Self, Self::Error> {
        let status = LoanStatus::parse(&row.status).ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable(format!(
                "Unknown status {} stored for loan {}",
                row.status, row.id
            ))
        })?;
        Ok(Loan::new(
            LoanId::new(row.id),
            BookId::new(row.book_id),
            UserId::new(row.user_id),
            BorrowedAt::new(row.borrowed_at),
            DueAt::new(row.due_at),
            row.returned_at.map(ReturnedAt::new),
            status,
        ))
    }
}

pub(in crate::database) struct PgLoanInternal;

impl PgLoanInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                book_id,
                user_id,
                borrowed_at,
                due_at,
                returned_at,
                status
            FROM
                loans
            WHERE
                id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Loan::try_from).transpose()
    }

    async fn list(
        con: &mut PgConnection,
        user_id: Option<&UserId>,
        status: Option<LoanStatus>,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                book_id,
                user_id,
                borrowed_at,
                due_at,
                returned_at,
                status
            FROM
                loans
            WHERE
                ($1::uuid IS NULL OR user_id = $1)
                AND ($2::text IS NULL OR status = $2)
            ORDER BY
                borrowed_at DESC, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id.map(UserId::as_ref))
        .bind(status.map(|status| status.as_str()))
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Loan::try_from).collect()
    }

    async fn count_active_by_book(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        let count = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM loans
            WHERE book_id = $1 AND status IN ('PENDING', 'BORROWED')
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(count)
    }

    async fn count_active_by_user(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<i64, KernelError> {
        let count = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM loans
            WHERE user_id = $1 AND status IN ('PENDING', 'BORROWED')
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(count)
    }

    async fn create(con: &mut PgConnection, loan: &Loan) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO loans (id, book_id, user_id, borrowed_at, due_at, returned_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.book_id().as_ref())
        .bind(loan.user_id().as_ref())
        .bind(loan.borrowed_at().as_ref())
        .bind(loan.due_at().as_ref())
        .bind(loan.returned_at().map(ReturnedAt::as_ref))
        .bind(loan.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn transition(
        con: &mut PgConnection,
        id: &LoanId,
        from: LoanStatus,
        to: LoanStatus,
        returned_at: Option<&ReturnedAt>,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            UPDATE loans
            SET status = $3, returned_at = COALESCE($4, returned_at)
            WHERE id = $1 AND status = $2
            RETURNING id, book_id, user_id, borrowed_at, due_at, returned_at, status
            "#,
        )
        .bind(id.as_ref())
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(returned_at.map(ReturnedAt::as_ref))
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Loan::try_from).transpose()
    }

    async fn purge_by_book(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        let done = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM loans
            WHERE book_id = $1 AND status IN ('RETURNED', 'REJECTED')
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(done.rows_affected() as i64)
    }

    async fn purge_by_user(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<i64, KernelError> {
        let done = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM loans
            WHERE user_id = $1 AND status IN ('RETURNED', 'REJECTED')
            "#,
        )
        .bind(user_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(done.rows_affected() as i64)
    }
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::LoanQuery;
    use kernel::interface::update::{BookModifier, LoanModifier, UserModifier};
    use kernel::prelude::entity::{
        Book, BookAuthor, BookId, BookStock, BookTitle, Isbn, Loan, LoanId, LoanStatus, User,
        UserId, UserName, UserRole, UserStatus,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresBookRepository, PostgresDatabase, PostgresLoanRepository, PostgresUserRepository,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let book_id = BookId::new(uuid::Uuid::new_v4());
        let book = Book::new(
            book_id.clone(),
            BookTitle::new("title".to_string()),
            BookAuthor::new("author".to_string()),
            Isbn::new(uuid::Uuid::new_v4().to_string()),
            BookStock::new(1),
        );
        PostgresBookRepository.create(&mut con, &book).await?;

        let user_id = UserId::new(uuid::Uuid::new_v4());
        let user = User::new(
            user_id.clone(),
            UserName::new("name".to_string()),
            UserRole::Member,
            UserStatus::Active,
        );
        PostgresUserRepository.create(&mut con, &user).await?;

        let loan_id = LoanId::new(uuid::Uuid::new_v4());
        let loan = Loan::request(
            loan_id.clone(),
            book_id.clone(),
            user_id.clone(),
            OffsetDateTime::now_utc(),
        );
        PostgresLoanRepository.create(&mut con, &loan).await?;

        let find = PostgresLoanRepository.find_by_id(&mut con, &loan_id).await?;
        assert_eq!(find, Some(loan));

        let active = PostgresLoanRepository
            .count_active_by_book(&mut con, &book_id)
            .await?;
        assert_eq!(active, 1);

        let updated = PostgresLoanRepository
            .transition(
                &mut con,
                &loan_id,
                LoanStatus::Pending,
                LoanStatus::Rejected,
                None,
            )
            .await?;
        assert_eq!(
            updated.map(|l| *l.status()),
            Some(LoanStatus::Rejected)
        );

        // precondition no longer holds, the second transition must not apply
        let updated = PostgresLoanRepository
            .transition(
                &mut con,
                &loan_id,
                LoanStatus::Pending,
                LoanStatus::Borrowed,
                None,
            )
            .await?;
        assert!(updated.is_none());

        let purged = PostgresLoanRepository
            .purge_by_book(&mut con, &book_id)
            .await?;
        assert_eq!(purged, 1);
        Ok(())
    }
}
