use error_stack::Report;
use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{book::*, loan::*, user::*};

mod book;
mod loan;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        let db = Self { pool };
        db.create_tables().await?;
        Ok(db)
    }

    /// Referential actions are deliberately plain NO ACTION: record cleanup
    /// must flow through the application-level deletion guard, never through
    /// a store-side cascade.
    async fn create_tables(&self) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id uuid PRIMARY KEY,
                title text NOT NULL,
                author text NOT NULL,
                isbn text NOT NULL UNIQUE,
                stock integer NOT NULL CHECK (stock >= 0)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .convert_error()?;
        sqlx::query(
            // language=postgresql
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id uuid PRIMARY KEY,
                name text NOT NULL,
                role text NOT NULL,
                status text NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .convert_error()?;
        sqlx::query(
            // language=postgresql
            r#"
            CREATE TABLE IF NOT EXISTS loans (
                id uuid PRIMARY KEY,
                book_id uuid NOT NULL REFERENCES books (id),
                user_id uuid NOT NULL REFERENCES users (id),
                borrowed_at timestamptz NOT NULL,
                due_at timestamptz NOT NULL,
                returned_at timestamptz,
                status text NOT NULL
                    CHECK (status IN ('PENDING', 'BORROWED', 'RETURNED', 'REJECTED'))
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .convert_error()?;
        tracing::debug!("postgres schema is up to date");
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<PostgresTransaction> for PostgresDatabase {
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        let tx = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(tx))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl PostgresTransaction {
    pub(in crate::database) fn conn(&mut self) -> &mut PgConnection {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            sqlx::Error::PoolTimedOut => Report::from(error).change_context(KernelError::Timeout),
            _ => Report::from(error).change_context(KernelError::Internal),
        })
    }
}
