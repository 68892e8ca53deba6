use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookStock, BookTitle, Isbn, SelectLimit, SelectOffset,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery<PostgresTransaction> for PostgresBookRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con.conn(), id).await
    }

    async fn get_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::get_all(con.conn(), limit, offset).await
    }
}

#[async_trait::async_trait]
impl BookModifier<PostgresTransaction> for PostgresBookRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con.conn(), book).await
    }

    async fn reserve_stock(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::reserve_stock(con.conn(), id).await
    }

    async fn release_stock(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::release_stock(con.conn(), id).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con.conn(), id).await
    }
}

impl DependOnBookQuery<PostgresTransaction> for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier<PostgresTransaction> for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    isbn: String,
    stock: i32,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::new(
            BookId::new(row.id),
            BookTitle::new(row.title),
            BookAuthor::new(row.author),
            Isbn::new(row.isbn),
            BookStock::new(row.stock),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                title,
                author,
                isbn,
                stock
            FROM
                books
            WHERE
                id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn get_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                title,
                author,
                isbn,
                stock
            FROM
                books
            ORDER BY
                title, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, author, isbn, stock)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.isbn().as_ref())
        .bind(book.stock().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn reserve_stock(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        let done = sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET stock = stock - 1
            WHERE id = $1 AND stock > 0
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(done.rows_affected() == 1)
    }

    async fn release_stock(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET stock = stock + 1
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, id: &BookId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
