use uuid::Uuid;

use kernel::prelude::entity::{Book, SelectLimit, SelectOffset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub stock: i32,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: *book.id().as_ref(),
            title: book.title().as_ref().to_string(),
            author: book.author().as_ref().to_string(),
            isbn: book.isbn().as_ref().to_string(),
            stock: *book.stock().as_ref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct GetBookDto {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetAllBookDto {
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

#[derive(Debug, Clone)]
pub struct DeleteBookDto {
    pub id: Uuid,
    pub actor_id: Uuid,
}
