mod author;
mod id;
mod isbn;
mod stock;
mod title;

pub use self::{author::*, id::*, isbn::*, stock::*, title::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: Isbn,
    stock: BookStock,
}

impl Book {
    pub fn new(id: BookId, title: BookTitle, author: BookAuthor, isbn: Isbn, stock: BookStock) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
            stock,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &BookTitle {
        &self.title
    }

    pub fn author(&self) -> &BookAuthor {
        &self.author
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn stock(&self) -> &BookStock {
        &self.stock
    }

    /// Takes one copy off the shelf. `None` when no stock remains, so the
    /// `stock >= 0` invariant can never be broken through this path.
    pub fn reserve_stock(&self) -> Option<Self> {
        let remaining = *self.stock.as_ref();
        if remaining <= 0 {
            return None;
        }
        let mut reserved = self.clone();
        reserved.stock = BookStock::new(remaining - 1);
        Some(reserved)
    }

    /// Puts one reserved copy back on the shelf.
    pub fn release_stock(&self) -> Self {
        let mut released = self.clone();
        released.stock = BookStock::new(self.stock.as_ref() + 1);
        released
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{Book, BookAuthor, BookId, BookStock, BookTitle, Isbn};

    fn book(stock: i32) -> Book {
        Book::new(
            BookId::new(uuid::Uuid::new_v4()),
            BookTitle::new("title".to_string()),
            BookAuthor::new("author".to_string()),
            Isbn::new("978-0000000000".to_string()),
            BookStock::new(stock),
        )
    }

    #[test]
    fn reserve_consumes_one_unit() {
        let reserved = book(2).reserve_stock().unwrap();
        assert_eq!(reserved.stock().as_ref(), &1);
    }

    #[test]
    fn reserve_fails_on_empty_shelf() {
        assert!(book(0).reserve_stock().is_none());
    }

    #[test]
    fn release_restores_one_unit() {
        let released = book(0).release_stock();
        assert_eq!(released.stock().as_ref(), &1);
    }
}
