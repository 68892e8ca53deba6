use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookId, SelectLimit, SelectOffset};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery<InMemoryTransaction> for InMemoryBookRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.state().books.get(id.as_ref()).cloned())
    }

    async fn get_all(
        &self,
        con: &mut InMemoryTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut books = con.state().books.values().cloned().collect::<Vec<_>>();
        books.sort_by(|a, b| {
            a.title()
                .as_ref()
                .cmp(b.title().as_ref())
                .then_with(|| a.id().cmp(b.id()))
        });
        let offset = usize::try_from(*offset.as_ref()).unwrap_or(0);
        let limit = usize::try_from(*limit.as_ref()).unwrap_or(0);
        Ok(books.into_iter().skip(offset).take(limit).collect())
    }
}

#[async_trait::async_trait]
impl BookModifier<InMemoryTransaction> for InMemoryBookRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.state()
            .books
            .insert(*book.id().as_ref(), book.clone());
        Ok(())
    }

    async fn reserve_stock(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        let books = &mut con.state().books;
        let Some(book) = books.get(id.as_ref()) else {
            return Ok(false);
        };
        match book.reserve_stock() {
            Some(reserved) => {
                books.insert(*id.as_ref(), reserved);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn release_stock(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        let books = &mut con.state().books;
        if let Some(book) = books.get(id.as_ref()) {
            let released = book.release_stock();
            books.insert(*id.as_ref(), released);
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        con.state().books.remove(id.as_ref());
        Ok(())
    }
}

impl DependOnBookQuery<InMemoryTransaction> for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier<InMemoryTransaction> for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookAuthor, BookId, BookStock, BookTitle, Isbn};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryBookRepository, InMemoryDatabase};

    #[tokio::test]
    async fn reserve_stops_at_zero() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let book_id = BookId::new(uuid::Uuid::new_v4());
        let book = Book::new(
            book_id.clone(),
            BookTitle::new("title".to_string()),
            BookAuthor::new("author".to_string()),
            Isbn::new("978-0000000000".to_string()),
            BookStock::new(2),
        );
        InMemoryBookRepository.create(&mut con, &book).await?;

        assert!(InMemoryBookRepository.reserve_stock(&mut con, &book_id).await?);
        assert!(InMemoryBookRepository.reserve_stock(&mut con, &book_id).await?);
        assert!(!InMemoryBookRepository.reserve_stock(&mut con, &book_id).await?);

        let find = InMemoryBookRepository.find_by_id(&mut con, &book_id).await?;
        assert_eq!(find.map(|b| *b.stock().as_ref()), Some(0));
        Ok(())
    }
}
