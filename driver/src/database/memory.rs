use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{Book, Loan, User};
use kernel::KernelError;

pub use self::{book::*, loan::*, user::*};

mod book;
mod loan;
mod user;

/// Single-process store used by service tests and small deployments. The
/// state lock is held for the whole span of a transaction, so every unit of
/// work observes and publishes one consistent snapshot and read-modify-write
/// sequences on the same book serialize naturally.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct StoreState {
    pub(in crate::database) books: HashMap<Uuid, Book>,
    pub(in crate::database) users: HashMap<Uuid, User>,
    pub(in crate::database) loans: HashMap<Uuid, Loan>,
}

#[async_trait::async_trait]
impl DatabaseConnection<InMemoryTransaction> for InMemoryDatabase {
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let snapshot = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            snapshot: Some(snapshot),
        })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    // Taken on commit; written back on drop to undo uncommitted work.
    snapshot: Option<StoreState>,
}

impl InMemoryTransaction {
    pub(in crate::database) fn state(&mut self) -> &mut StoreState {
        &mut self.guard
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.guard = snapshot;
        }
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        self.snapshot = None;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        // dropping restores the snapshot
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookAuthor, BookId, BookStock, BookTitle, Isbn};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryBookRepository, InMemoryDatabase};

    fn book(id: &BookId) -> Book {
        Book::new(
            id.clone(),
            BookTitle::new("title".to_string()),
            BookAuthor::new("author".to_string()),
            Isbn::new("978-0000000000".to_string()),
            BookStock::new(1),
        )
    }

    #[tokio::test]
    async fn committed_work_is_visible_to_later_transactions() -> error_stack::Result<(), KernelError>
    {
        let db = InMemoryDatabase::new();
        let book_id = BookId::new(uuid::Uuid::new_v4());

        let mut con = db.transact().await?;
        InMemoryBookRepository.create(&mut con, &book(&book_id)).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let find = InMemoryBookRepository.find_by_id(&mut con, &book_id).await?;
        assert!(find.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let book_id = BookId::new(uuid::Uuid::new_v4());

        {
            let mut con = db.transact().await?;
            InMemoryBookRepository.create(&mut con, &book(&book_id)).await?;
            // no commit
        }

        let mut con = db.transact().await?;
        let find = InMemoryBookRepository.find_by_id(&mut con, &book_id).await?;
        assert!(find.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn explicit_roll_back_discards_work() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let book_id = BookId::new(uuid::Uuid::new_v4());

        let mut con = db.transact().await?;
        InMemoryBookRepository.create(&mut con, &book(&book_id)).await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let find = InMemoryBookRepository.find_by_id(&mut con, &book_id).await?;
        assert!(find.is_none());
        Ok(())
    }
}
