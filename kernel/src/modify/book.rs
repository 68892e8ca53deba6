use crate::database::Transaction;
use crate::entity::{Book, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;

    /// Atomic read-modify-write: takes one unit of stock if any remains.
    /// Returns `false` when the shelf is empty, so concurrent borrows can
    /// never drive stock negative.
    async fn reserve_stock(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;

    /// Returns one reserved unit to the shelf.
    async fn release_stock(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError>;

    async fn delete(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookModifier<Connection: Transaction>: 'static + Sync + Send {
    type BookModifier: BookModifier<Connection>;
    fn book_modifier(&self) -> &Self::BookModifier;
}
