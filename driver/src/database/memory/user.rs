use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{User, UserId};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryUserRepository;

#[async_trait::async_trait]
impl UserQuery<InMemoryTransaction> for InMemoryUserRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.state().users.get(id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl UserModifier<InMemoryTransaction> for InMemoryUserRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        con.state()
            .users
            .insert(*user.id().as_ref(), user.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<(), KernelError> {
        con.state().users.remove(id.as_ref());
        Ok(())
    }
}

impl DependOnUserQuery<InMemoryTransaction> for InMemoryDatabase {
    type UserQuery = InMemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryUserRepository
    }
}

impl DependOnUserModifier<InMemoryTransaction> for InMemoryDatabase {
    type UserModifier = InMemoryUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &InMemoryUserRepository
    }
}
