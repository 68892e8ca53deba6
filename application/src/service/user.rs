use uuid::Uuid;

use error_stack::Report;
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnLoanQuery, DependOnUserQuery, LoanQuery, UserQuery};
use kernel::interface::update::{DependOnLoanModifier, DependOnUserModifier, LoanModifier, UserModifier};
use kernel::prelude::entity::{User, UserId, UserName, UserStatus};
use kernel::KernelError;

use crate::service::{ensure_admin, not_found};
use crate::transfer::{CreateUserDto, DeleteUserDto, GetUserDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService<Connection: Transaction + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnUserQuery<Connection>
{
    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<Option<UserDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.id))
            .await?;
        Ok(user.map(UserDto::from))
    }
}

impl<Connection: Transaction + Send, T> GetUserService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnUserQuery<Connection>
{
}

/// Identity surface. Deletion applies the same guard as the catalog plus the
/// unconditional bootstrap-administrator protection.
#[async_trait::async_trait]
pub trait AccountService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnUserQuery<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnUserModifier<Connection>
    + DependOnLoanModifier<Connection>
{
    async fn create_user(&self, dto: CreateUserDto) -> error_stack::Result<UserDto, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let user = User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new(dto.name),
            dto.role,
            UserStatus::Active,
        );
        self.user_modifier().create(&mut con, &user).await?;

        con.commit().await?;
        tracing::info!(user = %user.id().as_ref(), "user registered");
        Ok(UserDto::from(user))
    }

    async fn delete_user(&self, dto: DeleteUserDto) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;

        let actor = self
            .user_query()
            .find_by_id(&mut con, &UserId::new(dto.actor_id))
            .await?
            .ok_or_else(|| not_found("user", dto.actor_id))?;
        ensure_admin(&actor)?;

        let user_id = UserId::new(dto.id);
        let target = self
            .user_query()
            .find_by_id(&mut con, &user_id)
            .await?
            .ok_or_else(|| not_found("user", dto.id))?;
        if target.is_protected() {
            return Err(Report::new(KernelError::ProtectedAccount));
        }

        let active = self
            .loan_query()
            .count_active_by_user(&mut con, &user_id)
            .await?;
        if active > 0 {
            return Err(Report::new(KernelError::ActiveLoansExist { count: active })
                .attach_printable(format!("user {} still has open loans", dto.id)));
        }

        let purged = self.loan_modifier().purge_by_user(&mut con, &user_id).await?;
        self.user_modifier().delete(&mut con, &user_id).await?;

        con.commit().await?;
        tracing::info!(user = %dto.id, purged, "user deleted");
        Ok(())
    }
}

impl<Connection: Transaction + Send, T> AccountService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnUserQuery<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnUserModifier<Connection>
        + DependOnLoanModifier<Connection>
{
}
