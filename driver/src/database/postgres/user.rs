use error_stack::Report;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{User, UserId, UserName, UserRole, UserStatus};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery<PostgresTransaction> for PostgresUserRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con.conn(), id).await
    }
}

#[async_trait::async_trait]
impl UserModifier<PostgresTransaction> for PostgresUserRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::create(con.conn(), user).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::delete(con.conn(), id).await
    }
}

impl DependOnUserQuery<PostgresTransaction> for PostgresDatabase {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier<PostgresTransaction> for PostgresDatabase {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    role: String,
    status: String,
}

impl TryFrom<UserRow> for User {
    type Error = Report<KernelError>;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&row.role).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown role {} stored for user {}", row.role, row.id))
        })?;
        let status = UserStatus::parse(&row.status).ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable(format!(
                "Unknown status {} stored for user {}",
                row.status, row.id
            ))
        })?;
        Ok(User::new(
            UserId::new(row.id),
            UserName::new(row.name),
            role,
            status,
        ))
    }
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                name,
                role,
                status
            FROM
                users
            WHERE
                id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn create(con: &mut PgConnection, user: &User) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO users (id, name, role, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id().as_ref())
        .bind(user.name().as_ref())
        .bind(user.role().as_str())
        .bind(user.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, id: &UserId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM users
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

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::UserQuery;
    use kernel::interface::update::UserModifier;
    use kernel::prelude::entity::{User, UserId, UserName, UserRole, UserStatus};
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresUserRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let user_id = UserId::new(uuid::Uuid::new_v4());
        let user = User::new(
            user_id.clone(),
            UserName::new("name".to_string()),
            UserRole::Member,
            UserStatus::Active,
        );
        PostgresUserRepository.create(&mut con, &user).await?;

        let find = PostgresUserRepository.find_by_id(&mut con, &user_id).await?;
        assert_eq!(find, Some(user));

        PostgresUserRepository.delete(&mut con, &user_id).await?;
        let find = PostgresUserRepository.find_by_id(&mut con, &user_id).await?;
        assert!(find.is_none());
        Ok(())
    }
}
