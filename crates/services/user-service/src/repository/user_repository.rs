//! User repository: the only code that touches the `users` table.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity, Model, NewUser};
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reported when the store itself rejects a duplicate username or email.
const DUPLICATE_USER: &str = "username or email already exists";

/// User repository trait for dependency injection.
///
/// Lookups by id return `Ok(None)` when no row matches; every other failure
/// is a store error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn get(&self, id: u64) -> AppResult<Option<User>>;

    /// List every user in store order
    async fn get_all(&self) -> AppResult<Vec<User>>;

    /// Insert a new row; the store assigns the id
    async fn save(&self, user: NewUser) -> AppResult<User>;

    /// Overwrite the row matching `record.id`
    async fn update(&self, record: Model) -> AppResult<User>;

    /// Delete by ID; deleting a missing row is not an error
    async fn delete(&self, id: u64) -> AppResult<()>;

    /// True if no row other than `exclude_id` uses this email
    async fn is_email_unique(&self, exclude_id: Option<u64>, email: &str) -> AppResult<bool>;

    /// True if no row other than `exclude_id` uses this username
    async fn is_username_unique(&self, exclude_id: Option<u64>, username: &str)
        -> AppResult<bool>;

    /// Fetch the raw stored row
    async fn get_user(&self, id: u64) -> AppResult<Option<Model>>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Primary key for a wire id. Ids beyond the key range cannot exist.
fn row_key(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

/// Map write failures, separating unique-constraint rejections.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::bad_request(DUPLICATE_USER),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn get(&self, id: u64) -> AppResult<Option<User>> {
        Ok(self.get_user(id).await?.map(User::from))
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find().all(&self.db).await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn save(&self, user: NewUser) -> AppResult<User> {
        let model = ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(write_error)?;

        Ok(User::from(model))
    }

    async fn update(&self, record: Model) -> AppResult<User> {
        let active = ActiveModel {
            id: Unchanged(record.id),
            username: Set(record.username),
            email: Set(record.email),
            age: Set(record.age),
        };

        let model = active.update(&self.db).await.map_err(write_error)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: u64) -> AppResult<()> {
        let Some(key) = row_key(id) else {
            return Ok(());
        };

        let result = UserEntity::delete_by_id(key).exec(&self.db).await?;
        tracing::debug!(id, rows_affected = result.rows_affected, "Deleted user row");

        Ok(())
    }

    async fn is_email_unique(&self, exclude_id: Option<u64>, email: &str) -> AppResult<bool> {
        let mut query = UserEntity::find().filter(user::Column::Email.eq(email));
        if let Some(key) = exclude_id.and_then(row_key) {
            query = query.filter(user::Column::Id.ne(key));
        }

        Ok(query.one(&self.db).await?.is_none())
    }

    async fn is_username_unique(
        &self,
        exclude_id: Option<u64>,
        username: &str,
    ) -> AppResult<bool> {
        let mut query = UserEntity::find().filter(user::Column::Username.eq(username));
        if let Some(key) = exclude_id.and_then(row_key) {
            query = query.filter(user::Column::Id.ne(key));
        }

        Ok(query.one(&self.db).await?.is_none())
    }

    async fn get_user(&self, id: u64) -> AppResult<Option<Model>> {
        let Some(key) = row_key(id) else {
            return Ok(None);
        };

        Ok(UserEntity::find_by_id(key).one(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key_range() {
        assert_eq!(row_key(1), Some(1));
        assert_eq!(row_key(i64::MAX as u64), Some(i64::MAX));
        assert_eq!(row_key(u64::MAX), None);
    }

    #[test]
    fn test_plain_store_errors_pass_through() {
        let err = write_error(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
