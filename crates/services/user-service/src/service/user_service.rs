//! User service - validation and orchestration of user use cases.
//!
//! Validation and mutation are separate calls so the transport can pick the
//! failure status before any state changes. The two steps are not atomic;
//! the unique constraints on the table are the final guard.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{
    is_age_valid, is_email_valid, is_username_valid, DomainError, User, UserRequest,
    NO_RECORD_FOUND, USER_NOT_FOUND,
};

use crate::repository::{NewUser, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Check a creation request; returns the first failure.
    async fn validate_new_user(&self, req: &UserRequest) -> AppResult<()>;

    /// Create a user. Expects `validate_new_user` to have passed.
    async fn save(&self, req: UserRequest) -> AppResult<User>;

    /// Get user by ID (404 "user not found" when missing)
    async fn get(&self, id: u64) -> AppResult<User>;

    /// List all users
    async fn get_all(&self) -> AppResult<Vec<User>>;

    /// Existence check (404 "no record found" when missing)
    async fn validate_id(&self, id: u64) -> AppResult<()>;

    /// Check an update: existence first, then fields, excluding the user's own row
    /// from the uniqueness checks.
    async fn validate_existing_user(&self, user: &User) -> AppResult<()>;

    /// Overwrite username, email and age. Expects `validate_existing_user` to have passed.
    async fn update(&self, user: User) -> AppResult<User>;

    /// Hard delete. Expects `validate_id` to have passed.
    async fn delete(&self, id: u64) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn check_email(&self, email: &str, exclude_id: Option<u64>) -> AppResult<()> {
        if email.is_empty() {
            return Err(DomainError::EmailRequired.into());
        }
        if !is_email_valid(email) {
            return Err(DomainError::InvalidEmail.into());
        }
        if !self.repo.is_email_unique(exclude_id, email).await? {
            return Err(DomainError::EmailExists.into());
        }
        Ok(())
    }

    async fn check_username(&self, username: &str, exclude_id: Option<u64>) -> AppResult<()> {
        if username.is_empty() {
            return Err(DomainError::UsernameRequired.into());
        }
        if !is_username_valid(username) {
            return Err(DomainError::InvalidUsername.into());
        }
        if !self.repo.is_username_unique(exclude_id, username).await? {
            return Err(DomainError::UsernameExists.into());
        }
        Ok(())
    }

    fn check_age(age: i32) -> AppResult<()> {
        if is_age_valid(age) {
            Ok(())
        } else {
            Err(DomainError::InvalidAge.into())
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn validate_new_user(&self, req: &UserRequest) -> AppResult<()> {
        self.check_email(&req.email, None).await?;
        self.check_username(&req.username, None).await?;
        Self::check_age(req.age)
    }

    async fn save(&self, req: UserRequest) -> AppResult<User> {
        self.repo.save(NewUser::from(req)).await
    }

    async fn get(&self, id: u64) -> AppResult<User> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        self.repo.get_all().await
    }

    async fn validate_id(&self, id: u64) -> AppResult<()> {
        match self.repo.get(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(NO_RECORD_FOUND)),
        }
    }

    async fn validate_existing_user(&self, user: &User) -> AppResult<()> {
        self.validate_id(user.id).await?;

        let fields = async {
            self.check_email(&user.email, Some(user.id)).await?;
            self.check_username(&user.username, Some(user.id)).await?;
            Self::check_age(user.age)
        };
        fields.await.map_err(AppError::into_bad_request)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut record = self
            .repo
            .get_user(user.id)
            .await?
            .ok_or_else(|| AppError::not_found(NO_RECORD_FOUND))?;

        record.overwrite(user);
        self.repo.update(record).await
    }

    async fn delete(&self, id: u64) -> AppResult<()> {
        self.repo.delete(id).await
    }
}
