//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use common::{AppError, AppResult, BasicAuthConfig};
use domain::{User, UserRequest};
use user_service_lib::api::{create_router, AppState};
use user_service_lib::repository::entities::user::Model;
use user_service_lib::repository::{NewUser, UserRepository};
use user_service_lib::service::{UserManager, UserService};

/// `Basic` header value for the default admin/admin credentials.
pub const ADMIN_AUTH: &str = "Basic YWRtaW46YWRtaW4=";

pub const DOCS_BASE_PATH: &str = "/atmail";

// =============================================================================
// In-memory repository
// =============================================================================

/// Ordered in-memory table with an auto-increment key and unique
/// username and email columns.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Table>,
}

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Model>,
}

impl Table {
    fn clashes(&self, id: Option<i64>, username: &str, email: &str) -> bool {
        self.rows
            .values()
            .any(|row| Some(row.id) != id && (row.username == username || row.email == email))
    }
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.rows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn get(&self, id: u64) -> AppResult<Option<User>> {
        Ok(self.get_user(id).await?.map(User::from))
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        let table = self.rows.lock().await;
        Ok(table.rows.values().cloned().map(User::from).collect())
    }

    async fn save(&self, user: NewUser) -> AppResult<User> {
        let mut table = self.rows.lock().await;
        if table.clashes(None, &user.username, &user.email) {
            return Err(AppError::bad_request("username or email already exists"));
        }

        table.next_id += 1;
        let model = Model {
            id: table.next_id,
            username: user.username,
            email: user.email,
            age: user.age,
        };
        table.rows.insert(model.id, model.clone());
        Ok(User::from(model))
    }

    async fn update(&self, record: Model) -> AppResult<User> {
        let mut table = self.rows.lock().await;
        if table.clashes(Some(record.id), &record.username, &record.email) {
            return Err(AppError::bad_request("username or email already exists"));
        }

        table.rows.insert(record.id, record.clone());
        Ok(User::from(record))
    }

    async fn delete(&self, id: u64) -> AppResult<()> {
        if let Ok(key) = i64::try_from(id) {
            self.rows.lock().await.rows.remove(&key);
        }
        Ok(())
    }

    async fn is_email_unique(&self, exclude_id: Option<u64>, email: &str) -> AppResult<bool> {
        let table = self.rows.lock().await;
        Ok(!table
            .rows
            .values()
            .any(|row| exclude_id != Some(row.id as u64) && row.email == email))
    }

    async fn is_username_unique(
        &self,
        exclude_id: Option<u64>,
        username: &str,
    ) -> AppResult<bool> {
        let table = self.rows.lock().await;
        Ok(!table
            .rows
            .values()
            .any(|row| exclude_id != Some(row.id as u64) && row.username == username))
    }

    async fn get_user(&self, id: u64) -> AppResult<Option<Model>> {
        let Ok(key) = i64::try_from(id) else {
            return Ok(None);
        };
        Ok(self.rows.lock().await.rows.get(&key).cloned())
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn request(username: &str, email: &str, age: i32) -> UserRequest {
    UserRequest {
        username: username.to_string(),
        email: email.to_string(),
        age,
    }
}

/// Service over a fresh in-memory table, with the table kept for inspection.
pub fn service() -> (Arc<InMemoryUsers>, UserManager) {
    let repo = Arc::new(InMemoryUsers::new());
    let service = UserManager::new(repo.clone());
    (repo, service)
}

/// Router over a fresh in-memory table with admin/admin credentials.
pub fn router() -> (Arc<dyn UserService>, axum::Router) {
    router_with_docs_base(DOCS_BASE_PATH)
}

/// Same as [`router`], advertising `docs_base_path` in the OpenAPI document.
pub fn router_with_docs_base(docs_base_path: &str) -> (Arc<dyn UserService>, axum::Router) {
    let (_, service) = service();
    let service: Arc<dyn UserService> = Arc::new(service);
    let state = AppState::new(service.clone(), BasicAuthConfig::default());
    (service, create_router(state, docs_base_path))
}
