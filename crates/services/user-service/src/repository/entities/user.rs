//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::{User, UserRequest};

/// Stored user row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Row contents for an insert; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub age: i32,
}

impl Model {
    /// Replace the mutable fields, keeping the id.
    pub fn overwrite(&mut self, user: User) {
        self.username = user.username;
        self.email = user.email;
        self.age = user.age;
    }
}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            // Keys come from a positive sequence.
            id: model.id as u64,
            username: model.username,
            email: model.email,
            age: model.age,
        }
    }
}

impl From<UserRequest> for NewUser {
    fn from(req: UserRequest) -> Self {
        NewUser {
            username: req.username,
            email: req.email,
            age: req.age,
        }
    }
}

impl From<NewUser> for ActiveModel {
    fn from(user: NewUser) -> Self {
        ActiveModel {
            id: NotSet,
            username: Set(user.username),
            email: Set(user.email),
            age: Set(user.age),
        }
    }
}
