use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::user_repository::{
    NewUser, UserRepository, UserRepositoryError,
};
use crate::shared::db_error::{constraint_violation, ConstraintViolation};

use super::sea_orm_entity::users::ActiveModel as UserActiveModel;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<UserId, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: NotSet,
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: NotSet,
        };

        let inserted = active_user
            .insert(&*self.db)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::Unique(_)) => UserRepositoryError::UserAlreadyExists,
                _ => UserRepositoryError::DatabaseError(e.to_string()),
            })?;

        Ok(UserId::from(inserted.id))
    }
}
