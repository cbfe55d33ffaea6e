use super::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::user_query::{
    UserQuery, UserQueryError, UserQueryResult,
};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_query_result(model: UserModel) -> UserQueryResult {
        UserQueryResult {
            id: UserId::from(model.id),
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
        }
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        Ok(user.map(Self::map_to_query_result))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserQueryResult>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        Ok(user.map(Self::map_to_query_result))
    }
}
