use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use crate::entities::{sea_orm_active_enums::RoleEnum, user};
use anyhow::Result;
use chrono::Utc;

pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<user::Model> {
        let user_model = user::ActiveModel {
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
            surname: Set(new_user.surname),
            first_name: Set(new_user.first_name),
            patronymic: Set(new_user.patronymic),
            role: Set(new_user.role),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = user_model.insert(self.db).await?;
        Ok(result)
    }
}

pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
    pub role: RoleEnum,
}
