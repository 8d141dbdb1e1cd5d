use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use crate::entities::{discipline, specialty};
use anyhow::Result;

pub struct SpecialtyRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SpecialtyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<specialty::Model>> {
        let specialties = specialty::Entity::find()
            .order_by_asc(specialty::Column::Code)
            .all(self.db)
            .await?;
        Ok(specialties)
    }

    pub async fn find_by_id(&self, specialty_id: i32) -> Result<Option<specialty::Model>> {
        let specialty = specialty::Entity::find_by_id(specialty_id)
            .one(self.db)
            .await?;
        Ok(specialty)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<specialty::Model>> {
        let specialty = specialty::Entity::find()
            .filter(specialty::Column::Code.eq(code))
            .order_by_asc(specialty::Column::Id)
            .one(self.db)
            .await?;
        Ok(specialty)
    }

    /// Every specialty together with its disciplines, ordered by code.
    pub async fn find_all_with_disciplines(
        &self,
    ) -> Result<Vec<(specialty::Model, Vec<discipline::Model>)>> {
        let rows = specialty::Entity::find()
            .order_by_asc(specialty::Column::Code)
            .order_by_asc(specialty::Column::Id)
            .find_with_related(discipline::Entity)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, code: String, name: String) -> Result<specialty::Model> {
        let specialty_model = specialty::ActiveModel {
            code: Set(code),
            name: Set(name),
            ..Default::default()
        };

        let result = specialty_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update(
        &self,
        specialty: specialty::Model,
        updates: SpecialtyUpdate,
    ) -> Result<specialty::Model> {
        let mut active_model: specialty::ActiveModel = specialty.into();

        if let Some(code) = updates.code {
            active_model.code = Set(code);
        }
        if let Some(name) = updates.name {
            active_model.name = Set(name);
        }

        let result = active_model.update(self.db).await?;
        Ok(result)
    }

    pub async fn delete(&self, specialty: specialty::Model) -> Result<DeleteResult> {
        let active_model: specialty::ActiveModel = specialty.into();
        let result = active_model.delete(self.db).await?;
        Ok(result)
    }
}

pub struct SpecialtyUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
}
