use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use crate::entities::{group, specialty};
use anyhow::Result;

pub struct GroupRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<group::Model>> {
        let groups = group::Entity::find()
            .order_by_asc(group::Column::Name)
            .all(self.db)
            .await?;
        Ok(groups)
    }

    pub async fn find_all_with_specialty(
        &self,
    ) -> Result<Vec<(group::Model, Option<specialty::Model>)>> {
        let groups = group::Entity::find()
            .order_by_asc(group::Column::Name)
            .find_also_related(specialty::Entity)
            .all(self.db)
            .await?;
        Ok(groups)
    }

    pub async fn find_by_id(&self, group_id: i32) -> Result<Option<group::Model>> {
        let group = group::Entity::find_by_id(group_id).one(self.db).await?;
        Ok(group)
    }

    pub async fn find_by_ids(&self, group_ids: Vec<i32>) -> Result<Vec<group::Model>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        let groups = group::Entity::find()
            .filter(group::Column::Id.is_in(group_ids))
            .all(self.db)
            .await?;
        Ok(groups)
    }

    pub async fn find_by_specialty(&self, specialty_id: i32) -> Result<Vec<group::Model>> {
        let groups = group::Entity::find()
            .filter(group::Column::SpecialtyId.eq(specialty_id))
            .order_by_asc(group::Column::Name)
            .all(self.db)
            .await?;
        Ok(groups)
    }

    pub async fn find_by_name(&self, specialty_id: i32, name: &str) -> Result<Option<group::Model>> {
        let group = group::Entity::find()
            .filter(group::Column::SpecialtyId.eq(specialty_id))
            .filter(group::Column::Name.eq(name))
            .one(self.db)
            .await?;
        Ok(group)
    }

    pub async fn create(
        &self,
        specialty_id: i32,
        name: String,
        admission_year: i32,
    ) -> Result<group::Model> {
        let group_model = group::ActiveModel {
            specialty_id: Set(specialty_id),
            name: Set(name),
            admission_year: Set(admission_year),
            ..Default::default()
        };

        let result = group_model.insert(self.db).await?;
        Ok(result)
    }
}
