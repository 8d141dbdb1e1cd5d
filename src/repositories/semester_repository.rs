use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use crate::entities::{discipline, semester};
use anyhow::Result;

pub struct SemesterRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SemesterRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<semester::Model>> {
        let semesters = semester::Entity::find()
            .order_by_asc(semester::Column::Number)
            .all(self.db)
            .await?;
        Ok(semesters)
    }

    pub async fn find_by_id(&self, semester_id: i32) -> Result<Option<semester::Model>> {
        let semester = semester::Entity::find_by_id(semester_id).one(self.db).await?;
        Ok(semester)
    }

    pub async fn find_by_number(&self, number: i32) -> Result<Option<semester::Model>> {
        let semester = semester::Entity::find()
            .filter(semester::Column::Number.eq(number))
            .one(self.db)
            .await?;
        Ok(semester)
    }

    pub async fn find_all_with_disciplines(
        &self,
    ) -> Result<Vec<(semester::Model, Vec<discipline::Model>)>> {
        let rows = semester::Entity::find()
            .order_by_asc(semester::Column::Number)
            .find_with_related(discipline::Entity)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    /// Creates the semesters numbered `1..=count` that do not exist yet.
    pub async fn ensure_numbers(&self, count: i32) -> Result<u64> {
        let models = (1..=count).map(|number| semester::ActiveModel {
            number: Set(number),
            ..Default::default()
        });

        let created = semester::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(semester::Column::Number)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;
        Ok(created)
    }
}
