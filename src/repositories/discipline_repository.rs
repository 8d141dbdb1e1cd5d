use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DeleteResult, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use crate::entities::{discipline, semester, specialty};
use anyhow::Result;

pub struct DisciplineRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DisciplineRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<discipline::Model>> {
        let disciplines = discipline::Entity::find()
            .order_by_asc(discipline::Column::Name)
            .all(self.db)
            .await?;
        Ok(disciplines)
    }

    pub async fn find_by_id(&self, discipline_id: i32) -> Result<Option<discipline::Model>> {
        let discipline = discipline::Entity::find_by_id(discipline_id)
            .one(self.db)
            .await?;
        Ok(discipline)
    }

    pub async fn find_by_ids(&self, discipline_ids: Vec<i32>) -> Result<Vec<discipline::Model>> {
        if discipline_ids.is_empty() {
            return Ok(Vec::new());
        }
        let disciplines = discipline::Entity::find()
            .filter(discipline::Column::Id.is_in(discipline_ids))
            .order_by_asc(discipline::Column::Name)
            .all(self.db)
            .await?;
        Ok(disciplines)
    }

    /// Disciplines with their semester, optionally restricted to one specialty.
    pub async fn find_with_semester(
        &self,
        specialty_id: Option<i32>,
    ) -> Result<Vec<(discipline::Model, Option<semester::Model>)>> {
        let mut query = discipline::Entity::find();
        if let Some(specialty_id) = specialty_id {
            query = query.filter(discipline::Column::SpecialtyId.eq(specialty_id));
        }

        let disciplines = query
            .order_by_asc(discipline::Column::Name)
            .find_also_related(semester::Entity)
            .all(self.db)
            .await?;
        Ok(disciplines)
    }

    pub async fn find_by_specialty_ids(
        &self,
        specialty_ids: Vec<i32>,
    ) -> Result<Vec<discipline::Model>> {
        if specialty_ids.is_empty() {
            return Ok(Vec::new());
        }
        let disciplines = discipline::Entity::find()
            .filter(discipline::Column::SpecialtyId.is_in(specialty_ids))
            .order_by_asc(discipline::Column::Id)
            .all(self.db)
            .await?;
        Ok(disciplines)
    }

    /// Disciplines taught in the semester with the given number, with their specialty.
    pub async fn find_by_semester_number(
        &self,
        number: i32,
    ) -> Result<Vec<(discipline::Model, Option<specialty::Model>)>> {
        let disciplines = discipline::Entity::find()
            .join(JoinType::InnerJoin, discipline::Relation::Semester.def())
            .filter(semester::Column::Number.eq(number))
            .order_by_asc(discipline::Column::Id)
            .find_also_related(specialty::Entity)
            .all(self.db)
            .await?;
        Ok(disciplines)
    }

    /// A discipline identical in name, form, specialty and semester.
    pub async fn find_matching(&self, candidate: &NewDiscipline) -> Result<Option<discipline::Model>> {
        let mut query = discipline::Entity::find()
            .filter(discipline::Column::Name.eq(candidate.name.as_str()))
            .filter(discipline::Column::ExamType.eq(candidate.exam_type.as_str()));
        query = match candidate.specialty_id {
            Some(id) => query.filter(discipline::Column::SpecialtyId.eq(id)),
            None => query.filter(discipline::Column::SpecialtyId.is_null()),
        };
        query = match candidate.semester_id {
            Some(id) => query.filter(discipline::Column::SemesterId.eq(id)),
            None => query.filter(discipline::Column::SemesterId.is_null()),
        };
        let discipline = query.one(self.db).await?;
        Ok(discipline)
    }

    pub async fn create(&self, new_discipline: NewDiscipline) -> Result<discipline::Model> {
        let discipline_model = discipline::ActiveModel {
            name: Set(new_discipline.name),
            exam_type: Set(new_discipline.exam_type),
            hours: Set(new_discipline.hours),
            specialty_id: Set(new_discipline.specialty_id),
            semester_id: Set(new_discipline.semester_id),
            ..Default::default()
        };

        let result = discipline_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update(
        &self,
        discipline: discipline::Model,
        updates: DisciplineUpdate,
    ) -> Result<discipline::Model> {
        let mut active_model: discipline::ActiveModel = discipline.into();

        active_model.name = Set(updates.name);
        active_model.exam_type = Set(updates.exam_type);
        active_model.hours = Set(updates.hours);
        active_model.semester_id = Set(updates.semester_id);

        let result = active_model.update(self.db).await?;
        Ok(result)
    }

    pub async fn delete(&self, discipline: discipline::Model) -> Result<DeleteResult> {
        let active_model: discipline::ActiveModel = discipline.into();
        let result = active_model.delete(self.db).await?;
        Ok(result)
    }
}

pub struct NewDiscipline {
    pub name: String,
    pub exam_type: String,
    pub hours: i32,
    pub specialty_id: Option<i32>,
    pub semester_id: Option<i32>,
}

pub struct DisciplineUpdate {
    pub name: String,
    pub exam_type: String,
    pub hours: i32,
    pub semester_id: Option<i32>,
}
