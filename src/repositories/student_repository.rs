use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DeleteResult, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use crate::entities::{group, student};
use anyhow::Result;

pub struct StudentRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, student_id: i32) -> Result<Option<student::Model>> {
        let student = student::Entity::find_by_id(student_id).one(self.db).await?;
        Ok(student)
    }

    pub async fn find_with_group(
        &self,
        student_id: i32,
    ) -> Result<Option<(student::Model, Option<group::Model>)>> {
        let student = student::Entity::find_by_id(student_id)
            .find_also_related(group::Entity)
            .one(self.db)
            .await?;
        Ok(student)
    }

    pub async fn find_by_group(&self, group_id: i32) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .filter(student::Column::GroupId.eq(group_id))
            .order_by_asc(student::Column::Surname)
            .order_by_asc(student::Column::FirstName)
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn find_by_specialty(&self, specialty_id: i32) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .join(JoinType::InnerJoin, student::Relation::Group.def())
            .filter(group::Column::SpecialtyId.eq(specialty_id))
            .order_by_asc(student::Column::Id)
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn count_by_group(&self, group_id: i32) -> Result<u64> {
        let count = student::Entity::find()
            .filter(student::Column::GroupId.eq(group_id))
            .count(self.db)
            .await?;
        Ok(count)
    }

    /// All students with their group, ordered by surname.
    pub async fn find_all_with_group(
        &self,
    ) -> Result<Vec<(student::Model, Option<group::Model>)>> {
        let students = student::Entity::find()
            .order_by_asc(student::Column::Surname)
            .order_by_asc(student::Column::FirstName)
            .find_also_related(group::Entity)
            .all(self.db)
            .await?;
        Ok(students)
    }

    /// Case-insensitive substring match on the surname.
    ///
    /// Matching happens here rather than in SQL because SQLite only folds
    /// ASCII case and surnames are mostly Cyrillic.
    pub async fn search_by_surname(
        &self,
        query: &str,
    ) -> Result<Vec<(student::Model, Option<group::Model>)>> {
        let needle = query.to_lowercase();
        let students = self
            .find_all_with_group()
            .await?
            .into_iter()
            .filter(|(student, _)| student.surname.to_lowercase().contains(&needle))
            .collect();
        Ok(students)
    }

    pub async fn create(&self, group_id: i32, new_student: NewStudent) -> Result<student::Model> {
        let student_model = student::ActiveModel {
            group_id: Set(group_id),
            surname: Set(new_student.surname),
            first_name: Set(new_student.first_name),
            patronymic: Set(new_student.patronymic),
            ..Default::default()
        };

        let result = student_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn delete(&self, student: student::Model) -> Result<DeleteResult> {
        let active_model: student::ActiveModel = student.into();
        let result = active_model.delete(self.db).await?;
        Ok(result)
    }
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
}
