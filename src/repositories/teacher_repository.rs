use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use crate::entities::teacher;
use anyhow::Result;

pub struct TeacherRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeacherRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<teacher::Model>> {
        let teachers = teacher::Entity::find()
            .order_by_asc(teacher::Column::Surname)
            .order_by_asc(teacher::Column::FirstName)
            .all(self.db)
            .await?;
        Ok(teachers)
    }

    pub async fn find_by_id(&self, teacher_id: i32) -> Result<Option<teacher::Model>> {
        let teacher = teacher::Entity::find_by_id(teacher_id).one(self.db).await?;
        Ok(teacher)
    }

    /// Teacher accounts are linked to teacher records by surname only.
    pub async fn find_first_by_surname(&self, surname: &str) -> Result<Option<teacher::Model>> {
        let teacher = teacher::Entity::find()
            .filter(teacher::Column::Surname.eq(surname))
            .order_by_asc(teacher::Column::Id)
            .one(self.db)
            .await?;
        Ok(teacher)
    }

    pub async fn find_by_name(
        &self,
        surname: &str,
        first_name: &str,
    ) -> Result<Option<teacher::Model>> {
        let teacher = teacher::Entity::find()
            .filter(teacher::Column::Surname.eq(surname))
            .filter(teacher::Column::FirstName.eq(first_name))
            .one(self.db)
            .await?;
        Ok(teacher)
    }

    pub async fn create(&self, new_teacher: NewTeacher) -> Result<teacher::Model> {
        let teacher_model = teacher::ActiveModel {
            surname: Set(new_teacher.surname),
            first_name: Set(new_teacher.first_name),
            patronymic: Set(new_teacher.patronymic),
            position: Set(new_teacher.position),
            ..Default::default()
        };

        let result = teacher_model.insert(self.db).await?;
        Ok(result)
    }

    /// Looks a teacher up by surname and first name, creating it when missing.
    pub async fn get_or_create(&self, new_teacher: NewTeacher) -> Result<teacher::Model> {
        if let Some(existing) = self
            .find_by_name(&new_teacher.surname, &new_teacher.first_name)
            .await?
        {
            return Ok(existing);
        }
        self.create(new_teacher).await
    }
}

pub struct NewTeacher {
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
    pub position: String,
}
