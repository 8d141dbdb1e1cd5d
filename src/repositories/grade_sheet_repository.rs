use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    sea_query::{Expr, OnConflict, Query},
};
use serde::Serialize;
use utoipa::ToSchema;
use crate::entities::{discipline, grade_sheet, semester, student};
use anyhow::Result;

/// Rows per INSERT statement; keeps bulk provisioning under SQLite's bind limit.
const INSERT_CHUNK: usize = 500;

/// One line of a grade-entry sheet.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize, ToSchema)]
pub struct GradeEntryRow {
    pub grade_sheet_id: i32,
    pub student_id: i32,
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
    pub teacher_id: Option<i32>,
    pub grade: i32,
    pub date: NaiveDate,
}

/// One line of a student's course report.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize, ToSchema)]
pub struct StudentGradeRow {
    pub grade_sheet_id: i32,
    pub discipline_id: i32,
    pub discipline_name: String,
    pub exam_type: String,
    pub semester_number: i32,
    pub teacher_id: Option<i32>,
    pub grade: i32,
    pub date: NaiveDate,
}

fn triple_conflict() -> OnConflict {
    OnConflict::columns([
        grade_sheet::Column::StudentId,
        grade_sheet::Column::DisciplineId,
        grade_sheet::Column::SemesterId,
    ])
}

pub struct GradeSheetRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GradeSheetRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_for_discipline_group(
        &self,
        discipline_id: i32,
        group_id: i32,
    ) -> Result<Vec<grade_sheet::Model>> {
        let rows = grade_sheet::Entity::find()
            .join(JoinType::InnerJoin, grade_sheet::Relation::Student.def())
            .filter(grade_sheet::Column::DisciplineId.eq(discipline_id))
            .filter(student::Column::GroupId.eq(group_id))
            .order_by_asc(grade_sheet::Column::Id)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_students(&self, student_ids: Vec<i32>) -> Result<Vec<grade_sheet::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = grade_sheet::Entity::find()
            .filter(grade_sheet::Column::StudentId.is_in(student_ids))
            .order_by_asc(grade_sheet::Column::Id)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    pub async fn entry_rows(&self, discipline_id: i32, group_id: i32) -> Result<Vec<GradeEntryRow>> {
        let rows = grade_sheet::Entity::find()
            .select_only()
            .column_as(grade_sheet::Column::Id, "grade_sheet_id")
            .column(grade_sheet::Column::StudentId)
            .column(student::Column::Surname)
            .column(student::Column::FirstName)
            .column(student::Column::Patronymic)
            .column(grade_sheet::Column::TeacherId)
            .column(grade_sheet::Column::Grade)
            .column(grade_sheet::Column::Date)
            .join(JoinType::InnerJoin, grade_sheet::Relation::Student.def())
            .filter(grade_sheet::Column::DisciplineId.eq(discipline_id))
            .filter(student::Column::GroupId.eq(group_id))
            .order_by_asc(student::Column::Surname)
            .order_by_asc(student::Column::FirstName)
            .order_by_asc(grade_sheet::Column::Id)
            .into_model::<GradeEntryRow>()
            .all(self.db)
            .await?;
        Ok(rows)
    }

    /// Rows of one student restricted to the given semester numbers,
    /// ordered by semester number then discipline name.
    pub async fn student_rows_in_semesters(
        &self,
        student_id: i32,
        semester_numbers: Vec<i32>,
    ) -> Result<Vec<StudentGradeRow>> {
        let rows = grade_sheet::Entity::find()
            .select_only()
            .column_as(grade_sheet::Column::Id, "grade_sheet_id")
            .column(grade_sheet::Column::DisciplineId)
            .column_as(discipline::Column::Name, "discipline_name")
            .column(discipline::Column::ExamType)
            .column_as(semester::Column::Number, "semester_number")
            .column(grade_sheet::Column::TeacherId)
            .column(grade_sheet::Column::Grade)
            .column(grade_sheet::Column::Date)
            .join(JoinType::InnerJoin, grade_sheet::Relation::Discipline.def())
            .join(JoinType::InnerJoin, grade_sheet::Relation::Semester.def())
            .filter(grade_sheet::Column::StudentId.eq(student_id))
            .filter(semester::Column::Number.is_in(semester_numbers))
            .order_by_asc(semester::Column::Number)
            .order_by_asc(discipline::Column::Name)
            .into_model::<StudentGradeRow>()
            .all(self.db)
            .await?;
        Ok(rows)
    }

    pub async fn count_for_student(&self, student_id: i32) -> Result<u64> {
        let count = grade_sheet::Entity::find()
            .filter(grade_sheet::Column::StudentId.eq(student_id))
            .count(self.db)
            .await?;
        Ok(count)
    }

    pub async fn update_grade(
        &self,
        row: grade_sheet::Model,
        grade: i32,
    ) -> Result<grade_sheet::Model> {
        let mut active_model: grade_sheet::ActiveModel = row.into();
        active_model.grade = Set(grade);
        let result = active_model.update(self.db).await?;
        Ok(result)
    }

    /// Teacher of the first existing row of (discipline, group), if any.
    pub async fn current_teacher_id(&self, discipline_id: i32, group_id: i32) -> Result<Option<i32>> {
        let first = self
            .find_for_discipline_group(discipline_id, group_id)
            .await?
            .into_iter()
            .next();
        Ok(first.and_then(|row| row.teacher_id))
    }

    /// Sets the teacher on every existing row of the discipline whose student
    /// belongs to the group; returns the number of rows touched.
    pub async fn set_teacher_for_group(
        &self,
        discipline_id: i32,
        group_id: i32,
        teacher_id: i32,
    ) -> Result<u64> {
        let group_students = Query::select()
            .column(student::Column::Id)
            .from(student::Entity)
            .and_where(student::Column::GroupId.eq(group_id))
            .to_owned();

        let result = grade_sheet::Entity::update_many()
            .col_expr(grade_sheet::Column::TeacherId, Expr::value(teacher_id))
            .filter(grade_sheet::Column::DisciplineId.eq(discipline_id))
            .filter(grade_sheet::Column::StudentId.in_subquery(group_students))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Moves every row of the discipline to `semester_id`.
    pub async fn move_discipline_to_semester(
        &self,
        discipline_id: i32,
        semester_id: i32,
    ) -> Result<u64> {
        let result = grade_sheet::Entity::update_many()
            .col_expr(grade_sheet::Column::SemesterId, Expr::value(semester_id))
            .filter(grade_sheet::Column::DisciplineId.eq(discipline_id))
            .filter(grade_sheet::Column::SemesterId.ne(semester_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Inserts rows whose (student, discipline, semester) key is not taken yet;
    /// returns the number actually created.
    pub async fn insert_missing(&self, rows: Vec<grade_sheet::ActiveModel>) -> Result<u64> {
        let mut created = 0;
        for chunk in rows.chunks(INSERT_CHUNK) {
            created += grade_sheet::Entity::insert_many(chunk.to_vec())
                .on_conflict(triple_conflict().do_nothing().to_owned())
                .exec_without_returning(self.db)
                .await?;
        }
        Ok(created)
    }

    /// Inserts rows, overwriting only the teacher of rows that already exist.
    pub async fn upsert_teacher(&self, rows: Vec<grade_sheet::ActiveModel>) -> Result<u64> {
        let mut affected = 0;
        for chunk in rows.chunks(INSERT_CHUNK) {
            affected += grade_sheet::Entity::insert_many(chunk.to_vec())
                .on_conflict(
                    triple_conflict()
                        .update_column(grade_sheet::Column::TeacherId)
                        .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?;
        }
        Ok(affected)
    }

    pub async fn discipline_ids_for_teacher(&self, teacher_id: i32) -> Result<Vec<i32>> {
        let ids = grade_sheet::Entity::find()
            .select_only()
            .column(grade_sheet::Column::DisciplineId)
            .distinct()
            .filter(grade_sheet::Column::TeacherId.eq(teacher_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;
        Ok(ids)
    }
}
