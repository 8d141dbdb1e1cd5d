//! `SeaORM` Entity for grade_sheets table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grade stored for rows that nobody has graded yet.
pub const UNGRADED: i32 = 0;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "grade_sheets"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub student_id: i32,
    pub discipline_id: i32,
    pub semester_id: i32,
    pub teacher_id: Option<i32>,
    pub grade: i32,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    StudentId,
    DisciplineId,
    SemesterId,
    TeacherId,
    Grade,
    Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Discipline,
    Semester,
    Teacher,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::StudentId => ColumnType::Integer.def(),
            Self::DisciplineId => ColumnType::Integer.def(),
            Self::SemesterId => ColumnType::Integer.def(),
            Self::TeacherId => ColumnType::Integer.def().null(),
            Self::Grade => ColumnType::Integer.def(),
            Self::Date => ColumnType::Date.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::student::Entity)
                .from(Column::StudentId)
                .to(super::student::Column::Id)
                .into(),
            Self::Discipline => Entity::belongs_to(super::discipline::Entity)
                .from(Column::DisciplineId)
                .to(super::discipline::Column::Id)
                .into(),
            Self::Semester => Entity::belongs_to(super::semester::Entity)
                .from(Column::SemesterId)
                .to(super::semester::Column::Id)
                .into(),
            Self::Teacher => Entity::belongs_to(super::teacher::Entity)
                .from(Column::TeacherId)
                .to(super::teacher::Column::Id)
                .into(),
        }
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::discipline::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discipline.def()
    }
}

impl Related<super::semester::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
