//! `SeaORM` Entity for disciplines table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "disciplines"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub name: String,
    pub exam_type: String,
    pub hours: i32,
    pub specialty_id: Option<i32>,
    pub semester_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    Name,
    ExamType,
    Hours,
    SpecialtyId,
    SemesterId,
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
    Specialty,
    Semester,
    GradeSheet,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::Name => ColumnType::String(StringLen::N(255)).def(),
            Self::ExamType => ColumnType::String(StringLen::N(50)).def(),
            Self::Hours => ColumnType::Integer.def(),
            Self::SpecialtyId => ColumnType::Integer.def().null(),
            Self::SemesterId => ColumnType::Integer.def().null(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Specialty => Entity::belongs_to(super::specialty::Entity)
                .from(Column::SpecialtyId)
                .to(super::specialty::Column::Id)
                .into(),
            Self::Semester => Entity::belongs_to(super::semester::Entity)
                .from(Column::SemesterId)
                .to(super::semester::Column::Id)
                .into(),
            Self::GradeSheet => Entity::has_many(super::grade_sheet::Entity).into(),
        }
    }
}

impl Related<super::specialty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Specialty.def()
    }
}

impl Related<super::semester::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl Related<super::grade_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeSheet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
