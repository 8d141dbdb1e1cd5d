//! `SeaORM` Entity for teachers table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "teachers"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
    pub position: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    Surname,
    FirstName,
    Patronymic,
    Position,
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
    GradeSheet,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::Surname => ColumnType::String(StringLen::N(100)).def(),
            Self::FirstName => ColumnType::String(StringLen::N(100)).def(),
            Self::Patronymic => ColumnType::String(StringLen::N(100)).def(),
            Self::Position => ColumnType::String(StringLen::N(100)).def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::GradeSheet => Entity::has_many(super::grade_sheet::Entity).into(),
        }
    }
}

impl Related<super::grade_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeSheet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
