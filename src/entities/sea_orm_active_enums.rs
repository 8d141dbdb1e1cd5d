//! `SeaORM` active enums

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored as the integer column `users.role`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum RoleEnum {
    #[sea_orm(num_value = 1)]
    Registrar,
    #[sea_orm(num_value = 2)]
    Directorate,
    #[sea_orm(num_value = 3)]
    Teacher,
}

impl RoleEnum {
    pub fn label(&self) -> &'static str {
        match self {
            RoleEnum::Registrar => "Сотрудник учебного отдела",
            RoleEnum::Directorate => "Сотрудник дирекции",
            RoleEnum::Teacher => "Преподаватель",
        }
    }
}
