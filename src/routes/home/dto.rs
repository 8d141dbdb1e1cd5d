use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::RoleEnum;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SectionLink {
    pub title: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub username: String,
    pub surname: String,
    pub role: RoleEnum,
    pub role_label: &'static str,
    pub sections: Vec<SectionLink>,
}
