use axum::{Json, Router, routing::get};

use super::dto::{HomeResponse, SectionLink};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::Permission;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/", get(home))
}

const SECTIONS: [(&str, &str, Option<Permission>); 10] = [
    ("Специальности", "/specialties/", Some(Permission::ManageCatalog)),
    ("Дисциплины", "/disciplines/", Some(Permission::ManageCatalog)),
    ("Учебный план", "/reports/study-plan/", Some(Permission::ManageCatalog)),
    ("Группы", "/directorate/groups/", Some(Permission::ViewGroupRoster)),
    ("Выбор группы", "/groups/select/", None),
    ("Поиск студентов", "/directorate/students/", None),
    ("Ведомости", "/directorate/disciplines/", None),
    ("Преподаватели", "/teachers/", None),
    ("Формы контроля", "/control-forms/", None),
    ("Учебный план ИРНИТУ", "/curriculum-doc/", None),
];

/// Sections of the application the role can open.
pub fn sections_for(role: RoleEnum) -> Vec<SectionLink> {
    SECTIONS
        .iter()
        .filter(|(_, _, permission)| permission.is_none_or(|p| p.allows(role)))
        .map(|&(title, path, _)| SectionLink { title, path })
        .collect()
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Current user and available sections", body = HomeResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Home"
)]
pub async fn home(AuthClaims(claims): AuthClaims) -> AppResult<Json<HomeResponse>> {
    Ok(Json(HomeResponse {
        sections: sections_for(claims.role),
        role_label: claims.role.label(),
        role: claims.role,
        username: claims.username,
        surname: claims.surname,
    }))
}
