use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use super::dto::{
    DisciplineGroupsResponse, GroupRosterRow, StudentSearchQuery, StudentSearchResponse,
    StudentSearchRow,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{AppError, AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Permission, ensure_permission};
use crate::repositories::{
    DisciplineRepository, GradeSheetRepository, GroupRepository, SpecialtyRepository,
    StudentRepository, TeacherRepository,
};
use crate::routes::disciplines::dto::DisciplineResponse;
use crate::routes::groups::dto::GroupResponse;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/directorate/students/", get(search_students))
        .route("/directorate/groups/", get(group_roster))
        .route("/directorate/disciplines/", get(select_discipline))
        .route(
            "/directorate/disciplines/{discipline_id}/groups/",
            get(select_discipline_group),
        )
}

#[utoipa::path(
    get,
    path = "/directorate/students/",
    params(StudentSearchQuery),
    responses(
        (status = 200, description = "Matching students with their group", body = StudentSearchResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Directorate"
)]
pub async fn search_students(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Query(query): Query<StudentSearchQuery>,
) -> AppResult<Json<StudentSearchResponse>> {
    let repo = StudentRepository::new(&state.db);
    let needle = query.q.trim();
    let found = if needle.is_empty() {
        repo.find_all_with_group().await?
    } else {
        repo.search_by_surname(needle).await?
    };

    let specialties: HashMap<i32, _> = SpecialtyRepository::new(&state.db)
        .find_all()
        .await?
        .into_iter()
        .map(|specialty| (specialty.id, specialty))
        .collect();

    let students = found
        .into_iter()
        .map(|(student, group)| StudentSearchRow {
            student: student.into(),
            group: group.map(|group| {
                let specialty = specialties.get(&group.specialty_id);
                GroupResponse::with_specialty(group, specialty)
            }),
        })
        .collect();

    Ok(Json(StudentSearchResponse {
        query: query.q,
        students,
    }))
}

#[utoipa::path(
    get,
    path = "/directorate/groups/",
    responses(
        (status = 200, description = "Groups with specialty and head count", body = Vec<GroupRosterRow>),
        (status = 403, description = "Not directorate staff", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Directorate"
)]
pub async fn group_roster(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> AppResult<Json<Vec<GroupRosterRow>>> {
    ensure_permission(&claims, Permission::ViewGroupRoster)?;

    let students = StudentRepository::new(&state.db);
    let mut roster = Vec::new();
    for (group, specialty) in GroupRepository::new(&state.db).find_all_with_specialty().await? {
        let student_count = students.count_by_group(group.id).await?;
        roster.push(GroupRosterRow {
            group: GroupResponse::with_specialty(group, specialty.as_ref()),
            student_count,
        });
    }
    Ok(Json(roster))
}

/// Disciplines to open a grade sheet for. Teachers only see the disciplines
/// they are assigned to, matched through their surname.
#[utoipa::path(
    get,
    path = "/directorate/disciplines/",
    responses(
        (status = 200, description = "Disciplines visible to the user", body = Vec<DisciplineResponse>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Directorate"
)]
pub async fn select_discipline(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> AppResult<Json<Vec<DisciplineResponse>>> {
    let disciplines = DisciplineRepository::new(&state.db);

    let visible = match claims.role {
        RoleEnum::Teacher => {
            let teacher = TeacherRepository::new(&state.db)
                .find_first_by_surname(&claims.surname)
                .await?;
            match teacher {
                Some(teacher) => {
                    let ids = GradeSheetRepository::new(&state.db)
                        .discipline_ids_for_teacher(teacher.id)
                        .await?;
                    disciplines.find_by_ids(ids).await?
                }
                None => Vec::new(),
            }
        }
        RoleEnum::Registrar | RoleEnum::Directorate => disciplines.find_all().await?,
    };

    Ok(Json(visible.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/directorate/disciplines/{discipline_id}/groups/",
    params(("discipline_id" = i32, Path, description = "Discipline id")),
    responses(
        (status = 200, description = "Groups of the discipline's specialty", body = DisciplineGroupsResponse),
        (status = 404, description = "Discipline not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Directorate"
)]
pub async fn select_discipline_group(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Path(discipline_id): Path<i32>,
) -> AppResult<Json<DisciplineGroupsResponse>> {
    let discipline = DisciplineRepository::new(&state.db)
        .find_by_id(discipline_id)
        .await?
        .ok_or_else(|| AppError::not_found("Discipline", discipline_id))?;

    let groups = match discipline.specialty_id {
        Some(specialty_id) => {
            GroupRepository::new(&state.db)
                .find_by_specialty(specialty_id)
                .await?
        }
        None => Vec::new(),
    };

    Ok(Json(DisciplineGroupsResponse {
        discipline: discipline.into(),
        groups: groups.into_iter().map(Into::into).collect(),
    }))
}
