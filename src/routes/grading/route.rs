use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use super::dto::{
    AssignTeacherFormResponse, AssignTeacherRequest, GradeEntryResponse, GradeSubmission,
};
use crate::entities::{discipline, group, sea_orm_active_enums::RoleEnum};
use crate::error::{AppError, AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Permission, ensure_permission, has_permission};
use crate::repositories::{
    DisciplineRepository, GradeSheetRepository, GroupRepository, TeacherRepository,
};
use crate::routes::flash::FlashRedirect;
use crate::services::grading::{
    Assignment, assign_teacher, open_grade_sheet, parse_submission, submit_grades,
};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/grade-entry/{discipline_id}/{group_id}/",
            get(grade_entry).post(save_grades),
        )
        .route(
            "/assign-teacher/{discipline_id}/{group_id}/",
            get(assign_teacher_form).post(assign_teacher_to_group),
        )
}

fn grade_entry_path(discipline_id: i32, group_id: i32) -> String {
    format!("/grade-entry/{discipline_id}/{group_id}/")
}

async fn load_sheet_target(
    state: &AppState,
    discipline_id: i32,
    group_id: i32,
) -> AppResult<(discipline::Model, group::Model)> {
    let discipline = DisciplineRepository::new(&state.db)
        .find_by_id(discipline_id)
        .await?
        .ok_or_else(|| AppError::not_found("Discipline", discipline_id))?;
    let group = GroupRepository::new(&state.db)
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| AppError::not_found("Group", group_id))?;
    Ok((discipline, group))
}

/// Grade sheet of one discipline for one group. Opening it as registrar staff
/// or a teacher creates the rows still missing.
#[utoipa::path(
    get,
    path = "/grade-entry/{discipline_id}/{group_id}/",
    params(
        ("discipline_id" = i32, Path, description = "Discipline id"),
        ("group_id" = i32, Path, description = "Group id")
    ),
    responses(
        (status = 200, description = "Grade sheet rows", body = GradeEntryResponse),
        (status = 404, description = "Discipline or group not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Grading"
)]
pub async fn grade_entry(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path((discipline_id, group_id)): Path<(i32, i32)>,
) -> AppResult<Json<GradeEntryResponse>> {
    let (discipline, group) = load_sheet_target(&state, discipline_id, group_id).await?;

    let rows = open_grade_sheet(&state.db, claims.role, &discipline, group_id).await?;

    Ok(Json(GradeEntryResponse {
        discipline: discipline.into(),
        group: group.into(),
        can_edit: has_permission(&claims, Permission::EditGrades),
        rows,
    }))
}

#[utoipa::path(
    post,
    path = "/grade-entry/{discipline_id}/{group_id}/",
    params(
        ("discipline_id" = i32, Path, description = "Discipline id"),
        ("group_id" = i32, Path, description = "Group id")
    ),
    request_body = GradeSubmission,
    responses(
        (status = 303, description = "Grades saved, or refused for directorate staff", body = FlashRedirect),
        (status = 404, description = "Discipline or group not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Grading"
)]
pub async fn save_grades(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path((discipline_id, group_id)): Path<(i32, i32)>,
    Json(GradeSubmission(form)): Json<GradeSubmission>,
) -> AppResult<FlashRedirect> {
    let (discipline, group) = load_sheet_target(&state, discipline_id, group_id).await?;
    let redirect_to = grade_entry_path(discipline.id, group.id);

    match claims.role {
        RoleEnum::Directorate => {
            tracing::info!(user = %claims.username, discipline_id, group_id, "Grade change refused");
            return Ok(FlashRedirect::error(
                redirect_to,
                "У Дирекции нет прав на изменение оценок.",
            ));
        }
        RoleEnum::Registrar | RoleEnum::Teacher => {}
    }
    ensure_permission(&claims, Permission::EditGrades)?;

    let grades = parse_submission(&form);
    let saved = submit_grades(&state.db, discipline.id, group.id, &grades).await?;

    Ok(FlashRedirect::success(
        redirect_to,
        format!("Оценки сохранены. Обновлено записей: {saved}."),
    ))
}

#[utoipa::path(
    get,
    path = "/assign-teacher/{discipline_id}/{group_id}/",
    params(
        ("discipline_id" = i32, Path, description = "Discipline id"),
        ("group_id" = i32, Path, description = "Group id")
    ),
    responses(
        (status = 200, description = "Teachers to choose from and the current one", body = AssignTeacherFormResponse),
        (status = 403, description = "Not allowed to assign teachers", body = ErrorBody),
        (status = 404, description = "Discipline or group not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Grading"
)]
pub async fn assign_teacher_form(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path((discipline_id, group_id)): Path<(i32, i32)>,
) -> AppResult<Json<AssignTeacherFormResponse>> {
    ensure_permission(&claims, Permission::AssignTeachers)?;
    let (discipline, group) = load_sheet_target(&state, discipline_id, group_id).await?;

    let teachers = TeacherRepository::new(&state.db).find_all().await?;
    let current_teacher_id = GradeSheetRepository::new(&state.db)
        .current_teacher_id(discipline_id, group_id)
        .await?;

    Ok(Json(AssignTeacherFormResponse {
        discipline: discipline.into(),
        group: group.into(),
        teachers: teachers.into_iter().map(Into::into).collect(),
        current_teacher_id,
    }))
}

/// Points every grade row of the group for the discipline at one teacher,
/// creating the rows when none exist yet.
#[utoipa::path(
    post,
    path = "/assign-teacher/{discipline_id}/{group_id}/",
    params(
        ("discipline_id" = i32, Path, description = "Discipline id"),
        ("group_id" = i32, Path, description = "Group id")
    ),
    request_body = AssignTeacherRequest,
    responses(
        (status = 303, description = "Teacher assigned", body = FlashRedirect),
        (status = 400, description = "Discipline has no semester", body = ErrorBody),
        (status = 403, description = "Not allowed to assign teachers", body = ErrorBody),
        (status = 404, description = "Discipline, group or teacher not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Grading"
)]
pub async fn assign_teacher_to_group(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path((discipline_id, group_id)): Path<(i32, i32)>,
    Json(payload): Json<AssignTeacherRequest>,
) -> AppResult<FlashRedirect> {
    ensure_permission(&claims, Permission::AssignTeachers)?;
    let (discipline, _group) = load_sheet_target(&state, discipline_id, group_id).await?;
    let teacher = TeacherRepository::new(&state.db)
        .find_by_id(payload.teacher_id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher", payload.teacher_id))?;

    let affected = match assign_teacher(&state.db, &discipline, group_id, teacher.id).await? {
        Assignment::MissingSemester => {
            return Err(AppError::Validation(format!(
                "Discipline '{}' has no semester",
                discipline.name
            )));
        }
        outcome => outcome.affected(),
    };

    Ok(FlashRedirect::success(
        format!("/directorate/disciplines/{discipline_id}/groups/"),
        format!(
            "Преподаватель {} назначен. Обновлено записей: {affected}.",
            teacher.surname
        ),
    ))
}
