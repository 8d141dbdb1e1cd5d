use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::{get, post},
};

use super::dto::{CreateGroupRequest, CreateStudentRequest, GroupResponse, GroupStudentsResponse};
use crate::error::{AppError, AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Permission, ensure_permission};
use crate::repositories::{GroupRepository, NewStudent, SpecialtyRepository, StudentRepository};
use crate::routes::flash::FlashRedirect;
use crate::services::enrollment::{enroll_student, import_students, parse_roster};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/groups/", get(list_groups).post(create_group))
        .route("/groups/select/", get(select_group))
        .route(
            "/groups/{group_id}/students/",
            get(list_group_students).post(add_student),
        )
        .route("/groups/{group_id}/students/import", post(import_roster))
        .route("/groups/{group_id}/grades/", get(grading_window))
}

pub fn students_path(group_id: i32) -> String {
    format!("/groups/{group_id}/students/")
}

async fn group_with_students(state: &AppState, group_id: i32) -> AppResult<GroupStudentsResponse> {
    let group = GroupRepository::new(&state.db)
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| AppError::not_found("Group", group_id))?;
    let specialty = SpecialtyRepository::new(&state.db)
        .find_by_id(group.specialty_id)
        .await?;
    let students = StudentRepository::new(&state.db).find_by_group(group_id).await?;

    Ok(GroupStudentsResponse {
        group: GroupResponse::with_specialty(group, specialty.as_ref()),
        students: students.into_iter().map(Into::into).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/groups/",
    responses(
        (status = 200, description = "Groups with their specialty", body = Vec<GroupResponse>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
pub async fn list_groups(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
) -> AppResult<Json<Vec<GroupResponse>>> {
    let groups = GroupRepository::new(&state.db)
        .find_all_with_specialty()
        .await?
        .into_iter()
        .map(|(group, specialty)| GroupResponse::with_specialty(group, specialty.as_ref()))
        .collect();
    Ok(Json(groups))
}

#[utoipa::path(
    post,
    path = "/groups/",
    request_body = CreateGroupRequest,
    responses(
        (status = 303, description = "Group created", body = FlashRedirect),
        (status = 400, description = "Missing group name", body = ErrorBody),
        (status = 403, description = "Not allowed to manage enrolment", body = ErrorBody),
        (status = 404, description = "Specialty not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
pub async fn create_group(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateGroupRequest>,
) -> AppResult<FlashRedirect> {
    ensure_permission(&claims, Permission::ManageEnrollment)?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Group name must not be empty".to_string()));
    }
    SpecialtyRepository::new(&state.db)
        .find_by_id(payload.specialty_id)
        .await?
        .ok_or_else(|| AppError::not_found("Specialty", payload.specialty_id))?;

    let group = GroupRepository::new(&state.db)
        .create(payload.specialty_id, name, payload.admission_year)
        .await?;

    tracing::info!(group_id = group.id, "Group created");
    Ok(FlashRedirect::success(
        "/groups/",
        format!("Группа '{}' создана.", group.name),
    ))
}

#[utoipa::path(
    get,
    path = "/groups/select/",
    responses(
        (status = 200, description = "Every group, for choosing one", body = Vec<GroupResponse>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
pub async fn select_group(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
) -> AppResult<Json<Vec<GroupResponse>>> {
    let groups = GroupRepository::new(&state.db).find_all().await?;
    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/students/",
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Students of the group", body = GroupStudentsResponse),
        (status = 404, description = "Group not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
pub async fn list_group_students(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Path(group_id): Path<i32>,
) -> AppResult<Json<GroupStudentsResponse>> {
    Ok(Json(group_with_students(&state, group_id).await?))
}

/// Enrolls a student; their grade rows are created in the same transaction.
#[utoipa::path(
    post,
    path = "/groups/{group_id}/students/",
    params(("group_id" = i32, Path, description = "Group id")),
    request_body = CreateStudentRequest,
    responses(
        (status = 303, description = "Student enrolled", body = FlashRedirect),
        (status = 400, description = "Missing surname or first name", body = ErrorBody),
        (status = 403, description = "Not allowed to manage enrolment", body = ErrorBody),
        (status = 404, description = "Group not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
pub async fn add_student(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(group_id): Path<i32>,
    Json(payload): Json<CreateStudentRequest>,
) -> AppResult<FlashRedirect> {
    ensure_permission(&claims, Permission::ManageEnrollment)?;

    GroupRepository::new(&state.db)
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| AppError::not_found("Group", group_id))?;

    let new_student: NewStudent = payload.into();
    if new_student.surname.is_empty() || new_student.first_name.is_empty() {
        return Err(AppError::Validation(
            "Surname and first name are required".to_string(),
        ));
    }

    let (student, _) = enroll_student(&state.db, group_id, new_student).await?;

    Ok(FlashRedirect::success(
        students_path(group_id),
        format!("Студент {} добавлен.", student.surname),
    ))
}

/// Enrolls every student of an uploaded CSV roster (`file` field).
#[utoipa::path(
    post,
    path = "/groups/{group_id}/students/import",
    params(("group_id" = i32, Path, description = "Group id")),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Roster imported", body = FlashRedirect),
        (status = 400, description = "Missing or malformed roster", body = ErrorBody),
        (status = 403, description = "Not allowed to manage enrolment", body = ErrorBody),
        (status = 404, description = "Group not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
pub async fn import_roster(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(group_id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<FlashRedirect> {
    ensure_permission(&claims, Permission::ManageEnrollment)?;

    GroupRepository::new(&state.db)
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| AppError::not_found("Group", group_id))?;

    let mut file_data = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
            file_data = Some(data);
        }
    }

    let data = file_data.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    let roster = parse_roster(&data).map_err(|e| AppError::Validation(e.to_string()))?;

    let summary = import_students(&state.db, group_id, roster).await?;

    Ok(FlashRedirect::success(
        students_path(group_id),
        format!(
            "Импортировано студентов: {}. Создано записей ведомостей: {}.",
            summary.students.len(),
            summary.grade_rows
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/grades/",
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group and its students", body = GroupStudentsResponse),
        (status = 403, description = "Not registrar staff or a teacher", body = ErrorBody),
        (status = 404, description = "Group not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Grading"
)]
pub async fn grading_window(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(group_id): Path<i32>,
) -> AppResult<Json<GroupStudentsResponse>> {
    ensure_permission(&claims, Permission::ViewGradingWindow)?;
    Ok(Json(group_with_students(&state, group_id).await?))
}
