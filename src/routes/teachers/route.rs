use axum::{Json, Router, extract::State, routing::get};

use super::dto::{CreateTeacherRequest, TeacherResponse};
use crate::error::{AppError, AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Permission, ensure_permission};
use crate::repositories::{NewTeacher, TeacherRepository};
use crate::routes::flash::FlashRedirect;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/teachers/", get(list_teachers).post(create_teacher))
}

#[utoipa::path(
    get,
    path = "/teachers/",
    responses(
        (status = 200, description = "Teachers ordered by surname", body = Vec<TeacherResponse>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
) -> AppResult<Json<Vec<TeacherResponse>>> {
    let teachers = TeacherRepository::new(&state.db).find_all().await?;
    Ok(Json(teachers.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/teachers/",
    request_body = CreateTeacherRequest,
    responses(
        (status = 303, description = "Teacher created", body = FlashRedirect),
        (status = 400, description = "Missing surname or first name", body = ErrorBody),
        (status = 403, description = "Not allowed to manage staff", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateTeacherRequest>,
) -> AppResult<FlashRedirect> {
    ensure_permission(&claims, Permission::ManageEnrollment)?;

    let new_teacher: NewTeacher = payload.into();
    if new_teacher.surname.is_empty() || new_teacher.first_name.is_empty() {
        return Err(AppError::Validation(
            "Surname and first name are required".to_string(),
        ));
    }

    let teacher = TeacherRepository::new(&state.db).create(new_teacher).await?;
    tracing::info!(teacher_id = teacher.id, "Teacher created");

    Ok(FlashRedirect::success(
        "/teachers/",
        format!("Преподаватель {} добавлен.", teacher.surname),
    ))
}
