use axum::{
    Router,
    extract::{Path, State},
    routing::post,
};

use crate::error::{AppError, AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Permission, ensure_permission};
use crate::repositories::StudentRepository;
use crate::routes::flash::FlashRedirect;
use crate::routes::groups::route::students_path;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/students/{student_id}/delete/", post(delete_student))
}

/// Removes a student together with their grade rows.
#[utoipa::path(
    post,
    path = "/students/{student_id}/delete/",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (status = 303, description = "Student deleted", body = FlashRedirect),
        (status = 403, description = "Not allowed to manage enrolment", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(student_id): Path<i32>,
) -> AppResult<FlashRedirect> {
    ensure_permission(&claims, Permission::ManageEnrollment)?;

    let repo = StudentRepository::new(&state.db);
    let student = repo
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", student_id))?;
    let group_id = student.group_id;
    let name = student.short_name();

    repo.delete(student).await?;
    tracing::info!(student_id, group_id, "Student deleted");

    Ok(FlashRedirect::warning(
        students_path(group_id),
        format!("Студент {name} удален."),
    ))
}
