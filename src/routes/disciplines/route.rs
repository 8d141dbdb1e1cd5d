use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use sea_orm::TransactionTrait;

use super::dto::{
    DisciplineAction, DisciplineFilter, DisciplineListResponse, DisciplineResponse, HoursInput,
};
use crate::error::{AppError, AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Permission, ensure_permission};
use crate::repositories::{
    DisciplineRepository, DisciplineUpdate, NewDiscipline, SemesterRepository,
    SpecialtyRepository,
};
use crate::routes::flash::FlashRedirect;
use crate::services::provisioning::provision_discipline;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        "/disciplines/",
        get(list_disciplines).post(change_disciplines),
    )
}

fn list_path(specialty_id: Option<i32>) -> String {
    match specialty_id {
        Some(id) => format!("/disciplines/?specialty={id}"),
        None => "/disciplines/".to_string(),
    }
}

/// Hours must be a positive number; a missing value counts as zero.
pub fn validate_hours(hours: Option<i32>) -> AppResult<i32> {
    match hours {
        Some(hours) if hours > 0 => Ok(hours),
        _ => Err(AppError::Validation(
            "Количество часов должно быть больше нуля.".to_string(),
        )),
    }
}

async fn ensure_semester(state: &AppState, semester_id: Option<i32>) -> AppResult<()> {
    if let Some(semester_id) = semester_id {
        SemesterRepository::new(&state.db)
            .find_by_id(semester_id)
            .await?
            .ok_or_else(|| AppError::not_found("Semester", semester_id))?;
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/disciplines/",
    params(DisciplineFilter),
    responses(
        (status = 200, description = "Disciplines with their semesters", body = DisciplineListResponse),
        (status = 403, description = "Not registrar staff", body = ErrorBody),
        (status = 404, description = "Specialty not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_disciplines(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(filter): Query<DisciplineFilter>,
) -> AppResult<Json<DisciplineListResponse>> {
    ensure_permission(&claims, Permission::ManageCatalog)?;

    let specialty = match filter.specialty {
        Some(specialty_id) => Some(
            SpecialtyRepository::new(&state.db)
                .find_by_id(specialty_id)
                .await?
                .ok_or_else(|| AppError::not_found("Specialty", specialty_id))?,
        ),
        None => None,
    };

    let title = match &specialty {
        Some(specialty) => format!("Дисциплины: {}", specialty.name),
        None => "Все дисциплины".to_string(),
    };

    let disciplines = DisciplineRepository::new(&state.db)
        .find_with_semester(filter.specialty)
        .await?
        .into_iter()
        .map(|(discipline, semester)| DisciplineResponse::with_semester(discipline, semester.as_ref()))
        .collect();
    let semesters = SemesterRepository::new(&state.db).find_all().await?;

    Ok(Json(DisciplineListResponse {
        title,
        specialty: specialty.map(Into::into),
        disciplines,
        semesters: semesters.into_iter().map(Into::into).collect(),
    }))
}

/// Adds, edits or deletes a discipline. Adding or editing a discipline that
/// has both a specialty and a semester provisions its grade rows.
#[utoipa::path(
    post,
    path = "/disciplines/",
    params(DisciplineFilter),
    request_body = DisciplineAction,
    responses(
        (status = 303, description = "Change applied", body = FlashRedirect),
        (status = 400, description = "Hours must be positive", body = ErrorBody),
        (status = 403, description = "Not registrar staff", body = ErrorBody),
        (status = 404, description = "Discipline, specialty or semester not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn change_disciplines(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(filter): Query<DisciplineFilter>,
    Json(action): Json<DisciplineAction>,
) -> AppResult<FlashRedirect> {
    ensure_permission(&claims, Permission::ManageCatalog)?;
    let redirect_to = list_path(filter.specialty);

    let redirect = match action {
        DisciplineAction::AddDiscipline {
            name,
            exam_type,
            hours,
            semester_id,
        } => {
            let hours = validate_hours(hours.as_ref().and_then(HoursInput::value))?;
            if let Some(specialty_id) = filter.specialty {
                SpecialtyRepository::new(&state.db)
                    .find_by_id(specialty_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Specialty", specialty_id))?;
            }
            ensure_semester(&state, semester_id).await?;

            let txn = state.db.begin().await?;
            let discipline = DisciplineRepository::new(&txn)
                .create(NewDiscipline {
                    name,
                    exam_type,
                    hours,
                    specialty_id: filter.specialty,
                    semester_id,
                })
                .await?;
            let grade_rows = provision_discipline(&txn, &discipline).await?;
            txn.commit().await?;

            tracing::info!(discipline_id = discipline.id, grade_rows, "Discipline created");
            FlashRedirect::success(
                redirect_to,
                format!("Дисциплина '{}' добавлена.", discipline.name),
            )
        }
        DisciplineAction::EditDiscipline {
            discipline_id,
            name,
            exam_type,
            hours,
            semester_id,
        } => {
            let repo = DisciplineRepository::new(&state.db);
            let discipline = repo
                .find_by_id(discipline_id)
                .await?
                .ok_or_else(|| AppError::not_found("Discipline", discipline_id))?;
            let hours = validate_hours(hours.as_ref().and_then(HoursInput::value))?;
            ensure_semester(&state, semester_id).await?;

            let txn = state.db.begin().await?;
            let discipline = DisciplineRepository::new(&txn)
                .update(
                    discipline,
                    DisciplineUpdate {
                        name,
                        exam_type,
                        hours,
                        semester_id,
                    },
                )
                .await?;
            let grade_rows = provision_discipline(&txn, &discipline).await?;
            txn.commit().await?;

            tracing::info!(discipline_id, grade_rows, "Discipline updated");
            FlashRedirect::info(
                redirect_to,
                format!("Дисциплина '{}' обновлена.", discipline.name),
            )
        }
        DisciplineAction::DeleteDiscipline { discipline_id } => {
            let repo = DisciplineRepository::new(&state.db);
            let discipline = repo
                .find_by_id(discipline_id)
                .await?
                .ok_or_else(|| AppError::not_found("Discipline", discipline_id))?;
            let name = discipline.name.clone();
            repo.delete(discipline).await?;
            tracing::info!(discipline_id, "Discipline deleted");
            FlashRedirect::warning(redirect_to, format!("Дисциплина '{name}' удалена."))
        }
    };

    Ok(redirect)
}
