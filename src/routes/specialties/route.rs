use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use super::dto::{SpecialtyAction, SpecialtyResponse};
use crate::error::{AppError, AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Permission, ensure_permission};
use crate::repositories::{SpecialtyRepository, SpecialtyUpdate};
use crate::routes::flash::FlashRedirect;
use crate::state::AppState;

const SPECIALTIES_PATH: &str = "/specialties/";

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        SPECIALTIES_PATH,
        get(list_specialties).post(change_specialties),
    )
}

fn required(value: String, field: &str) -> AppResult<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

#[utoipa::path(
    get,
    path = "/specialties/",
    responses(
        (status = 200, description = "Specialties ordered by code", body = Vec<SpecialtyResponse>),
        (status = 403, description = "Not registrar staff", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_specialties(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> AppResult<Json<Vec<SpecialtyResponse>>> {
    ensure_permission(&claims, Permission::ManageCatalog)?;

    let specialties = SpecialtyRepository::new(&state.db).find_all().await?;
    Ok(Json(specialties.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/specialties/",
    request_body = SpecialtyAction,
    responses(
        (status = 303, description = "Change applied", body = FlashRedirect),
        (status = 400, description = "Missing code or name", body = ErrorBody),
        (status = 403, description = "Not registrar staff", body = ErrorBody),
        (status = 404, description = "Specialty not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn change_specialties(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(action): Json<SpecialtyAction>,
) -> AppResult<FlashRedirect> {
    ensure_permission(&claims, Permission::ManageCatalog)?;
    let repo = SpecialtyRepository::new(&state.db);

    let redirect = match action {
        SpecialtyAction::AddSpecialty { code, name } => {
            let code = required(code, "code")?;
            let name = required(name, "name")?;
            let created = repo.create(code, name).await?;
            tracing::info!(specialty_id = created.id, "Specialty created");
            FlashRedirect::success(
                SPECIALTIES_PATH,
                format!("Специальность '{}' добавлена.", created.name),
            )
        }
        SpecialtyAction::EditSpecialty {
            specialty_id,
            code,
            name,
        } => {
            let specialty = repo
                .find_by_id(specialty_id)
                .await?
                .ok_or_else(|| AppError::not_found("Specialty", specialty_id))?;
            let old_name = specialty.name.clone();
            let updates = SpecialtyUpdate {
                code: Some(required(code, "code")?),
                name: Some(required(name, "name")?),
            };
            repo.update(specialty, updates).await?;
            FlashRedirect::info(
                SPECIALTIES_PATH,
                format!("Специальность '{old_name}' изменена."),
            )
        }
        SpecialtyAction::DeleteSpecialty { specialty_id } => {
            let specialty = repo
                .find_by_id(specialty_id)
                .await?
                .ok_or_else(|| AppError::not_found("Specialty", specialty_id))?;
            let name = specialty.name.clone();
            repo.delete(specialty).await?;
            tracing::info!(specialty_id, "Specialty deleted");
            FlashRedirect::warning(SPECIALTIES_PATH, format!("Специальность '{name}' удалена."))
        }
    };

    Ok(redirect)
}
