use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use super::dto::{
    ControlFormsResponse, CourseQuery, CourseSelectionResponse, CurriculumResponse,
    CurriculumSpecialty, SemesterQuery, StudentCardResponse, StudentReportResponse,
    StudyPlanSemester,
};
use crate::config::COURSE_COUNT;
use crate::error::{AppError, AppResult, ErrorBody};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{Permission, ensure_permission};
use crate::repositories::{SemesterRepository, SpecialtyRepository, StudentRepository};
use crate::routes::groups::dto::GroupResponse;
use crate::services::provisioning::today;
use crate::services::reports::{control_forms, course_report, number_or_first};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/reports/student-card/{student_id}/", get(student_card))
        .route("/reports/study-plan/", get(study_plan))
        .route("/control-forms/", get(control_forms_doc))
        .route("/curriculum-doc/", get(curriculum_doc))
        .route(
            "/directorate/students/{student_id}/course-selection/",
            get(course_selection),
        )
        .route("/directorate/students/{student_id}/report/", get(student_report))
}

async fn load_student_card(state: &AppState, student_id: i32) -> AppResult<StudentCardResponse> {
    let (student, group) = StudentRepository::new(&state.db)
        .find_with_group(student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", student_id))?;

    let specialty = match &group {
        Some(group) => {
            SpecialtyRepository::new(&state.db)
                .find_by_id(group.specialty_id)
                .await?
        }
        None => None,
    };

    Ok(StudentCardResponse {
        student: student.into(),
        group: group.map(|group| GroupResponse::with_specialty(group, specialty.as_ref())),
        specialty: specialty.map(Into::into),
    })
}

#[utoipa::path(
    get,
    path = "/reports/student-card/{student_id}/",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student with group and specialty", body = StudentCardResponse),
        (status = 403, description = "Not registrar or directorate staff", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn student_card(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(student_id): Path<i32>,
) -> AppResult<Json<StudentCardResponse>> {
    ensure_permission(&claims, Permission::ViewStudentCard)?;
    Ok(Json(load_student_card(&state, student_id).await?))
}

#[utoipa::path(
    get,
    path = "/reports/study-plan/",
    responses(
        (status = 200, description = "Disciplines per semester", body = Vec<StudyPlanSemester>),
        (status = 403, description = "Not registrar staff", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn study_plan(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> AppResult<Json<Vec<StudyPlanSemester>>> {
    ensure_permission(&claims, Permission::ManageCatalog)?;

    let plan = SemesterRepository::new(&state.db)
        .find_all_with_disciplines()
        .await?
        .into_iter()
        .map(|(semester, disciplines)| StudyPlanSemester {
            number: semester.number,
            disciplines: disciplines.into_iter().map(Into::into).collect(),
        })
        .collect();
    Ok(Json(plan))
}

#[utoipa::path(
    get,
    path = "/control-forms/",
    params(SemesterQuery),
    responses(
        (status = 200, description = "Exams, tests and course works per specialty", body = ControlFormsResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn control_forms_doc(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Query(query): Query<SemesterQuery>,
) -> AppResult<Json<ControlFormsResponse>> {
    let semester = number_or_first(query.semester.as_deref());
    let specialties = control_forms(&state.db, semester).await?;
    Ok(Json(ControlFormsResponse {
        semester,
        specialties,
    }))
}

#[utoipa::path(
    get,
    path = "/curriculum-doc/",
    responses(
        (status = 200, description = "Every specialty with its disciplines", body = CurriculumResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn curriculum_doc(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
) -> AppResult<Json<CurriculumResponse>> {
    let specialties = SpecialtyRepository::new(&state.db)
        .find_all_with_disciplines()
        .await?
        .into_iter()
        .map(|(specialty, disciplines)| CurriculumSpecialty {
            specialty: specialty.into(),
            disciplines: disciplines.into_iter().map(Into::into).collect(),
        })
        .collect();

    Ok(Json(CurriculumResponse {
        title: "Учебный план ИРНИТУ".to_string(),
        specialties,
    }))
}

#[utoipa::path(
    get,
    path = "/directorate/students/{student_id}/course-selection/",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Courses a report can be built for", body = CourseSelectionResponse),
        (status = 404, description = "Student not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn course_selection(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Path(student_id): Path<i32>,
) -> AppResult<Json<CourseSelectionResponse>> {
    let student = StudentRepository::new(&state.db)
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| AppError::not_found("Student", student_id))?;

    Ok(Json(CourseSelectionResponse {
        student: student.into(),
        courses: (1..=COURSE_COUNT).collect(),
    }))
}

/// Grades of one course (two semesters) and their average.
#[utoipa::path(
    get,
    path = "/directorate/students/{student_id}/report/",
    params(("student_id" = i32, Path, description = "Student id"), CourseQuery),
    responses(
        (status = 200, description = "Course report", body = StudentReportResponse),
        (status = 404, description = "Student not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn student_report(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Path(student_id): Path<i32>,
    Query(query): Query<CourseQuery>,
) -> AppResult<Json<StudentReportResponse>> {
    let card = load_student_card(&state, student_id).await?;
    let course = number_or_first(query.course.as_deref());
    let report = course_report(&state.db, student_id, course).await?;

    Ok(Json(StudentReportResponse {
        card,
        report,
        generated_on: today(),
    }))
}
