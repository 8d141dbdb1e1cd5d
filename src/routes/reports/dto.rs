use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::routes::disciplines::dto::DisciplineResponse;
use crate::routes::groups::dto::{GroupResponse, StudentResponse};
use crate::routes::specialties::dto::SpecialtyResponse;
use crate::services::reports::{ControlForms, CourseReport};

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentCardResponse {
    pub student: StudentResponse,
    pub group: Option<GroupResponse>,
    pub specialty: Option<SpecialtyResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudyPlanSemester {
    pub number: i32,
    pub disciplines: Vec<DisciplineResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SemesterQuery {
    /// Semester number; missing or malformed values read as 1.
    pub semester: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ControlFormsResponse {
    pub semester: i32,
    /// Keyed by `"<code> <name>"` of the specialty.
    pub specialties: BTreeMap<String, ControlForms>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurriculumSpecialty {
    pub specialty: SpecialtyResponse,
    pub disciplines: Vec<DisciplineResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurriculumResponse {
    pub title: String,
    pub specialties: Vec<CurriculumSpecialty>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseSelectionResponse {
    pub student: StudentResponse,
    pub courses: Vec<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseQuery {
    /// Course number; missing or malformed values read as 1.
    pub course: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentReportResponse {
    #[serde(flatten)]
    pub card: StudentCardResponse,
    pub report: CourseReport,
    pub generated_on: NaiveDate,
}
