use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::{discipline, semester};
use crate::routes::specialties::dto::SpecialtyResponse;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SemesterResponse {
    pub id: i32,
    pub number: i32,
}

impl From<semester::Model> for SemesterResponse {
    fn from(model: semester::Model) -> Self {
        Self {
            id: model.id,
            number: model.number,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DisciplineResponse {
    pub id: i32,
    pub name: String,
    pub exam_type: String,
    pub hours: i32,
    pub specialty_id: Option<i32>,
    pub semester_id: Option<i32>,
    pub semester_number: Option<i32>,
}

impl DisciplineResponse {
    pub fn with_semester(model: discipline::Model, semester: Option<&semester::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            exam_type: model.exam_type,
            hours: model.hours,
            specialty_id: model.specialty_id,
            semester_id: model.semester_id,
            semester_number: semester.map(|s| s.number),
        }
    }
}

impl From<discipline::Model> for DisciplineResponse {
    fn from(model: discipline::Model) -> Self {
        Self::with_semester(model, None)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DisciplineFilter {
    /// Restricts the list to one specialty.
    pub specialty: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DisciplineListResponse {
    pub title: String,
    pub specialty: Option<SpecialtyResponse>,
    pub disciplines: Vec<DisciplineResponse>,
    pub semesters: Vec<SemesterResponse>,
}

/// Hours as a form sends them: a number, a numeric string or anything else,
/// which is kept so validation can reject it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HoursInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl HoursInput {
    pub fn value(&self) -> Option<i32> {
        match self {
            HoursInput::Number(n) => i32::try_from(*n).ok(),
            HoursInput::Text(s) => s.trim().parse().ok(),
            HoursInput::Other(_) => None,
        }
    }
}

/// Form submitted on the disciplines page; the key names the action.
/// A missing or unreadable `hours` counts as zero and is rejected.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DisciplineAction {
    AddDiscipline {
        #[schema(example = "Математика")]
        name: String,
        #[schema(example = "Экзамен")]
        exam_type: String,
        #[schema(value_type = Option<i32>, example = 144)]
        hours: Option<HoursInput>,
        semester_id: Option<i32>,
    },
    EditDiscipline {
        discipline_id: i32,
        name: String,
        exam_type: String,
        #[schema(value_type = Option<i32>)]
        hours: Option<HoursInput>,
        semester_id: Option<i32>,
    },
    DeleteDiscipline {
        discipline_id: i32,
    },
}
