use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{group, specialty, student};
use crate::repositories::NewStudent;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupResponse {
    pub id: i32,
    pub name: String,
    pub admission_year: i32,
    pub specialty_id: i32,
    /// `"<code> <name>"` of the specialty, when loaded.
    pub specialty: Option<String>,
}

impl GroupResponse {
    pub fn with_specialty(model: group::Model, specialty: Option<&specialty::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            admission_year: model.admission_year,
            specialty_id: model.specialty_id,
            specialty: specialty.map(specialty::Model::label),
        }
    }
}

impl From<group::Model> for GroupResponse {
    fn from(model: group::Model) -> Self {
        Self::with_specialty(model, None)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub group_id: i32,
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            group_id: model.group_id,
            surname: model.surname,
            first_name: model.first_name,
            patronymic: model.patronymic,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub specialty_id: i32,
    #[schema(example = "ИСИб-25-1")]
    pub name: String,
    #[schema(example = 2025)]
    pub admission_year: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "Иванов")]
    pub surname: String,
    #[schema(example = "Иван")]
    pub first_name: String,
    #[schema(example = "Иванович")]
    #[serde(default)]
    pub patronymic: String,
}

impl From<CreateStudentRequest> for NewStudent {
    fn from(request: CreateStudentRequest) -> Self {
        Self {
            surname: request.surname.trim().to_string(),
            first_name: request.first_name.trim().to_string(),
            patronymic: request.patronymic.trim().to_string(),
        }
    }
}

/// A group with its students, ordered by surname.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupStudentsResponse {
    pub group: GroupResponse,
    pub students: Vec<StudentResponse>,
}
