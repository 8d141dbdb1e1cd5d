use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::teacher;
use crate::repositories::NewTeacher;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: i32,
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
    pub position: String,
}

impl From<teacher::Model> for TeacherResponse {
    fn from(model: teacher::Model) -> Self {
        Self {
            id: model.id,
            surname: model.surname,
            first_name: model.first_name,
            patronymic: model.patronymic,
            position: model.position,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeacherRequest {
    #[schema(example = "Петров")]
    pub surname: String,
    #[schema(example = "Иван")]
    pub first_name: String,
    #[serde(default)]
    pub patronymic: String,
    #[schema(example = "Доцент")]
    #[serde(default)]
    pub position: String,
}

impl From<CreateTeacherRequest> for NewTeacher {
    fn from(request: CreateTeacherRequest) -> Self {
        Self {
            surname: request.surname.trim().to_string(),
            first_name: request.first_name.trim().to_string(),
            patronymic: request.patronymic.trim().to_string(),
            position: request.position.trim().to_string(),
        }
    }
}
