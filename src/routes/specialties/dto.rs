use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::specialty;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpecialtyResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl From<specialty::Model> for SpecialtyResponse {
    fn from(model: specialty::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
        }
    }
}

/// Form submitted on the specialties page; the key names the action.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpecialtyAction {
    AddSpecialty {
        #[schema(example = "09.03.01")]
        code: String,
        #[schema(example = "Информатика и вычислительная техника")]
        name: String,
    },
    EditSpecialty {
        specialty_id: i32,
        code: String,
        name: String,
    },
    DeleteSpecialty {
        specialty_id: i32,
    },
}
