use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::repositories::GradeEntryRow;
use crate::routes::disciplines::dto::DisciplineResponse;
use crate::routes::groups::dto::GroupResponse;
use crate::routes::teachers::dto::TeacherResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeEntryResponse {
    pub discipline: DisciplineResponse,
    pub group: GroupResponse,
    /// False for viewers who may only read the sheet.
    pub can_edit: bool,
    pub rows: Vec<GradeEntryRow>,
}

/// Grade-sheet row id (optionally written `grade_<id>`) to the new grade.
/// Null values leave the row unchanged.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct GradeSubmission(pub HashMap<String, serde_json::Value>);

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignTeacherFormResponse {
    pub discipline: DisciplineResponse,
    pub group: GroupResponse,
    pub teachers: Vec<TeacherResponse>,
    pub current_teacher_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignTeacherRequest {
    pub teacher_id: i32,
}
