use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::routes::disciplines::dto::DisciplineResponse;
use crate::routes::groups::dto::{GroupResponse, StudentResponse};

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentSearchQuery {
    /// Part of the surname, matched case-insensitively.
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentSearchRow {
    #[serde(flatten)]
    pub student: StudentResponse,
    pub group: Option<GroupResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentSearchResponse {
    pub query: String,
    pub students: Vec<StudentSearchRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupRosterRow {
    #[serde(flatten)]
    pub group: GroupResponse,
    pub student_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DisciplineGroupsResponse {
    pub discipline: DisciplineResponse,
    pub groups: Vec<GroupResponse>,
}
