use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Enrollment;
use crate::models::PaginationInfo;

// Roster paginado de uma turma
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListResponse {
    pub items: Vec<Enrollment>,
    pub pagination: PaginationInfo,
}
