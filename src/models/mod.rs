//! Modelos de negócio expostos pela API e usados pelos serviços

pub mod activities;
pub mod common;
pub mod enrollments;
pub mod rankings;
pub mod reconciliation;
pub mod scores;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// Momento de início do processo (para diagnóstico)
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Códigos de negócio retornados no envelope da API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    InvalidRecord = 40001,
    InvalidTransition = 40002,

    NotFound = 40400,
    ScoreNotFound = 40401,
    EnrollmentNotFound = 40402,
    ClassNotFound = 40403,

    EnrollmentAlreadyExists = 40900,

    InternalServerError = 50000,
    ReconciliationFailed = 50001,
    RankingUnavailable = 50002,
}
