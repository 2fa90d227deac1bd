use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EnrollmentService;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_entity_id;

/// Cria uma matrícula em estado pending
/// POST /classes/{class_id}/enrollments
pub async fn create_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: String,
    data: CreateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(reason) = validate_entity_id(&data.student_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid student_id: {reason}"),
        )));
    }

    let storage = service.get_storage(request);

    // uma matrícula viva (pending ou active) por par (turma, aluno)
    match storage.get_enrollment(&class_id, &data.student_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentAlreadyExists,
                "Student already has a live enrollment in this class",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing enrollment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to check existing enrollment",
                )),
            );
        }
    }

    match storage.create_enrollment(&class_id, &data.student_id).await {
        Ok(enrollment) => {
            info!(
                "Enrollment created: student {} in class {} (pending)",
                enrollment.student_id, enrollment.class_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                "Enrollment created successfully",
            )))
        }
        Err(e) => {
            error!("Failed to create enrollment: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to create enrollment",
                )),
            )
        }
    }
}
