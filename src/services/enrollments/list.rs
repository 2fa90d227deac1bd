use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EnrollmentService;
use crate::models::enrollments::requests::{EnrollmentListParams, EnrollmentListQuery};
use crate::models::{ApiResponse, ErrorCode};

/// Roster paginado de uma turma, filtro opcional por status
/// GET /classes/{class_id}/enrollments
pub async fn list_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: String,
    params: EnrollmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let query = EnrollmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        status: params.status,
    };

    match storage
        .list_enrollments_with_pagination(&class_id, query)
        .await
    {
        Ok(enrollments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollments,
            "Enrollments retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list enrollments for class {}: {}", class_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve enrollments",
                )),
            )
        }
    }
}
