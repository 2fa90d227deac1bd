//! Transição de status de matrícula
//!
//! Transições fora do grafo pending→active, pending→removed, active→removed
//! são rejeitadas com 400. Toda transição aceita dispara a correção do
//! contador da turma pelo caminho de reconciliação, nunca por incremento.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::EnrollmentService;
use crate::errors::Result;
use crate::models::enrollments::requests::UpdateEnrollmentStatusRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::rosters::reconcile_roster;
use crate::services::scoring::recompute::aggregate_student;
use crate::storage::Storage;

/// Reconcilia e sobrescreve o contador de uma turma
pub(crate) async fn refresh_class_counter(
    storage: &Arc<dyn Storage>,
    class_id: &str,
) -> Result<i64> {
    let enrollments = storage.list_enrollments_by_class(class_id).await?;
    let reconciliation = reconcile_roster(&enrollments);
    storage
        .set_class_counter(class_id, reconciliation.corrected_count)
        .await?;
    Ok(reconciliation.corrected_count)
}

/// Aplica uma transição de status
/// PATCH /classes/{class_id}/enrollments/{student_id}
pub async fn update_enrollment_status(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: String,
    student_id: String,
    data: UpdateEnrollmentStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let enrollment = match storage.get_enrollment(&class_id, &student_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNotFound,
                "No live enrollment for this student in this class",
            )));
        }
        Err(e) => {
            error!("Failed to load enrollment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load enrollment",
                )),
            );
        }
    };

    if !enrollment.status.can_transition_to(data.status) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            format!(
                "Invalid enrollment transition: {} -> {}",
                enrollment.status, data.status
            ),
        )));
    }

    let updated = match storage
        .update_enrollment_status(enrollment.id, data.status)
        .await
    {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNotFound,
                "Enrollment disappeared during update",
            )));
        }
        Err(e) => {
            error!("Failed to update enrollment status: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to update enrollment status",
                )),
            );
        }
    };

    info!(
        "Enrollment transition: student {} in class {}: {} -> {}",
        updated.student_id, updated.class_id, enrollment.status, updated.status
    );

    // contador e pontuação derivada acompanham o novo roster; falhas aqui
    // não desfazem a transição (o reconciliador noturno corrige depois)
    if let Err(e) = refresh_class_counter(&storage, &class_id).await {
        warn!("Failed to refresh counter for class {}: {}", class_id, e);
    }
    if let Err(e) = aggregate_student(&storage, &student_id).await {
        warn!("Failed to re-aggregate student {}: {}", student_id, e);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Enrollment status updated successfully",
    )))
}
