use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListParams, UpdateEnrollmentStatusRequest,
};
use crate::services::EnrollmentService;
use crate::utils::{SafeClassId, SafeStudentId};

// Instância global preguiçosa do serviço de matrículas
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn create_enrollment(
    req: HttpRequest,
    class_id: SafeClassId,
    data: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_enrollment(&req, class_id.0, data.into_inner())
        .await
}

pub async fn update_enrollment_status(
    req: HttpRequest,
    class_id: SafeClassId,
    student_id: SafeStudentId,
    data: web::Json<UpdateEnrollmentStatusRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .update_enrollment_status(&req, class_id.0, student_id.0, data.into_inner())
        .await
}

pub async fn list_enrollments(
    req: HttpRequest,
    class_id: SafeClassId,
    params: web::Query<EnrollmentListParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(&req, class_id.0, params.into_inner())
        .await
}

pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .service(
                web::resource("/{class_id}/enrollments")
                    .route(web::post().to(create_enrollment))
                    .route(web::get().to(list_enrollments)),
            )
            .service(
                web::resource("/{class_id}/enrollments/{student_id}")
                    .route(web::patch().to(update_enrollment_status)),
            ),
    );
}
