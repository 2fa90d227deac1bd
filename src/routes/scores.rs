use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::ScoringService;
use crate::utils::SafeStudentId;

// Instância global preguiçosa do serviço de pontuação
static SCORING_SERVICE: Lazy<ScoringService> = Lazy::new(ScoringService::new_lazy);

pub async fn get_unified_score(
    req: HttpRequest,
    student_id: SafeStudentId,
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE.get_unified_score(&req, student_id.0).await
}

pub async fn list_module_best_scores(
    req: HttpRequest,
    student_id: SafeStudentId,
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE
        .list_module_best_scores(&req, student_id.0)
        .await
}

pub async fn recompute_student(
    req: HttpRequest,
    student_id: SafeStudentId,
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE.recompute_student(&req, student_id.0).await
}

pub fn configure_scores_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .service(web::resource("/{student_id}/score").route(web::get().to(get_unified_score)))
            .service(
                web::resource("/{student_id}/modules")
                    .route(web::get().to(list_module_best_scores)),
            )
            .service(
                web::resource("/{student_id}/recompute").route(web::post().to(recompute_student)),
            ),
    );
}
