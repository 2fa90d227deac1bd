use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::reconciliation::requests::ReconcileRequest;
use crate::services::MaintenanceService;

// Instância global preguiçosa do serviço de manutenção
static MAINTENANCE_SERVICE: Lazy<MaintenanceService> = Lazy::new(MaintenanceService::new_lazy);

pub async fn reconcile(
    req: HttpRequest,
    data: Option<web::Json<ReconcileRequest>>,
) -> ActixResult<HttpResponse> {
    // corpo ausente = dry-run completo
    let request = data.map(|d| d.into_inner()).unwrap_or_default();
    MAINTENANCE_SERVICE.reconcile(&req, request).await
}

pub fn configure_maintenance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/maintenance")
            .service(web::resource("/reconcile").route(web::post().to(reconcile))),
    );
}
