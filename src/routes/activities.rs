use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::activities::requests::SubmitActivityRequest;
use crate::services::ActivityService;

// Instância global preguiçosa do serviço de atividades
static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);

pub async fn submit_activity(
    req: HttpRequest,
    activity: web::Json<SubmitActivityRequest>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .submit_activity(&req, activity.into_inner())
        .await
}

pub fn configure_activities_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/activities")
            .service(web::resource("").route(web::post().to(submit_activity))),
    );
}
