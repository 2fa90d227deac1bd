use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::rankings::requests::RankingQueryParams;
use crate::services::RankingService;

// Instância global preguiçosa do serviço de ranking
static RANKING_SERVICE: Lazy<RankingService> = Lazy::new(RankingService::new_lazy);

pub async fn get_ranking(
    req: HttpRequest,
    query: web::Query<RankingQueryParams>,
) -> ActixResult<HttpResponse> {
    RANKING_SERVICE.get_ranking(&req, query.into_inner()).await
}

pub fn configure_rankings_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/rankings").service(web::resource("").route(web::get().to(get_ranking))),
    );
}
