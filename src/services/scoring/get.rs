use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use crate::cache::CacheResult;
use crate::models::scores::entities::UnifiedScore;
use crate::models::scores::responses::ModuleBestScoreListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::ScoringService;

/// Pontuação unificada de um aluno
/// GET /students/{student_id}/score
///
/// Em falha do storage, serve a última cópia cacheada em vez de 500.
pub async fn get_unified_score(
    service: &ScoringService,
    request: &HttpRequest,
    student_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let cache_key = format!("unified_score:{student_id}");

    match storage.get_unified_score(&student_id).await {
        Ok(Some(score)) => {
            cache.insert_object(&cache_key, &score, 0).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                score,
                "Unified score retrieved successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScoreNotFound,
            "No unified score for this student",
        ))),
        Err(err) => {
            error!("Failed to retrieve unified score for {}: {}", student_id, err);
            match cache.get_object::<UnifiedScore>(&cache_key).await {
                CacheResult::Found(score) => {
                    warn!("Serving cached unified score for {} after storage failure", student_id);
                    Ok(HttpResponse::Ok().json(ApiResponse::success(
                        score,
                        "Unified score retrieved from cache (possibly stale)",
                    )))
                }
                _ => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to retrieve unified score",
                    )),
                ),
            }
        }
    }
}

/// Melhores tentativas por módulo de um aluno
/// GET /students/{student_id}/modules
pub async fn list_module_best_scores(
    service: &ScoringService,
    request: &HttpRequest,
    student_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_module_best_scores(&student_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleBestScoreListResponse { student_id, items },
            "Module best scores retrieved successfully",
        ))),
        Err(err) => {
            error!("Failed to list module best scores for {}: {}", student_id, err);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve module best scores",
                )),
            )
        }
    }
}
