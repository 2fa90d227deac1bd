use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::{error, warn};

use super::RankingService;
use super::build::build_ranking;
use crate::cache::CacheResult;
use crate::errors::Result;
use crate::models::rankings::entities::{GLOBAL_SCOPE, RankingSnapshot, RankingSort};
use crate::models::rankings::requests::RankingQueryParams;
use crate::models::rankings::responses::RankingListResponse;
use crate::models::{ApiResponse, ErrorCode, PaginationInfo};
use crate::storage::Storage;

/// Monta o ranking atual do escopo pedido, sem efeitos colaterais
///
/// A tendência é calculada contra o snapshot persistido; a leitura nunca
/// move a linha de base, então paginar ou recarregar mantém as setas.
async fn build_snapshot(
    storage: &std::sync::Arc<dyn Storage>,
    scope: &str,
    class_id: Option<&str>,
    sort: RankingSort,
) -> Result<RankingSnapshot> {
    let active_ids = storage.list_active_student_ids(class_id).await?;
    let scores = storage.list_unified_scores(&active_ids).await?;
    let previous = storage.get_latest_ranking_snapshot(scope).await?;

    let active_set = active_ids.into_iter().collect();
    let entries = build_ranking(&scores, &active_set, previous.as_ref(), sort);

    Ok(RankingSnapshot {
        scope: scope.to_string(),
        entries,
        taken_at: Utc::now(),
    })
}

/// Recalcula e grava o snapshot de um escopo (linha de base da tendência)
///
/// Chamado pela reconciliação em lote; usa sempre a ordenação padrão,
/// a única que alimenta a tendência.
pub(crate) async fn refresh_snapshot(
    storage: &std::sync::Arc<dyn Storage>,
    scope: &str,
    class_id: Option<&str>,
) -> Result<()> {
    let snapshot = build_snapshot(storage, scope, class_id, RankingSort::TotalScore).await?;
    storage.upsert_ranking_snapshot(&snapshot).await
}

fn paginate(snapshot: RankingSnapshot, query: &RankingQueryParams, stale: bool) -> RankingListResponse {
    let page = query.pagination.page.max(1);
    let size = query.pagination.size.clamp(1, 100);
    let total = snapshot.entries.len() as i64;
    let total_pages = if total == 0 { 0 } else { (total + size - 1) / size };

    let start = ((page - 1) * size) as usize;
    let items = snapshot
        .entries
        .into_iter()
        .skip(start)
        .take(size as usize)
        .collect();

    RankingListResponse {
        scope: snapshot.scope,
        items,
        pagination: PaginationInfo {
            page,
            page_size: size,
            total,
            total_pages,
        },
        generated_at: snapshot.taken_at,
        stale,
    }
}

/// Leaderboard de uma turma ou global
/// GET /rankings
///
/// Em falha do storage, serve o último ranking cacheado marcado como stale.
pub async fn get_ranking(
    service: &RankingService,
    request: &HttpRequest,
    query: RankingQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let scope = query
        .class_id
        .clone()
        .unwrap_or_else(|| GLOBAL_SCOPE.to_string());
    let sort = query.sort.unwrap_or_default();
    let cache_key = format!("ranking:{scope}");

    match build_snapshot(&storage, &scope, query.class_id.as_deref(), sort).await {
        Ok(snapshot) => {
            cache.insert_object(&cache_key, &snapshot, 0).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                paginate(snapshot, &query, false),
                "Ranking retrieved successfully",
            )))
        }
        Err(err) => {
            error!("Failed to build ranking for scope {}: {}", scope, err);
            match cache.get_object::<RankingSnapshot>(&cache_key).await {
                CacheResult::Found(snapshot) => {
                    warn!("Serving cached ranking for scope {} after storage failure", scope);
                    Ok(HttpResponse::Ok().json(ApiResponse::success(
                        paginate(snapshot, &query, true),
                        "Ranking retrieved from cache (possibly stale)",
                    )))
                }
                _ => Ok(
                    HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                        ErrorCode::RankingUnavailable,
                        "Ranking unavailable and no cached copy exists",
                    )),
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::pagination::PaginationQuery;
    use crate::models::rankings::entities::{RankingEntry, Trend};

    fn entry(student_id: &str, position: i64) -> RankingEntry {
        RankingEntry {
            student_id: student_id.to_string(),
            position,
            total_score: 100.0 - position as f64,
            normalized_score: 50.0,
            completed_modules: 1,
            average_score: 50.0,
            trend: Trend::Same,
        }
    }

    fn snapshot(n: i64) -> RankingSnapshot {
        RankingSnapshot {
            scope: GLOBAL_SCOPE.to_string(),
            entries: (1..=n).map(|i| entry(&format!("aluno-{i}"), i)).collect(),
            taken_at: Utc::now(),
        }
    }

    fn query(page: i64, size: i64) -> RankingQueryParams {
        RankingQueryParams {
            pagination: PaginationQuery { page, size },
            class_id: None,
            sort: None,
        }
    }

    #[test]
    fn test_pagination_slices_entries() {
        let response = paginate(snapshot(25), &query(2, 10), false);

        assert_eq!(response.items.len(), 10);
        assert_eq!(response.items[0].position, 11);
        assert_eq!(response.pagination.total, 25);
        assert_eq!(response.pagination.total_pages, 3);
        assert!(!response.stale);
    }

    #[test]
    fn test_pagination_past_the_end_is_empty() {
        let response = paginate(snapshot(5), &query(4, 10), false);
        assert!(response.items.is_empty());
        assert_eq!(response.pagination.total, 5);
    }

    #[test]
    fn test_pagination_clamps_size() {
        let response = paginate(snapshot(3), &query(1, 1000), true);
        assert_eq!(response.pagination.page_size, 100);
        assert!(response.stale);
    }
}
