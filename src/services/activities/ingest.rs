//! Ingestão de atividades
//!
//! Caminho quente do pipeline: anexa o registro à coleção fonte, recomputa
//! a melhor tentativa do par relendo tudo e rederiva a pontuação unificada.
//! Registros inválidos são rejeitados antes de qualquer escrita.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::{error, info, warn};

use super::ActivityService;
use crate::models::activities::entities::RawActivity;
use crate::models::activities::requests::SubmitActivityRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scoring::normalize::normalize_record;
use crate::services::scoring::recompute::{aggregate_student, recompute_pair};

/// Registra uma atividade concluída e atualiza as derivações
/// POST /activities
pub async fn submit_activity(
    service: &ActivityService,
    request: &HttpRequest,
    activity: SubmitActivityRequest,
) -> ActixResult<HttpResponse> {
    let raw = RawActivity {
        student_id: activity.student_id,
        module_id: activity.module_id,
        raw_score: activity.score,
        max_score: activity.max_score,
        completed_at: activity.completed_at.unwrap_or_else(Utc::now),
        source: activity.source,
    };

    // valida antes de persistir; a coleção fonte não recebe lixo novo
    if let Err(e) = normalize_record(&raw) {
        warn!("Rejected activity submission: {}", e);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidRecord,
            format!("Invalid activity record: {e}"),
        )));
    }

    let storage = service.get_storage(request);

    let stored = match storage.append_activity(raw).await {
        Ok(stored) => stored,
        Err(e) => {
            error!("Failed to append activity record: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to store activity record",
                )),
            );
        }
    };

    // recomputa o par e rederiva o documento do aluno
    let result = async {
        recompute_pair(&storage, &stored.student_id, &stored.module_id).await?;
        aggregate_student(&storage, &stored.student_id).await
    }
    .await;

    match result {
        Ok(score) => {
            info!(
                "Activity ingested for student {} module {} (source {})",
                stored.student_id, stored.module_id, stored.source
            );

            let cache = service.get_cache(request);
            cache
                .insert_object(&format!("unified_score:{}", stored.student_id), &score, 0)
                .await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                score,
                "Activity recorded successfully",
            )))
        }
        Err(e) => {
            // o registro bruto já está salvo; a recomputação pode ser refeita
            error!(
                "Activity stored but recompute failed for student {} module {}: {}",
                stored.student_id, stored.module_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Activity stored but score recomputation failed; retry recompute",
                )),
            )
        }
    }
}
