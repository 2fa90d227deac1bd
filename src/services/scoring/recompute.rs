//! Recomputação de melhores tentativas e pontuação unificada
//!
//! Orquestra: coleções fonte → normalizador → redutor → agregador →
//! sobrescrita do documento. Reexecutável a qualquer momento; escrever o
//! mesmo valor de novo é inócuo.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::ScoringService;
use super::aggregate::aggregate_scores;
use super::best_attempt::{merge_with_stored, reduce_attempts};
use super::normalize::normalize_record;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::activities::entities::ActivityRecord;
use crate::models::reconciliation::entities::ReductionAnomaly;
use crate::models::scores::entities::UnifiedScore;
use crate::models::scores::responses::RecomputeResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// Resultado interno de uma recomputação
pub struct RecomputeOutcome {
    pub score: UnifiedScore,
    pub anomalies: Vec<ReductionAnomaly>,
    pub skipped_records: i64,
}

/// Recomputa a melhor tentativa de um único par (aluno, módulo)
///
/// Usado pela ingestão: o conjunto completo de registros do par é relido das
/// coleções fonte, então chegadas concorrentes convergem para o mesmo valor.
pub async fn recompute_pair(
    storage: &Arc<dyn Storage>,
    student_id: &str,
    module_id: &str,
) -> Result<(Option<ReductionAnomaly>, i64)> {
    let raw_records = storage
        .list_activities_for_pair(student_id, module_id)
        .await?;

    let mut skipped = 0i64;
    let records: Vec<ActivityRecord> = raw_records
        .iter()
        .filter_map(|raw| match normalize_record(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping invalid activity record: {}", e);
                skipped += 1;
                None
            }
        })
        .collect();

    let Some(computed) = reduce_attempts(&records) else {
        return Ok((None, skipped));
    };

    let stored = storage.get_module_best_score(student_id, module_id).await?;
    let (merged, anomaly) = merge_with_stored(computed, stored.as_ref());

    if let Some(anomaly) = &anomaly {
        warn!(
            "Reduction anomaly for student {} module {}: stored {} > computed {}, keeping stored value",
            anomaly.student_id, anomaly.module_id, anomaly.stored_best, anomaly.computed_best
        );
    }

    storage.upsert_module_best_score(&merged).await?;

    Ok((anomaly, skipped))
}

/// Recomputa todas as melhores tentativas e a pontuação unificada de um aluno
pub async fn recompute_student(
    storage: &Arc<dyn Storage>,
    student_id: &str,
) -> Result<RecomputeOutcome> {
    let raw_records = storage.list_activities_for_student(student_id).await?;

    // normaliza, descartando registros inválidos sem abortar o lote
    let mut skipped = 0i64;
    let mut by_module: BTreeMap<String, Vec<ActivityRecord>> = BTreeMap::new();
    for raw in &raw_records {
        match normalize_record(raw) {
            Ok(record) => by_module.entry(record.module_id.clone()).or_default().push(record),
            Err(e) => {
                warn!("Skipping invalid activity record: {}", e);
                skipped += 1;
            }
        }
    }

    // reduz módulo a módulo, respeitando a não-regressão
    let mut anomalies = Vec::new();
    for (module_id, records) in &by_module {
        let Some(computed) = reduce_attempts(records) else {
            continue;
        };
        let stored = storage.get_module_best_score(student_id, module_id).await?;
        let (merged, anomaly) = merge_with_stored(computed, stored.as_ref());

        if let Some(anomaly) = anomaly {
            warn!(
                "Reduction anomaly for student {} module {}: stored {} > computed {}, keeping stored value",
                anomaly.student_id, anomaly.module_id, anomaly.stored_best, anomaly.computed_best
            );
            anomalies.push(anomaly);
        }

        storage.upsert_module_best_score(&merged).await?;
    }

    aggregate_student(storage, student_id).await.map(|score| RecomputeOutcome {
        score,
        anomalies,
        skipped_records: skipped,
    })
}

/// Rederiva e sobrescreve o `UnifiedScore` de um aluno
///
/// Lê as melhores tentativas persistidas (fonte de verdade, já monotônicas)
/// e substitui o documento por inteiro.
pub async fn aggregate_student(
    storage: &Arc<dyn Storage>,
    student_id: &str,
) -> Result<UnifiedScore> {
    let config = AppConfig::get();

    let best_scores = storage.list_module_best_scores(student_id).await?;
    let modules = storage.list_course_modules().await?;
    let class_id = storage
        .get_active_enrollment_for_student(student_id)
        .await?
        .map(|e| e.class_id);

    let unified = aggregate_scores(
        student_id,
        class_id,
        &best_scores,
        &modules,
        config.scoring.passing_threshold,
        config.scoring.module_max_score,
    );

    storage.put_unified_score(&unified).await
}

/// Recomputação completa de um aluno
/// POST /students/{student_id}/recompute
pub async fn recompute_student_handler(
    service: &ScoringService,
    request: &HttpRequest,
    student_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match recompute_student(&storage, &student_id).await {
        Ok(outcome) => {
            info!(
                "Recomputed unified score for student {} (skipped {} invalid records, {} anomalies)",
                student_id,
                outcome.skipped_records,
                outcome.anomalies.len()
            );

            // atualiza a cópia de fallback
            let cache = service.get_cache(request);
            cache
                .insert_object(&format!("unified_score:{student_id}"), &outcome.score, 0)
                .await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RecomputeResponse {
                    score: outcome.score,
                    skipped_records: outcome.skipped_records,
                    anomalies: outcome.anomalies,
                },
                "Unified score recomputed successfully",
            )))
        }
        Err(e) => {
            error!("Failed to recompute student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to recompute unified score: {e}"),
                )),
            )
        }
    }
}
