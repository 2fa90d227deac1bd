//! Reconciliação em lote
//!
//! Percorre turmas e alunos em ordem de id (reexecutável de qualquer ponto),
//! isola falhas por entidade e relata tudo em um `ReconciliationSummary`.
//! Com dry_run o lote apenas descreve o que mudaria.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::MaintenanceService;
use super::retry::with_retry;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::activities::entities::ActivityRecord;
use crate::models::reconciliation::entities::{ChangeRecord, CounterDrift, EntityError, ReductionAnomaly};
use crate::models::rankings::entities::GLOBAL_SCOPE;
use crate::models::reconciliation::requests::ReconcileRequest;
use crate::models::reconciliation::responses::ReconciliationSummary;
use crate::models::scores::entities::ModuleBestScore;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::rankings::get::refresh_snapshot;
use crate::services::rosters::{detect_counter_drift, reconcile_roster};
use crate::services::scoring::aggregate::aggregate_scores;
use crate::services::scoring::best_attempt::{merge_with_stored, reduce_attempts};
use crate::services::scoring::normalize::normalize_record;
use crate::storage::Storage;

/// Resultado da reconciliação de uma turma
struct ClassOutcome {
    drift: Option<CounterDrift>,
    duplicates_removed: i64,
    changes: Vec<ChangeRecord>,
}

/// Resultado da reconciliação de um aluno
struct StudentOutcome {
    anomalies: Vec<ReductionAnomaly>,
    changes: Vec<ChangeRecord>,
}

async fn reconcile_class(
    storage: &Arc<dyn Storage>,
    class_id: &str,
    dry_run: bool,
) -> Result<ClassOutcome> {
    let enrollments = storage.list_enrollments_by_class(class_id).await?;
    let reconciliation = reconcile_roster(&enrollments);

    let stored = storage.get_class_counter(class_id).await?;
    let drift = detect_counter_drift(
        class_id,
        stored.map(|c| c.students_count),
        reconciliation.corrected_count,
    );

    let mut changes = Vec::new();

    if let Some(drift) = &drift {
        changes.push(ChangeRecord {
            entity: format!("class:{class_id}"),
            field: "students_count".to_string(),
            old_value: drift.old_count.to_string(),
            new_value: drift.new_count.to_string(),
        });
    }

    let duplicates_removed = reconciliation.duplicate_row_ids.len() as i64;
    if duplicates_removed > 0 {
        for row_id in &reconciliation.duplicate_row_ids {
            changes.push(ChangeRecord {
                entity: format!("enrollment:{row_id}"),
                field: "status".to_string(),
                old_value: "active".to_string(),
                new_value: "removed".to_string(),
            });
        }
        if !dry_run {
            storage
                .mark_enrollments_removed(&reconciliation.duplicate_row_ids)
                .await?;
        }
    }

    Ok(ClassOutcome {
        drift,
        duplicates_removed,
        changes,
    })
}

async fn reconcile_student(
    storage: &Arc<dyn Storage>,
    student_id: &str,
    dry_run: bool,
) -> Result<StudentOutcome> {
    let config = AppConfig::get();

    let raw_records = storage.list_activities_for_student(student_id).await?;

    let mut by_module: BTreeMap<String, Vec<ActivityRecord>> = BTreeMap::new();
    for raw in &raw_records {
        match normalize_record(raw) {
            Ok(record) => by_module.entry(record.module_id.clone()).or_default().push(record),
            Err(e) => warn!("Skipping invalid activity record: {}", e),
        }
    }

    // parte dos valores persistidos e sobrepõe as reduções recomputadas
    let mut bests: BTreeMap<String, ModuleBestScore> = storage
        .list_module_best_scores(student_id)
        .await?
        .into_iter()
        .map(|b| (b.module_id.clone(), b))
        .collect();

    let mut anomalies = Vec::new();
    let mut changes = Vec::new();

    for (module_id, records) in &by_module {
        let Some(computed) = reduce_attempts(records) else {
            continue;
        };
        let (merged, anomaly) = merge_with_stored(computed, bests.get(module_id));
        if let Some(anomaly) = anomaly {
            anomalies.push(anomaly);
        }

        let changed = bests
            .get(module_id)
            .map(|stored| stored != &merged)
            .unwrap_or(true);
        if changed {
            changes.push(ChangeRecord {
                entity: format!("best_score:{student_id}:{module_id}"),
                field: "best_score".to_string(),
                old_value: bests
                    .get(module_id)
                    .map(|b| b.best_score.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                new_value: merged.best_score.to_string(),
            });
            if !dry_run {
                storage.upsert_module_best_score(&merged).await?;
            }
        }
        bests.insert(module_id.clone(), merged);
    }

    let modules = storage.list_course_modules().await?;
    let class_id = storage
        .get_active_enrollment_for_student(student_id)
        .await?
        .map(|e| e.class_id);

    let best_list: Vec<ModuleBestScore> = bests.into_values().collect();
    let unified = aggregate_scores(
        student_id,
        class_id,
        &best_list,
        &modules,
        config.scoring.passing_threshold,
        config.scoring.module_max_score,
    );

    let stored_unified = storage.get_unified_score(student_id).await?;
    if stored_unified.as_ref() != Some(&unified) {
        changes.push(ChangeRecord {
            entity: format!("unified_score:{student_id}"),
            field: "total_score".to_string(),
            old_value: stored_unified
                .map(|s| s.total_score.to_string())
                .unwrap_or_else(|| "none".to_string()),
            new_value: unified.total_score.to_string(),
        });
        if !dry_run {
            storage.put_unified_score(&unified).await?;
        }
    }

    Ok(StudentOutcome { anomalies, changes })
}

/// Executa a reconciliação em lote
pub async fn run_reconciliation(
    storage: &Arc<dyn Storage>,
    request: ReconcileRequest,
) -> Result<ReconciliationSummary> {
    let config = AppConfig::get();
    let max_retries = config.maintenance.max_retries.max(1);
    let backoff = config.maintenance.backoff_base_ms;

    let mut summary = ReconciliationSummary::new(request.dry_run);

    // turmas primeiro: o ranking depende do roster corrigido
    let mut class_ids = match request.classes {
        Some(ids) => ids,
        None => storage.list_class_ids().await?,
    };
    class_ids.sort_unstable();
    class_ids.dedup();

    let mut counter_corrections: Vec<(String, i64)> = Vec::new();

    for class_id in &class_ids {
        summary.processed += 1;
        let result = with_retry(&format!("reconcile class {class_id}"), max_retries, backoff, || {
            reconcile_class(storage, class_id, request.dry_run)
        })
        .await;

        match result {
            Ok(outcome) => {
                summary.succeeded += 1;
                summary.duplicates_removed += outcome.duplicates_removed;
                summary.changes.extend(outcome.changes);
                if let Some(drift) = outcome.drift {
                    info!(
                        "Counter drift in class {}: {} -> {}",
                        drift.class_id, drift.old_count, drift.new_count
                    );
                    counter_corrections.push((drift.class_id.clone(), drift.new_count));
                    summary.drifts.push(drift);
                }
            }
            Err(e) => {
                error!("Reconciliation failed for class {}: {}", class_id, e);
                summary.failed += 1;
                summary.errors.push(EntityError {
                    entity: format!("class:{class_id}"),
                    error: e.to_string(),
                });
            }
        }
    }

    // contadores corrigidos de uma vez só, em transação única
    if !request.dry_run && !counter_corrections.is_empty() {
        let result = with_retry("apply counter corrections", max_retries, backoff, || {
            storage.set_class_counters(&counter_corrections)
        })
        .await;

        if let Err(e) = result {
            error!("Failed to apply counter corrections: {}", e);
            summary.failed += 1;
            summary.errors.push(EntityError {
                entity: "class_counters:batch".to_string(),
                error: e.to_string(),
            });
        }
    }

    let mut student_ids = match request.students {
        Some(ids) => ids,
        None => storage.list_all_student_ids().await?,
    };
    student_ids.sort_unstable();
    student_ids.dedup();

    for student_id in &student_ids {
        summary.processed += 1;
        let result = with_retry(
            &format!("reconcile student {student_id}"),
            max_retries,
            backoff,
            || reconcile_student(storage, student_id, request.dry_run),
        )
        .await;

        match result {
            Ok(outcome) => {
                summary.succeeded += 1;
                summary.anomalies.extend(outcome.anomalies);
                summary.changes.extend(outcome.changes);
            }
            Err(e) => {
                error!("Reconciliation failed for student {}: {}", student_id, e);
                summary.failed += 1;
                summary.errors.push(EntityError {
                    entity: format!("student:{student_id}"),
                    error: e.to_string(),
                });
            }
        }
    }

    // linhas de base da tendência: um snapshot por escopo, renovado aqui
    // (a leitura do ranking nunca grava)
    if !request.dry_run {
        let mut scopes: Vec<(String, Option<String>)> = vec![(GLOBAL_SCOPE.to_string(), None)];
        scopes.extend(
            class_ids
                .iter()
                .map(|id| (id.clone(), Some(id.clone()))),
        );

        for (scope, class_id) in &scopes {
            let result = with_retry(
                &format!("refresh ranking snapshot {scope}"),
                max_retries,
                backoff,
                || refresh_snapshot(storage, scope, class_id.as_deref()),
            )
            .await;

            if let Err(e) = result {
                error!("Failed to refresh ranking snapshot for {}: {}", scope, e);
                summary.failed += 1;
                summary.errors.push(EntityError {
                    entity: format!("ranking_snapshot:{scope}"),
                    error: e.to_string(),
                });
            }
        }
    }

    summary.finished_at = Utc::now();
    info!(
        "Reconciliation finished (dry_run={}): {} processed, {} succeeded, {} failed, {} drifts, {} anomalies",
        summary.dry_run,
        summary.processed,
        summary.succeeded,
        summary.failed,
        summary.drifts.len(),
        summary.anomalies.len()
    );

    Ok(summary)
}

/// Dispara uma reconciliação em lote
/// POST /maintenance/reconcile
pub async fn reconcile_handler(
    service: &MaintenanceService,
    request: &HttpRequest,
    data: ReconcileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match run_reconciliation(&storage, data).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Reconciliation completed",
        ))),
        Err(e) => {
            error!("Reconciliation batch failed to start: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ReconciliationFailed,
                    format!("Reconciliation failed: {e}"),
                )),
            )
        }
    }
}
