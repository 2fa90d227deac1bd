use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{ChangeRecord, CounterDrift, EntityError, ReductionAnomaly};

// Relatório agregado de uma reconciliação em lote
//
// Falhas por entidade são isoladas: uma turma ou um aluno com erro não
// interrompe o restante do lote.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/reconciliation.ts")]
pub struct ReconciliationSummary {
    pub dry_run: bool,
    pub processed: i64,
    pub succeeded: i64,
    pub failed: i64,
    pub errors: Vec<EntityError>,
    pub changes: Vec<ChangeRecord>,
    pub drifts: Vec<CounterDrift>,
    pub anomalies: Vec<ReductionAnomaly>,
    pub duplicates_removed: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

impl ReconciliationSummary {
    pub fn new(dry_run: bool) -> Self {
        let now = chrono::Utc::now();
        Self {
            dry_run,
            processed: 0,
            succeeded: 0,
            failed: 0,
            errors: Vec::new(),
            changes: Vec::new(),
            drifts: Vec::new(),
            anomalies: Vec::new(),
            duplicates_removed: 0,
            started_at: now,
            finished_at: now,
        }
    }
}
