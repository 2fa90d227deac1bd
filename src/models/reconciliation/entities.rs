use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

// Recomputação veio abaixo do valor armazenado (possível entrada parcial).
// Evento de alerta, não erro: o valor armazenado é mantido.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/reconciliation.ts")]
pub struct ReductionAnomaly {
    pub student_id: String,
    pub module_id: String,
    pub stored_best: f64,
    pub computed_best: f64,
    pub detected_at: chrono::DateTime<chrono::Utc>,
}

// Contador divergente do número real de matrículas ativas.
// Evento informacional; corrigido automaticamente fora do dry-run.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/reconciliation.ts")]
pub struct CounterDrift {
    pub class_id: String,
    pub old_count: i64,
    pub new_count: i64,
    pub detected_at: chrono::DateTime<chrono::Utc>,
}

// Registro de mudança para auditoria (valor antigo → novo)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/reconciliation.ts")]
pub struct ChangeRecord {
    pub entity: String,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

// Falha isolada de uma entidade dentro de um lote
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/reconciliation.ts")]
pub struct EntityError {
    pub entity: String,
    pub error: String,
}

// Resultado da reconciliação de roster de uma turma (puro, sem I/O)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterReconciliation {
    // conjunto autoritativo de alunos ativos
    pub active_student_ids: BTreeSet<String>,
    pub corrected_count: i64,
    // ids de linhas de matrícula duplicadas, a marcar como removed
    pub duplicate_row_ids: Vec<i64>,
}
