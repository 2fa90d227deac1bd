use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{ModuleBestScore, UnifiedScore};
use crate::models::reconciliation::entities::ReductionAnomaly;

// Lista de melhores tentativas de um aluno
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ModuleBestScoreListResponse {
    pub student_id: String,
    pub items: Vec<ModuleBestScore>,
}

// Resultado de um recálculo completo
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct RecomputeResponse {
    pub score: UnifiedScore,
    // registros fonte descartados por serem inválidos
    pub skipped_records: i64,
    pub anomalies: Vec<ReductionAnomaly>,
}
