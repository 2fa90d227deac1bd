use serde::Deserialize;
use ts_rs::TS;

use super::entities::ActivitySource;

// Ingestão de atividade (produtores: quiz, módulo, jogo)
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct SubmitActivityRequest {
    pub student_id: String,
    pub module_id: String,
    pub score: f64,
    pub max_score: f64,
    pub source: ActivitySource,
    // ausente = agora
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}
