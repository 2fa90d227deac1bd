use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

// Melhor tentativa de um aluno em um módulo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ModuleBestScore {
    pub student_id: String,
    pub module_id: String,
    // normalizado 0-100; monotonicamente não-decrescente
    pub best_score: f64,
    pub attempts: i64,
    pub first_attempt_at: chrono::DateTime<chrono::Utc>,
    pub last_attempt_at: chrono::DateTime<chrono::Utc>,
}

// Pontuação unificada de um aluno
//
// Invariantes (mantidas pelo agregador, que sempre recalcula tudo junto):
// - completed_modules == nº de módulos com best_score >= threshold
// - normalized_score == round(total_score / máximo possível * 100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct UnifiedScore {
    pub student_id: String,
    pub class_id: Option<String>,
    pub total_score: f64,
    pub normalized_score: f64,
    pub completed_modules: i64,
    // BTreeMap para serialização determinística
    pub module_scores: BTreeMap<String, f64>,
    pub last_activity: Option<chrono::DateTime<chrono::Utc>>,
}

// Módulo do curso com a configuração de pontuação
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct CourseModule {
    pub module_id: String,
    pub title: String,
    pub max_score: f64,
    pub passing_threshold: Option<f64>,
}

impl CourseModule {
    /// Threshold efetivo do módulo (padrão da configuração quando não definido)
    pub fn effective_threshold(&self, default_threshold: f64) -> f64 {
        self.passing_threshold.unwrap_or(default_threshold)
    }
}
