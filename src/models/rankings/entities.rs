use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Tendência em relação ao snapshot anterior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub enum Trend {
    Up,
    Down,
    Same,
    New,
}

// Chave primária de ordenação do ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub enum RankingSort {
    TotalScore,
    CompletedModules,
    AverageScore,
}

impl Default for RankingSort {
    fn default() -> Self {
        RankingSort::TotalScore
    }
}

impl<'de> Deserialize<'de> for RankingSort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "total_score" => Ok(RankingSort::TotalScore),
            "completed_modules" => Ok(RankingSort::CompletedModules),
            "average_score" => Ok(RankingSort::AverageScore),
            _ => Err(serde::de::Error::custom(format!(
                "Ordenação inválida: '{s}'. Suportadas: total_score, completed_modules, average_score"
            ))),
        }
    }
}

// Uma posição do leaderboard (derivada, nunca persistida como verdade)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub struct RankingEntry {
    pub student_id: String,
    pub position: i64,
    pub total_score: f64,
    pub normalized_score: f64,
    pub completed_modules: i64,
    // média das melhores notas dos módulos tentados
    pub average_score: f64,
    pub trend: Trend,
}

// Snapshot de ranking (cache de renderização + base da tendência)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub struct RankingSnapshot {
    pub scope: String,
    pub entries: Vec<RankingEntry>,
    pub taken_at: chrono::DateTime<chrono::Utc>,
}

/// Escopo "global" (ausência de class_id)
pub const GLOBAL_SCOPE: &str = "global";
