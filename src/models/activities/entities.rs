use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Origem de um registro de atividade
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub enum ActivitySource {
    QuizAttempt,    // tentativa de quiz
    ModuleProgress, // progresso de módulo
    GameProgress,   // progresso de jogo
}

impl ActivitySource {
    pub const QUIZ_ATTEMPT: &'static str = "quiz_attempt";
    pub const MODULE_PROGRESS: &'static str = "module_progress";
    pub const GAME_PROGRESS: &'static str = "game_progress";
}

impl<'de> Deserialize<'de> for ActivitySource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "quiz_attempt" => Ok(ActivitySource::QuizAttempt),
            "module_progress" => Ok(ActivitySource::ModuleProgress),
            "game_progress" => Ok(ActivitySource::GameProgress),
            _ => Err(serde::de::Error::custom(format!(
                "Origem de atividade inválida: '{s}'. Origens suportadas: quiz_attempt, module_progress, game_progress"
            ))),
        }
    }
}

impl std::fmt::Display for ActivitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivitySource::QuizAttempt => write!(f, "quiz_attempt"),
            ActivitySource::ModuleProgress => write!(f, "module_progress"),
            ActivitySource::GameProgress => write!(f, "game_progress"),
        }
    }
}

impl std::str::FromStr for ActivitySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz_attempt" => Ok(ActivitySource::QuizAttempt),
            "module_progress" => Ok(ActivitySource::ModuleProgress),
            "game_progress" => Ok(ActivitySource::GameProgress),
            _ => Err(format!("Invalid activity source: {s}")),
        }
    }
}

// Registro bruto, como armazenado nas coleções fonte
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct RawActivity {
    pub student_id: String,
    pub module_id: String,
    pub raw_score: f64,
    pub max_score: f64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub source: ActivitySource,
}

// Registro normalizado (efêmero, nunca persistido)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityRecord {
    pub student_id: String,
    pub module_id: String,
    // 0-100, já arredondado
    pub normalized_score: f64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub source: ActivitySource,
}
