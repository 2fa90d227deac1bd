use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Status de matrícula
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub enum EnrollmentStatus {
    Pending, // convite enviado, aguardando aceite
    Active,  // conta para roster e ranking
    Removed, // mantido para auditoria, nunca contado
}

impl EnrollmentStatus {
    pub const PENDING: &'static str = "pending";
    pub const ACTIVE: &'static str = "active";
    pub const REMOVED: &'static str = "removed";

    /// Transições permitidas: pending→active, pending→removed, active→removed
    pub fn can_transition_to(&self, next: EnrollmentStatus) -> bool {
        matches!(
            (self, next),
            (EnrollmentStatus::Pending, EnrollmentStatus::Active)
                | (EnrollmentStatus::Pending, EnrollmentStatus::Removed)
                | (EnrollmentStatus::Active, EnrollmentStatus::Removed)
        )
    }
}

impl<'de> Deserialize<'de> for EnrollmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "pending" => Ok(EnrollmentStatus::Pending),
            "active" => Ok(EnrollmentStatus::Active),
            "removed" => Ok(EnrollmentStatus::Removed),
            _ => Err(serde::de::Error::custom(format!(
                "Status de matrícula inválido: '{s}'. Status suportados: pending, active, removed"
            ))),
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Pending => write!(f, "pending"),
            EnrollmentStatus::Active => write!(f, "active"),
            EnrollmentStatus::Removed => write!(f, "removed"),
        }
    }
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EnrollmentStatus::Pending),
            "active" => Ok(EnrollmentStatus::Active),
            "removed" => Ok(EnrollmentStatus::Removed),
            _ => Err(format!("Invalid enrollment status: {s}")),
        }
    }
}

// Matrícula de um aluno em uma turma
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: String,
    pub class_id: String,
    pub status: EnrollmentStatus,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Contador denormalizado de alunos ativos de uma turma
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct ClassCounter {
    pub class_id: String,
    pub students_count: i64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(EnrollmentStatus::Pending.can_transition_to(EnrollmentStatus::Active));
        assert!(EnrollmentStatus::Pending.can_transition_to(EnrollmentStatus::Removed));
        assert!(EnrollmentStatus::Active.can_transition_to(EnrollmentStatus::Removed));
    }

    #[test]
    fn test_forbidden_transitions() {
        // removido é terminal; reativação exige nova matrícula
        assert!(!EnrollmentStatus::Removed.can_transition_to(EnrollmentStatus::Active));
        assert!(!EnrollmentStatus::Removed.can_transition_to(EnrollmentStatus::Pending));
        assert!(!EnrollmentStatus::Active.can_transition_to(EnrollmentStatus::Pending));
        assert!(!EnrollmentStatus::Active.can_transition_to(EnrollmentStatus::Active));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EnrollmentStatus::Pending,
            EnrollmentStatus::Active,
            EnrollmentStatus::Removed,
        ] {
            let parsed: EnrollmentStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }
}
