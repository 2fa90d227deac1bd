//! Normalizador de registros de atividade
//!
//! Converte um registro bruto de qualquer coleção fonte em um
//! `ActivityRecord` com nota 0-100. Função pura, sem efeitos.

use crate::errors::{AvaliaNutriError, Result};
use crate::models::activities::entities::{ActivityRecord, RawActivity};

/// Normaliza um registro bruto: `round(raw / max * 100)`, limitado a [0, 100]
///
/// Registros sem max_score utilizável são rejeitados com `InvalidRecord`;
/// cabe ao chamador descartar e registrar, nunca abortar o lote.
pub fn normalize_record(raw: &RawActivity) -> Result<ActivityRecord> {
    if raw.student_id.trim().is_empty() {
        return Err(AvaliaNutriError::invalid_record(
            "activity record missing student_id",
        ));
    }
    if raw.module_id.trim().is_empty() {
        return Err(AvaliaNutriError::invalid_record(
            "activity record missing module_id",
        ));
    }
    if !raw.max_score.is_finite() || raw.max_score <= 0.0 {
        return Err(AvaliaNutriError::invalid_record(format!(
            "activity record for student {} module {} has invalid max_score {}",
            raw.student_id, raw.module_id, raw.max_score
        )));
    }
    if !raw.raw_score.is_finite() || raw.raw_score < 0.0 {
        return Err(AvaliaNutriError::invalid_record(format!(
            "activity record for student {} module {} has invalid score {}",
            raw.student_id, raw.module_id, raw.raw_score
        )));
    }

    let normalized_score = (raw.raw_score / raw.max_score * 100.0)
        .round()
        .clamp(0.0, 100.0);

    Ok(ActivityRecord {
        student_id: raw.student_id.clone(),
        module_id: raw.module_id.clone(),
        normalized_score,
        completed_at: raw.completed_at,
        source: raw.source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::ActivitySource;
    use chrono::Utc;

    fn raw(score: f64, max: f64) -> RawActivity {
        RawActivity {
            student_id: "aluno-1".to_string(),
            module_id: "modulo-1".to_string(),
            raw_score: score,
            max_score: max,
            completed_at: Utc::now(),
            source: ActivitySource::QuizAttempt,
        }
    }

    #[test]
    fn test_normalizes_to_percentage() {
        let record = normalize_record(&raw(7.5, 10.0)).unwrap();
        assert_eq!(record.normalized_score, 75.0);
    }

    #[test]
    fn test_rounds_to_nearest_integer() {
        let record = normalize_record(&raw(2.0, 3.0)).unwrap();
        assert_eq!(record.normalized_score, 67.0);
    }

    #[test]
    fn test_clamps_above_maximum() {
        // pontuação bruta acima do máximo declarado (bônus ou dado sujo)
        let record = normalize_record(&raw(12.0, 10.0)).unwrap();
        assert_eq!(record.normalized_score, 100.0);
    }

    #[test]
    fn test_zero_max_score_is_invalid() {
        let err = normalize_record(&raw(5.0, 0.0)).unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_negative_score_is_invalid() {
        let err = normalize_record(&raw(-1.0, 10.0)).unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_nan_max_score_is_invalid() {
        let err = normalize_record(&raw(5.0, f64::NAN)).unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_missing_ids_are_invalid() {
        let mut record = raw(5.0, 10.0);
        record.student_id = " ".to_string();
        assert!(normalize_record(&record).is_err());

        let mut record = raw(5.0, 10.0);
        record.module_id = String::new();
        assert!(normalize_record(&record).is_err());
    }
}
