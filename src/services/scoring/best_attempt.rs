//! Redutor de melhor tentativa
//!
//! Colapsa todas as tentativas de um par (aluno, módulo) em um único
//! `ModuleBestScore`. Determinístico e idempotente: a mesma entrada produz
//! sempre a mesma saída, e o valor armazenado nunca regride.

use crate::models::activities::entities::ActivityRecord;
use crate::models::reconciliation::entities::ReductionAnomaly;
use crate::models::scores::entities::ModuleBestScore;

/// Reduz o conjunto completo de tentativas de um par à melhor
///
/// Critério: maior nota normalizada; empate decidido pela tentativa mais
/// antiga, para reprodutibilidade. Retorna None para conjunto vazio.
pub fn reduce_attempts(records: &[ActivityRecord]) -> Option<ModuleBestScore> {
    let first = records.first()?;

    let best = records
        .iter()
        .fold(first, |best, candidate| {
            if candidate.normalized_score > best.normalized_score
                || (candidate.normalized_score == best.normalized_score
                    && candidate.completed_at < best.completed_at)
            {
                candidate
            } else {
                best
            }
        });

    let first_attempt_at = records.iter().map(|r| r.completed_at).min()?;
    let last_attempt_at = records.iter().map(|r| r.completed_at).max()?;

    Some(ModuleBestScore {
        student_id: best.student_id.clone(),
        module_id: best.module_id.clone(),
        best_score: best.normalized_score,
        attempts: records.len() as i64,
        first_attempt_at,
        last_attempt_at,
    })
}

/// Aplica a regra de não-regressão contra o valor persistido
///
/// Se a recomputação vier abaixo do armazenado (entrada parcial ou
/// corrompida), o armazenado é mantido e uma `ReductionAnomaly` é emitida
/// para revisão manual; nunca sobrescrevemos para baixo.
pub fn merge_with_stored(
    computed: ModuleBestScore,
    stored: Option<&ModuleBestScore>,
) -> (ModuleBestScore, Option<ReductionAnomaly>) {
    match stored {
        Some(stored) if stored.best_score > computed.best_score => {
            let anomaly = ReductionAnomaly {
                student_id: computed.student_id.clone(),
                module_id: computed.module_id.clone(),
                stored_best: stored.best_score,
                computed_best: computed.best_score,
                detected_at: chrono::Utc::now(),
            };
            (stored.clone(), Some(anomaly))
        }
        _ => (computed, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::ActivitySource;
    use chrono::{Duration, TimeZone, Utc};

    fn record(score: f64, minutes_offset: i64) -> ActivityRecord {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        ActivityRecord {
            student_id: "aluno-1".to_string(),
            module_id: "modulo-1".to_string(),
            normalized_score: score,
            completed_at: base + Duration::minutes(minutes_offset),
            source: ActivitySource::QuizAttempt,
        }
    }

    #[test]
    fn test_best_attempt_wins() {
        // cenário canônico: 60, 85, 40 → melhor 85, 3 tentativas
        let records = vec![record(60.0, 0), record(85.0, 10), record(40.0, 20)];
        let best = reduce_attempts(&records).unwrap();

        assert_eq!(best.best_score, 85.0);
        assert_eq!(best.attempts, 3);
        assert_eq!(best.first_attempt_at, records[0].completed_at);
        assert_eq!(best.last_attempt_at, records[2].completed_at);
    }

    #[test]
    fn test_tie_breaks_on_earliest_attempt() {
        let records = vec![record(85.0, 30), record(85.0, 5), record(70.0, 10)];
        let best = reduce_attempts(&records).unwrap();

        assert_eq!(best.best_score, 85.0);
        // empate resolvido pela tentativa mais antiga
        assert_eq!(best.last_attempt_at, records[0].completed_at);
        assert_eq!(best.first_attempt_at, records[1].completed_at);
    }

    #[test]
    fn test_reduction_is_idempotent() {
        let records = vec![record(60.0, 0), record(85.0, 10), record(40.0, 20)];
        let once = reduce_attempts(&records).unwrap();
        let twice = reduce_attempts(&records).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_order_of_arrival_does_not_matter() {
        let mut records = vec![record(40.0, 20), record(85.0, 10), record(60.0, 0)];
        let shuffled = reduce_attempts(&records).unwrap();
        records.reverse();
        let reversed = reduce_attempts(&records).unwrap();
        assert_eq!(shuffled, reversed);
        assert_eq!(shuffled.best_score, 85.0);
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(reduce_attempts(&[]).is_none());
    }

    #[test]
    fn test_merge_keeps_stored_on_regression() {
        // cenário do guarda de anomalia: armazenado 90, recomputado 75
        let stored = ModuleBestScore {
            student_id: "aluno-1".to_string(),
            module_id: "modulo-1".to_string(),
            best_score: 90.0,
            attempts: 5,
            first_attempt_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            last_attempt_at: Utc.with_ymd_and_hms(2025, 2, 20, 0, 0, 0).unwrap(),
        };
        let computed = reduce_attempts(&[record(75.0, 0)]).unwrap();

        let (merged, anomaly) = merge_with_stored(computed, Some(&stored));

        assert_eq!(merged.best_score, 90.0);
        assert_eq!(merged, stored);
        let anomaly = anomaly.unwrap();
        assert_eq!(anomaly.stored_best, 90.0);
        assert_eq!(anomaly.computed_best, 75.0);
    }

    #[test]
    fn test_merge_accepts_improvement() {
        let stored = ModuleBestScore {
            student_id: "aluno-1".to_string(),
            module_id: "modulo-1".to_string(),
            best_score: 70.0,
            attempts: 2,
            first_attempt_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            last_attempt_at: Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap(),
        };
        let computed = reduce_attempts(&[record(70.0, 0), record(95.0, 10)]).unwrap();

        let (merged, anomaly) = merge_with_stored(computed.clone(), Some(&stored));

        assert_eq!(merged, computed);
        assert_eq!(merged.best_score, 95.0);
        assert!(anomaly.is_none());
    }

    #[test]
    fn test_merge_without_stored_value() {
        let computed = reduce_attempts(&[record(50.0, 0)]).unwrap();
        let (merged, anomaly) = merge_with_stored(computed.clone(), None);
        assert_eq!(merged, computed);
        assert!(anomaly.is_none());
    }

    #[test]
    fn test_monotonicity_across_arrival_orders() {
        // best_score nunca diminui, independente da ordem de chegada
        let arrivals = [60.0, 85.0, 40.0, 85.0, 10.0];
        let mut stored: Option<ModuleBestScore> = None;

        for (i, score) in arrivals.iter().enumerate() {
            let computed = reduce_attempts(&[record(*score, i as i64)]).unwrap();
            let (merged, _) = merge_with_stored(computed, stored.as_ref());
            if let Some(prev) = &stored {
                assert!(merged.best_score >= prev.best_score);
            }
            stored = Some(merged);
        }

        assert_eq!(stored.unwrap().best_score, 85.0);
    }
}
