//! Reconciliador de roster de turma
//!
//! Deriva o conjunto autoritativo de alunos ativos a partir das matrículas
//! e detecta desvios do contador denormalizado. Funções puras; a aplicação
//! das correções fica com o serviço de manutenção.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use crate::models::enrollments::entities::{Enrollment, EnrollmentStatus};
use crate::models::reconciliation::entities::{CounterDrift, RosterReconciliation};

/// Reconcilia as matrículas de uma turma
///
/// Matrículas ativas duplicadas do mesmo aluno são colapsadas mantendo a
/// mais recente por enrolled_at (empate: maior id); as demais entram em
/// `duplicate_row_ids` para serem marcadas como removed.
pub fn reconcile_roster(enrollments: &[Enrollment]) -> RosterReconciliation {
    let mut kept: BTreeMap<&str, &Enrollment> = BTreeMap::new();
    let mut duplicate_row_ids = Vec::new();

    for enrollment in enrollments {
        if enrollment.status != EnrollmentStatus::Active {
            continue;
        }
        match kept.get(enrollment.student_id.as_str()) {
            Some(current)
                if (current.enrolled_at, current.id) >= (enrollment.enrolled_at, enrollment.id) =>
            {
                duplicate_row_ids.push(enrollment.id);
            }
            Some(current) => {
                duplicate_row_ids.push(current.id);
                kept.insert(enrollment.student_id.as_str(), enrollment);
            }
            None => {
                kept.insert(enrollment.student_id.as_str(), enrollment);
            }
        }
    }

    duplicate_row_ids.sort_unstable();

    let active_student_ids: BTreeSet<String> = kept.keys().map(|s| s.to_string()).collect();
    let corrected_count = active_student_ids.len() as i64;

    RosterReconciliation {
        active_student_ids,
        corrected_count,
        duplicate_row_ids,
    }
}

/// Compara o contador armazenado com o valor reconciliado
pub fn detect_counter_drift(
    class_id: &str,
    stored_count: Option<i64>,
    corrected_count: i64,
) -> Option<CounterDrift> {
    let old_count = stored_count.unwrap_or(0);
    if old_count == corrected_count {
        return None;
    }
    Some(CounterDrift {
        class_id: class_id.to_string(),
        old_count,
        new_count: corrected_count,
        detected_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn enrollment(id: i64, student_id: &str, status: EnrollmentStatus, days: i64) -> Enrollment {
        let base = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        Enrollment {
            id,
            student_id: student_id.to_string(),
            class_id: "turma-a".to_string(),
            status,
            enrolled_at: base + Duration::days(days),
            updated_at: base + Duration::days(days),
        }
    }

    #[test]
    fn test_counts_only_active_enrollments() {
        let enrollments = vec![
            enrollment(1, "aluno-1", EnrollmentStatus::Active, 0),
            enrollment(2, "aluno-2", EnrollmentStatus::Pending, 1),
            enrollment(3, "aluno-3", EnrollmentStatus::Removed, 2),
            enrollment(4, "aluno-4", EnrollmentStatus::Active, 3),
        ];

        let result = reconcile_roster(&enrollments);

        assert_eq!(result.corrected_count, 2);
        assert!(result.active_student_ids.contains("aluno-1"));
        assert!(result.active_student_ids.contains("aluno-4"));
        assert!(result.duplicate_row_ids.is_empty());
    }

    #[test]
    fn test_deduplicates_keeping_most_recent() {
        // mesmo aluno com duas matrículas ativas (corrida de escrita dupla)
        let enrollments = vec![
            enrollment(1, "aluno-1", EnrollmentStatus::Active, 0),
            enrollment(2, "aluno-1", EnrollmentStatus::Active, 5),
            enrollment(3, "aluno-2", EnrollmentStatus::Active, 1),
        ];

        let result = reconcile_roster(&enrollments);

        assert_eq!(result.corrected_count, 2);
        assert_eq!(result.duplicate_row_ids, vec![1]);
    }

    #[test]
    fn test_dedup_is_order_independent() {
        let mut enrollments = vec![
            enrollment(2, "aluno-1", EnrollmentStatus::Active, 5),
            enrollment(1, "aluno-1", EnrollmentStatus::Active, 0),
        ];
        let forward = reconcile_roster(&enrollments);
        enrollments.reverse();
        let backward = reconcile_roster(&enrollments);

        assert_eq!(forward, backward);
        assert_eq!(forward.duplicate_row_ids, vec![1]);
    }

    #[test]
    fn test_dedup_tie_breaks_on_higher_id() {
        let enrollments = vec![
            enrollment(7, "aluno-1", EnrollmentStatus::Active, 3),
            enrollment(9, "aluno-1", EnrollmentStatus::Active, 3),
        ];

        let result = reconcile_roster(&enrollments);

        assert_eq!(result.corrected_count, 1);
        assert_eq!(result.duplicate_row_ids, vec![7]);
    }

    #[test]
    fn test_reconciliation_is_idempotent() {
        // aplicar a correção e reconciliar de novo não muda mais nada
        let enrollments = vec![
            enrollment(2, "aluno-1", EnrollmentStatus::Active, 5),
            enrollment(1, "aluno-1", EnrollmentStatus::Removed, 0),
            enrollment(3, "aluno-2", EnrollmentStatus::Active, 1),
        ];

        let result = reconcile_roster(&enrollments);

        assert_eq!(result.corrected_count, 2);
        assert!(result.duplicate_row_ids.is_empty());
    }

    #[test]
    fn test_drift_detected() {
        // cenário clássico: contador diz 5, reconciliado diz 3
        let drift = detect_counter_drift("turma-a", Some(5), 3).unwrap();
        assert_eq!(drift.old_count, 5);
        assert_eq!(drift.new_count, 3);
        assert_eq!(drift.class_id, "turma-a");
    }

    #[test]
    fn test_no_drift_when_counter_matches() {
        assert!(detect_counter_drift("turma-a", Some(3), 3).is_none());
    }

    #[test]
    fn test_missing_counter_counts_as_zero() {
        let drift = detect_counter_drift("turma-a", None, 2).unwrap();
        assert_eq!(drift.old_count, 0);
        assert_eq!(drift.new_count, 2);
    }
}
