//! Agregador de pontuação unificada
//!
//! Deriva o documento `UnifiedScore` inteiro a partir das melhores
//! tentativas. Todos os campos são recalculados juntos; nunca corrigimos
//! normalized_score (ou qualquer outro campo) isoladamente — foi exatamente
//! esse tipo de patch parcial que produziu documentos inconsistentes.

use std::collections::BTreeMap;

use crate::models::scores::entities::{CourseModule, ModuleBestScore, UnifiedScore};

/// Agrega as melhores tentativas de um aluno em um `UnifiedScore`
///
/// `modules` é a configuração do curso; módulos fora do catálogo (dados
/// órfãos de módulos removidos) ficam de fora do documento. Quando o
/// catálogo está vazio (curso ainda não semeado), o denominador degrada
/// para os módulos que o aluno tentou, mantendo total e normalizado
/// mutuamente consistentes.
pub fn aggregate_scores(
    student_id: &str,
    class_id: Option<String>,
    best_scores: &[ModuleBestScore],
    modules: &[CourseModule],
    default_threshold: f64,
    module_max_score: f64,
) -> UnifiedScore {
    let in_catalog =
        |module_id: &str| modules.is_empty() || modules.iter().any(|m| m.module_id == module_id);

    let module_scores: BTreeMap<String, f64> = best_scores
        .iter()
        .filter(|b| in_catalog(&b.module_id))
        .map(|b| (b.module_id.clone(), b.best_score))
        .collect();

    let total_score: f64 = module_scores.values().sum();

    let num_modules = if modules.is_empty() {
        module_scores.len()
    } else {
        modules.len()
    };

    let max_possible = num_modules as f64 * module_max_score;
    let normalized_score = if max_possible > 0.0 {
        (total_score / max_possible * 100.0).round().clamp(0.0, 100.0)
    } else {
        0.0
    };

    let completed_modules = module_scores
        .iter()
        .filter(|(module_id, best)| {
            let threshold = modules
                .iter()
                .find(|m| &m.module_id == *module_id)
                .map(|m| m.effective_threshold(default_threshold))
                .unwrap_or(default_threshold);
            **best >= threshold
        })
        .count() as i64;

    let last_activity = best_scores
        .iter()
        .filter(|b| in_catalog(&b.module_id))
        .map(|b| b.last_attempt_at)
        .max();

    UnifiedScore {
        student_id: student_id.to_string(),
        class_id,
        total_score,
        normalized_score,
        completed_modules,
        module_scores,
        last_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn best(module_id: &str, score: f64) -> ModuleBestScore {
        ModuleBestScore {
            student_id: "aluno-1".to_string(),
            module_id: module_id.to_string(),
            best_score: score,
            attempts: 1,
            first_attempt_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            last_attempt_at: Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap(),
        }
    }

    fn module(module_id: &str, threshold: Option<f64>) -> CourseModule {
        CourseModule {
            module_id: module_id.to_string(),
            title: format!("Módulo {module_id}"),
            max_score: 100.0,
            passing_threshold: threshold,
        }
    }

    fn course() -> Vec<CourseModule> {
        vec![
            module("modulo-1", None),
            module("modulo-2", None),
            module("modulo-3", None),
            module("modulo-4", None),
        ]
    }

    #[test]
    fn test_totals_and_normalization() {
        let scores = vec![best("modulo-1", 85.0), best("modulo-2", 70.0)];
        let unified = aggregate_scores("aluno-1", None, &scores, &course(), 70.0, 100.0);

        assert_eq!(unified.total_score, 155.0);
        // 155 / 400 * 100 = 38.75 → 39
        assert_eq!(unified.normalized_score, 39.0);
        assert_eq!(unified.completed_modules, 2);
    }

    #[test]
    fn test_consistency_invariants_hold() {
        let scores = vec![
            best("modulo-1", 90.0),
            best("modulo-2", 69.0),
            best("modulo-3", 70.0),
        ];
        let modules = course();
        let unified = aggregate_scores("aluno-1", None, &scores, &modules, 70.0, 100.0);

        // completed_modules == count(module_scores >= 70)
        let expected_completed = unified
            .module_scores
            .values()
            .filter(|s| **s >= 70.0)
            .count() as i64;
        assert_eq!(unified.completed_modules, expected_completed);

        // normalized_score == round(total / máximo possível * 100)
        let max_possible = modules.len() as f64 * 100.0;
        let expected_normalized = (unified.total_score / max_possible * 100.0).round();
        assert_eq!(unified.normalized_score, expected_normalized);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let scores = vec![best("modulo-1", 85.0), best("modulo-2", 70.0)];
        let modules = course();

        let once = aggregate_scores("aluno-1", Some("turma-a".into()), &scores, &modules, 70.0, 100.0);
        let twice = aggregate_scores("aluno-1", Some("turma-a".into()), &scores, &modules, 70.0, 100.0);

        assert_eq!(once, twice);
        // serialização também idêntica byte a byte (module_scores é BTreeMap)
        assert_eq!(
            serde_json::to_string(&once).unwrap(),
            serde_json::to_string(&twice).unwrap()
        );
    }

    #[test]
    fn test_per_module_threshold_override() {
        let scores = vec![best("modulo-1", 60.0), best("modulo-2", 60.0)];
        let modules = vec![module("modulo-1", Some(50.0)), module("modulo-2", None)];
        let unified = aggregate_scores("aluno-1", None, &scores, &modules, 70.0, 100.0);

        // modulo-1 passa com threshold próprio de 50; modulo-2 fica no padrão 70
        assert_eq!(unified.completed_modules, 1);
    }

    #[test]
    fn test_no_best_scores() {
        let unified = aggregate_scores("aluno-1", None, &[], &course(), 70.0, 100.0);
        assert_eq!(unified.total_score, 0.0);
        assert_eq!(unified.normalized_score, 0.0);
        assert_eq!(unified.completed_modules, 0);
        assert!(unified.module_scores.is_empty());
        assert!(unified.last_activity.is_none());
    }

    #[test]
    fn test_scores_outside_the_catalog_are_excluded() {
        // modulo-extinto saiu do curso; a nota antiga não pode inflar o total
        let scores = vec![best("modulo-1", 80.0), best("modulo-extinto", 100.0)];
        let unified = aggregate_scores("aluno-1", None, &scores, &course(), 70.0, 100.0);

        assert_eq!(unified.total_score, 80.0);
        // 80 / 400 * 100 = 20
        assert_eq!(unified.normalized_score, 20.0);
        assert_eq!(unified.completed_modules, 1);
        assert!(!unified.module_scores.contains_key("modulo-extinto"));
    }

    #[test]
    fn test_degraded_denominator_without_course_config() {
        // sem módulos configurados, denominador = módulos tentados
        let scores = vec![best("modulo-1", 80.0), best("modulo-2", 60.0)];
        let unified = aggregate_scores("aluno-1", None, &scores, &[], 70.0, 100.0);

        assert_eq!(unified.total_score, 140.0);
        assert_eq!(unified.normalized_score, 70.0);
    }

    #[test]
    fn test_last_activity_is_most_recent_attempt() {
        let mut older = best("modulo-1", 50.0);
        older.last_attempt_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let newer = best("modulo-2", 60.0);

        let unified = aggregate_scores("aluno-1", None, &[older, newer.clone()], &course(), 70.0, 100.0);
        assert_eq!(unified.last_activity, Some(newer.last_attempt_at));
    }
}
