//! Construtor de ranking
//!
//! Deriva o leaderboard inteiro a partir das pontuações unificadas e do
//! roster ativo. Nunca mantém posições incrementalmente; cada construção
//! parte do zero e produz a mesma saída para a mesma entrada.

use std::collections::{BTreeSet, HashMap};
use std::cmp::Ordering;

use crate::models::rankings::entities::{RankingEntry, RankingSnapshot, RankingSort, Trend};
use crate::models::scores::entities::UnifiedScore;

fn average_score(score: &UnifiedScore) -> f64 {
    if score.module_scores.is_empty() {
        return 0.0;
    }
    let sum: f64 = score.module_scores.values().sum();
    sum / score.module_scores.len() as f64
}

fn compare(a: &RankingEntry, b: &RankingEntry, sort: RankingSort) -> Ordering {
    let total = || b.total_score.total_cmp(&a.total_score);
    let completed = || b.completed_modules.cmp(&a.completed_modules);
    let average = || b.average_score.total_cmp(&a.average_score);

    // desempate fixo (total desc, concluídos desc, média desc), pulando a
    // chave primária já comparada; id asc fecha com ordem total determinística
    let ranked = match sort {
        RankingSort::TotalScore => total().then_with(completed).then_with(average),
        RankingSort::CompletedModules => completed().then_with(total).then_with(average),
        RankingSort::AverageScore => average().then_with(total).then_with(completed),
    };

    ranked.then_with(|| a.student_id.cmp(&b.student_id))
}

/// Constrói o ranking de um escopo
///
/// Apenas alunos em `active_student_ids` entram; a tendência é calculada
/// contra o snapshot anterior do mesmo escopo (None = todos `New`).
pub fn build_ranking(
    scores: &[UnifiedScore],
    active_student_ids: &BTreeSet<String>,
    previous: Option<&RankingSnapshot>,
    sort: RankingSort,
) -> Vec<RankingEntry> {
    let previous_positions: HashMap<&str, i64> = previous
        .map(|snapshot| {
            snapshot
                .entries
                .iter()
                .map(|e| (e.student_id.as_str(), e.position))
                .collect()
        })
        .unwrap_or_default();

    let mut entries: Vec<RankingEntry> = scores
        .iter()
        .filter(|score| active_student_ids.contains(&score.student_id))
        .map(|score| RankingEntry {
            student_id: score.student_id.clone(),
            position: 0,
            total_score: score.total_score,
            normalized_score: score.normalized_score,
            completed_modules: score.completed_modules,
            average_score: average_score(score),
            trend: Trend::New,
        })
        .collect();

    entries.sort_by(|a, b| compare(a, b, sort));

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index as i64 + 1;
        entry.trend = match previous_positions.get(entry.student_id.as_str()) {
            None => Trend::New,
            Some(old) if *old > entry.position => Trend::Up,
            Some(old) if *old < entry.position => Trend::Down,
            Some(_) => Trend::Same,
        };
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn score(student_id: &str, modules: &[(&str, f64)], completed: i64) -> UnifiedScore {
        let module_scores: BTreeMap<String, f64> = modules
            .iter()
            .map(|(id, s)| (id.to_string(), *s))
            .collect();
        let total_score = module_scores.values().sum();
        UnifiedScore {
            student_id: student_id.to_string(),
            class_id: Some("turma-a".to_string()),
            total_score,
            normalized_score: 0.0,
            completed_modules: completed,
            module_scores,
            last_activity: None,
        }
    }

    fn active(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_orders_by_total_score_descending() {
        let scores = vec![
            score("aluno-1", &[("m1", 50.0)], 0),
            score("aluno-2", &[("m1", 90.0)], 1),
            score("aluno-3", &[("m1", 70.0)], 1),
        ];
        let roster = active(&["aluno-1", "aluno-2", "aluno-3"]);

        let entries = build_ranking(&scores, &roster, None, RankingSort::TotalScore);

        assert_eq!(entries[0].student_id, "aluno-2");
        assert_eq!(entries[1].student_id, "aluno-3");
        assert_eq!(entries[2].student_id, "aluno-1");
        assert_eq!(entries[0].position, 1);
        assert_eq!(entries[2].position, 3);
    }

    #[test]
    fn test_excludes_students_outside_active_roster() {
        // pontuação órfã (aluno removido) não aparece no ranking
        let scores = vec![
            score("aluno-1", &[("m1", 50.0)], 0),
            score("aluno-removido", &[("m1", 99.0)], 1),
        ];
        let roster = active(&["aluno-1"]);

        let entries = build_ranking(&scores, &roster, None, RankingSort::TotalScore);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].student_id, "aluno-1");
    }

    #[test]
    fn test_tie_break_chain() {
        // A e B empatados em total; A tem mais módulos concluídos
        let a = score("aluno-a", &[("m1", 80.0), ("m2", 70.0)], 2);
        let b = score("aluno-b", &[("m1", 90.0), ("m2", 60.0)], 1);
        assert_eq!(a.total_score, b.total_score);

        let roster = active(&["aluno-a", "aluno-b"]);
        let entries = build_ranking(&[b, a], &roster, None, RankingSort::TotalScore);

        assert_eq!(entries[0].student_id, "aluno-a");
        assert_eq!(entries[1].student_id, "aluno-b");
    }

    #[test]
    fn test_full_tie_breaks_on_student_id() {
        let a = score("aluno-b", &[("m1", 80.0)], 1);
        let b = score("aluno-a", &[("m1", 80.0)], 1);
        let roster = active(&["aluno-a", "aluno-b"]);

        let entries = build_ranking(&[a, b], &roster, None, RankingSort::TotalScore);

        assert_eq!(entries[0].student_id, "aluno-a");
        assert_eq!(entries[1].student_id, "aluno-b");
    }

    #[test]
    fn test_trend_against_previous_snapshot() {
        let previous = RankingSnapshot {
            scope: "turma-a".to_string(),
            entries: vec![
                RankingEntry {
                    student_id: "aluno-1".to_string(),
                    position: 1,
                    total_score: 90.0,
                    normalized_score: 90.0,
                    completed_modules: 1,
                    average_score: 90.0,
                    trend: Trend::New,
                },
                RankingEntry {
                    student_id: "aluno-2".to_string(),
                    position: 2,
                    total_score: 80.0,
                    normalized_score: 80.0,
                    completed_modules: 1,
                    average_score: 80.0,
                    trend: Trend::New,
                },
            ],
            taken_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        };

        // aluno-2 ultrapassa, aluno-3 estreia
        let scores = vec![
            score("aluno-1", &[("m1", 90.0)], 1),
            score("aluno-2", &[("m1", 95.0)], 1),
            score("aluno-3", &[("m1", 10.0)], 0),
        ];
        let roster = active(&["aluno-1", "aluno-2", "aluno-3"]);

        let entries = build_ranking(&scores, &roster, Some(&previous), RankingSort::TotalScore);

        assert_eq!(entries[0].student_id, "aluno-2");
        assert_eq!(entries[0].trend, Trend::Up);
        assert_eq!(entries[1].student_id, "aluno-1");
        assert_eq!(entries[1].trend, Trend::Down);
        assert_eq!(entries[2].student_id, "aluno-3");
        assert_eq!(entries[2].trend, Trend::New);
    }

    #[test]
    fn test_trend_without_previous_snapshot_is_new() {
        let scores = vec![score("aluno-1", &[("m1", 50.0)], 0)];
        let roster = active(&["aluno-1"]);
        let entries = build_ranking(&scores, &roster, None, RankingSort::TotalScore);
        assert_eq!(entries[0].trend, Trend::New);
    }

    #[test]
    fn test_completed_modules_ties_break_by_total_then_id() {
        // empatados em concluídos: decide o total; empatados em tudo: o id
        let scores = vec![
            score("aluno-c", &[("m1", 60.0)], 1),
            score("aluno-b", &[("m1", 90.0)], 1),
            score("aluno-a", &[("m1", 60.0)], 1),
        ];
        let roster = active(&["aluno-a", "aluno-b", "aluno-c"]);

        let entries = build_ranking(&scores, &roster, None, RankingSort::CompletedModules);

        assert_eq!(entries[0].student_id, "aluno-b");
        assert_eq!(entries[1].student_id, "aluno-a");
        assert_eq!(entries[2].student_id, "aluno-c");
    }

    #[test]
    fn test_rebuilding_against_same_snapshot_preserves_trends() {
        // duas construções consecutivas (ex.: página 1 e página 2 da mesma
        // listagem) usam o mesmo snapshot e devem mostrar as mesmas tendências
        let previous = RankingSnapshot {
            scope: "turma-a".to_string(),
            entries: vec![RankingEntry {
                student_id: "aluno-1".to_string(),
                position: 2,
                total_score: 50.0,
                normalized_score: 50.0,
                completed_modules: 0,
                average_score: 50.0,
                trend: Trend::New,
            }],
            taken_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        };
        let scores = vec![score("aluno-1", &[("m1", 95.0)], 1)];
        let roster = active(&["aluno-1"]);

        let first = build_ranking(&scores, &roster, Some(&previous), RankingSort::TotalScore);
        let second = build_ranking(&scores, &roster, Some(&previous), RankingSort::TotalScore);

        assert_eq!(first[0].trend, Trend::Up);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_by_completed_modules() {
        let scores = vec![
            score("aluno-1", &[("m1", 100.0)], 1),
            score("aluno-2", &[("m1", 70.0), ("m2", 70.0)], 2),
        ];
        let roster = active(&["aluno-1", "aluno-2"]);

        let entries = build_ranking(&scores, &roster, None, RankingSort::CompletedModules);

        assert_eq!(entries[0].student_id, "aluno-2");
    }

    #[test]
    fn test_average_over_attempted_modules_only() {
        let scores = vec![score("aluno-1", &[("m1", 80.0), ("m2", 60.0)], 1)];
        let roster = active(&["aluno-1"]);
        let entries = build_ranking(&scores, &roster, None, RankingSort::AverageScore);
        assert_eq!(entries[0].average_score, 70.0);
    }

    #[test]
    fn test_build_is_deterministic() {
        let scores = vec![
            score("aluno-2", &[("m1", 80.0)], 1),
            score("aluno-1", &[("m1", 80.0)], 1),
            score("aluno-3", &[("m1", 30.0)], 0),
        ];
        let roster = active(&["aluno-1", "aluno-2", "aluno-3"]);

        let once = build_ranking(&scores, &roster, None, RankingSort::TotalScore);
        let twice = build_ranking(&scores, &roster, None, RankingSort::TotalScore);
        assert_eq!(once, twice);
    }
}
