//! Operações de pontuação unificada

use std::collections::BTreeSet;

use super::SeaOrmStorage;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::unified_scores::{ActiveModel, Column, Entity as UnifiedScores};
use crate::errors::{AvaliaNutriError, Result};
use crate::models::scores::entities::UnifiedScore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// Sobrescreve o documento de pontuação unificada de um aluno
    ///
    /// Sempre substituição integral, derivada das melhores tentativas; é a
    /// proteção contra os documentos meio-atualizados que motivaram os
    /// scripts de correção.
    pub async fn put_unified_score_impl(&self, score: &UnifiedScore) -> Result<UnifiedScore> {
        let now = chrono::Utc::now().timestamp();
        let module_scores = serde_json::to_string(&score.module_scores)?;

        let existing = UnifiedScores::find_by_id(score.student_id.clone())
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to find unified score: {e}"))
            })?;

        let active = ActiveModel {
            student_id: Set(score.student_id.clone()),
            class_id: Set(score.class_id.clone()),
            total_score: Set(score.total_score),
            normalized_score: Set(score.normalized_score),
            completed_modules: Set(score.completed_modules),
            module_scores: Set(module_scores),
            last_activity: Set(score.last_activity.map(|dt| dt.timestamp())),
            updated_at: Set(now),
        };

        let model = if existing.is_some() {
            active.update(&self.db).await.map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to overwrite unified score: {e}"
                ))
            })?
        } else {
            active.insert(&self.db).await.map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to insert unified score: {e}"
                ))
            })?
        };

        Ok(model.into_unified_score())
    }

    /// Pontuação unificada de um aluno
    pub async fn get_unified_score_impl(&self, student_id: &str) -> Result<Option<UnifiedScore>> {
        let result = UnifiedScores::find_by_id(student_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to get unified score: {e}"))
            })?;

        Ok(result.map(|m| m.into_unified_score()))
    }

    /// Pontuações unificadas de um conjunto de alunos
    pub async fn list_unified_scores_impl(
        &self,
        student_ids: &[String],
    ) -> Result<Vec<UnifiedScore>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = UnifiedScores::find()
            .filter(Column::StudentId.is_in(student_ids.iter().cloned()))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list unified scores: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_unified_score()).collect())
    }

    /// Todos os alunos conhecidos (matrículas ∪ pontuações), ordenados por id
    pub async fn list_all_student_ids_impl(&self) -> Result<Vec<String>> {
        let from_enrollments: Vec<String> = Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::StudentId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to list students from enrollments: {e}"
                ))
            })?;

        let from_scores: Vec<String> = UnifiedScores::find()
            .select_only()
            .column(Column::StudentId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to list students from scores: {e}"
                ))
            })?;

        // BTreeSet deduplica e garante ordem estável para os jobs em lote
        let ids: BTreeSet<String> = from_enrollments
            .into_iter()
            .chain(from_scores.into_iter())
            .collect();

        Ok(ids.into_iter().collect())
    }
}
