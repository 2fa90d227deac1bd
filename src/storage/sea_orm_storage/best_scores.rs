//! Operações de melhor tentativa por (aluno, módulo)

use super::SeaOrmStorage;
use crate::entity::module_best_scores::{ActiveModel, Column, Entity as ModuleBestScores};
use crate::errors::{AvaliaNutriError, Result};
use crate::models::scores::entities::ModuleBestScore;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// Melhor tentativa de um par (aluno, módulo)
    pub async fn get_module_best_score_impl(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> Result<Option<ModuleBestScore>> {
        let result = ModuleBestScores::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ModuleId.eq(module_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to get best score: {e}"))
            })?;

        Ok(result.map(|m| m.into_module_best_score()))
    }

    /// Insere ou substitui a melhor tentativa de um par
    ///
    /// A garantia de não-regressão é aplicada pelo redutor no serviço de
    /// pontuação antes de chegar aqui; o storage escreve o valor recebido.
    pub async fn upsert_module_best_score_impl(
        &self,
        best: &ModuleBestScore,
    ) -> Result<ModuleBestScore> {
        let now = chrono::Utc::now().timestamp();

        let existing = ModuleBestScores::find()
            .filter(Column::StudentId.eq(best.student_id.as_str()))
            .filter(Column::ModuleId.eq(best.module_id.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to find best score: {e}"))
            })?;

        let model = match existing {
            Some(row) => {
                let mut active: ActiveModel = row.into();
                active.best_score = Set(best.best_score);
                active.attempts = Set(best.attempts);
                active.first_attempt_at = Set(best.first_attempt_at.timestamp());
                active.last_attempt_at = Set(best.last_attempt_at.timestamp());
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(|e| {
                    AvaliaNutriError::database_operation(format!(
                        "Failed to update best score: {e}"
                    ))
                })?
            }
            None => {
                let active = ActiveModel {
                    student_id: Set(best.student_id.clone()),
                    module_id: Set(best.module_id.clone()),
                    best_score: Set(best.best_score),
                    attempts: Set(best.attempts),
                    first_attempt_at: Set(best.first_attempt_at.timestamp()),
                    last_attempt_at: Set(best.last_attempt_at.timestamp()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&self.db).await.map_err(|e| {
                    AvaliaNutriError::database_operation(format!(
                        "Failed to insert best score: {e}"
                    ))
                })?
            }
        };

        Ok(model.into_module_best_score())
    }

    /// Todas as melhores tentativas de um aluno, ordenadas por módulo
    pub async fn list_module_best_scores_impl(
        &self,
        student_id: &str,
    ) -> Result<Vec<ModuleBestScore>> {
        let rows = ModuleBestScores::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::ModuleId)
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list best scores: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_module_best_score()).collect())
    }
}
