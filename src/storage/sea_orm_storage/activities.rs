//! Operações nas coleções fonte de atividade

use super::SeaOrmStorage;
use crate::entity::game_progress::{
    ActiveModel as GameProgressActiveModel, Column as GameProgressColumn, Entity as GameProgress,
};
use crate::entity::module_progress::{
    ActiveModel as ModuleProgressActiveModel, Column as ModuleProgressColumn,
    Entity as ModuleProgress,
};
use crate::entity::quiz_attempts::{
    ActiveModel as QuizAttemptActiveModel, Column as QuizAttemptColumn, Entity as QuizAttempts,
};
use crate::errors::{AvaliaNutriError, Result};
use crate::models::activities::entities::{ActivitySource, RawActivity};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// Anexa um registro bruto à coleção indicada pelo source
    pub async fn append_activity_impl(&self, activity: RawActivity) -> Result<RawActivity> {
        let completed_at = activity.completed_at.timestamp();

        match activity.source {
            ActivitySource::QuizAttempt => {
                let model = QuizAttemptActiveModel {
                    student_id: Set(activity.student_id.clone()),
                    module_id: Set(activity.module_id.clone()),
                    score: Set(activity.raw_score),
                    max_score: Set(activity.max_score),
                    completed_at: Set(completed_at),
                    ..Default::default()
                };
                model.insert(&self.db).await.map_err(|e| {
                    AvaliaNutriError::database_operation(format!(
                        "Failed to append quiz attempt: {e}"
                    ))
                })?;
            }
            ActivitySource::ModuleProgress => {
                let model = ModuleProgressActiveModel {
                    student_id: Set(activity.student_id.clone()),
                    module_id: Set(activity.module_id.clone()),
                    score: Set(activity.raw_score),
                    max_score: Set(activity.max_score),
                    completed_at: Set(completed_at),
                    ..Default::default()
                };
                model.insert(&self.db).await.map_err(|e| {
                    AvaliaNutriError::database_operation(format!(
                        "Failed to append module progress: {e}"
                    ))
                })?;
            }
            ActivitySource::GameProgress => {
                let model = GameProgressActiveModel {
                    student_id: Set(activity.student_id.clone()),
                    module_id: Set(activity.module_id.clone()),
                    score: Set(activity.raw_score),
                    max_score: Set(activity.max_score),
                    completed_at: Set(completed_at),
                    ..Default::default()
                };
                model.insert(&self.db).await.map_err(|e| {
                    AvaliaNutriError::database_operation(format!(
                        "Failed to append game progress: {e}"
                    ))
                })?;
            }
        }

        Ok(activity)
    }

    /// Registros brutos de um par (aluno, módulo), nas três coleções
    pub async fn list_activities_for_pair_impl(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> Result<Vec<RawActivity>> {
        let quiz = QuizAttempts::find()
            .filter(QuizAttemptColumn::StudentId.eq(student_id))
            .filter(QuizAttemptColumn::ModuleId.eq(module_id))
            .order_by_asc(QuizAttemptColumn::CompletedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list quiz attempts: {e}"))
            })?;

        let module = ModuleProgress::find()
            .filter(ModuleProgressColumn::StudentId.eq(student_id))
            .filter(ModuleProgressColumn::ModuleId.eq(module_id))
            .order_by_asc(ModuleProgressColumn::CompletedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list module progress: {e}"))
            })?;

        let game = GameProgress::find()
            .filter(GameProgressColumn::StudentId.eq(student_id))
            .filter(GameProgressColumn::ModuleId.eq(module_id))
            .order_by_asc(GameProgressColumn::CompletedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list game progress: {e}"))
            })?;

        let mut records: Vec<RawActivity> = quiz
            .into_iter()
            .map(|m| m.into_raw_activity())
            .chain(module.into_iter().map(|m| m.into_raw_activity()))
            .chain(game.into_iter().map(|m| m.into_raw_activity()))
            .collect();

        // ordem determinística entre coleções
        records.sort_by(|a, b| {
            a.completed_at
                .cmp(&b.completed_at)
                .then_with(|| a.source.to_string().cmp(&b.source.to_string()))
        });

        Ok(records)
    }

    /// Registros brutos de um aluno, nas três coleções
    pub async fn list_activities_for_student_impl(
        &self,
        student_id: &str,
    ) -> Result<Vec<RawActivity>> {
        let quiz = QuizAttempts::find()
            .filter(QuizAttemptColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list quiz attempts: {e}"))
            })?;

        let module = ModuleProgress::find()
            .filter(ModuleProgressColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list module progress: {e}"))
            })?;

        let game = GameProgress::find()
            .filter(GameProgressColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list game progress: {e}"))
            })?;

        let mut records: Vec<RawActivity> = quiz
            .into_iter()
            .map(|m| m.into_raw_activity())
            .chain(module.into_iter().map(|m| m.into_raw_activity()))
            .chain(game.into_iter().map(|m| m.into_raw_activity()))
            .collect();

        records.sort_by(|a, b| {
            a.module_id
                .cmp(&b.module_id)
                .then_with(|| a.completed_at.cmp(&b.completed_at))
                .then_with(|| a.source.to_string().cmp(&b.source.to_string()))
        });

        Ok(records)
    }
}
