//! Operações nos contadores por turma

use super::SeaOrmStorage;
use crate::entity::class_counters::{ActiveModel, Column, Entity as ClassCounters};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::errors::{AvaliaNutriError, Result};
use crate::models::enrollments::entities::ClassCounter;
use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, Set, TransactionTrait};
use std::collections::BTreeSet;

impl SeaOrmStorage {
    /// Contador armazenado de uma turma
    pub async fn get_class_counter_impl(&self, class_id: &str) -> Result<Option<ClassCounter>> {
        let result = ClassCounters::find_by_id(class_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to get class counter: {e}"))
            })?;

        Ok(result.map(|m| m.into_class_counter()))
    }

    /// Sobrescreve o contador de uma turma com o valor corrigido
    pub async fn set_class_counter_impl(
        &self,
        class_id: &str,
        students_count: i64,
    ) -> Result<ClassCounter> {
        let now = chrono::Utc::now().timestamp();

        let existing = ClassCounters::find_by_id(class_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to find class counter: {e}"))
            })?;

        let active = ActiveModel {
            class_id: Set(class_id.to_string()),
            students_count: Set(students_count),
            updated_at: Set(now),
        };

        let model = if existing.is_some() {
            active.update(&self.db).await.map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to update class counter: {e}"))
            })?
        } else {
            active.insert(&self.db).await.map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to insert class counter: {e}"))
            })?
        };

        Ok(model.into_class_counter())
    }

    /// Corrige vários contadores em uma única transação
    ///
    /// Ou todos os contadores do lote são gravados, ou nenhum; falha parcial
    /// não pode deixar contadores em estado misto.
    pub async fn set_class_counters_impl(&self, counters: &[(String, i64)]) -> Result<()> {
        if counters.is_empty() {
            return Ok(());
        }

        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to begin transaction: {e}"))
        })?;

        for (class_id, students_count) in counters {
            let existing = ClassCounters::find_by_id(class_id.clone())
                .one(&txn)
                .await
                .map_err(|e| {
                    AvaliaNutriError::database_operation(format!(
                        "Failed to find class counter: {e}"
                    ))
                })?;

            let active = ActiveModel {
                class_id: Set(class_id.clone()),
                students_count: Set(*students_count),
                updated_at: Set(now),
            };

            if existing.is_some() {
                active.update(&txn).await.map_err(|e| {
                    AvaliaNutriError::database_operation(format!(
                        "Failed to update class counter: {e}"
                    ))
                })?;
            } else {
                active.insert(&txn).await.map_err(|e| {
                    AvaliaNutriError::database_operation(format!(
                        "Failed to insert class counter: {e}"
                    ))
                })?;
            }
        }

        txn.commit().await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to commit counter batch: {e}"))
        })?;

        Ok(())
    }

    /// Todas as turmas conhecidas (matrículas ∪ contadores), ordenadas por id
    pub async fn list_class_ids_impl(&self) -> Result<Vec<String>> {
        let from_enrollments: Vec<String> = Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::ClassId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to list classes from enrollments: {e}"
                ))
            })?;

        let from_counters: Vec<String> = ClassCounters::find()
            .select_only()
            .column(Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to list classes from counters: {e}"
                ))
            })?;

        let ids: BTreeSet<String> = from_enrollments
            .into_iter()
            .chain(from_counters.into_iter())
            .collect();

        Ok(ids.into_iter().collect())
    }
}
