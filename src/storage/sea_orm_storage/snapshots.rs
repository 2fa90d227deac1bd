//! Operações nos snapshots de ranking

use super::SeaOrmStorage;
use crate::entity::ranking_snapshots::{ActiveModel, Column, Entity as RankingSnapshots};
use crate::errors::{AvaliaNutriError, Result};
use crate::models::rankings::entities::RankingSnapshot;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// Snapshot mais recente de um escopo (turma ou "global")
    pub async fn get_latest_ranking_snapshot_impl(
        &self,
        scope: &str,
    ) -> Result<Option<RankingSnapshot>> {
        let result = RankingSnapshots::find()
            .filter(Column::Scope.eq(scope))
            .order_by_desc(Column::TakenAt)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to get ranking snapshot: {e}"
                ))
            })?;

        Ok(result.map(|m| m.into_ranking_snapshot()))
    }

    /// Substitui o snapshot de um escopo
    ///
    /// A tabela guarda exatamente uma linha por escopo; o snapshot é um
    /// cache de renderização, não um histórico.
    pub async fn upsert_ranking_snapshot_impl(&self, snapshot: &RankingSnapshot) -> Result<()> {
        let entries = serde_json::to_string(&snapshot.entries)?;

        let txn = self.db.begin().await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to begin transaction: {e}"))
        })?;

        RankingSnapshots::delete_many()
            .filter(Column::Scope.eq(snapshot.scope.clone()))
            .exec(&txn)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to clear previous ranking snapshot: {e}"
                ))
            })?;

        let active = ActiveModel {
            scope: Set(snapshot.scope.clone()),
            entries: Set(entries),
            taken_at: Set(snapshot.taken_at.timestamp()),
            ..Default::default()
        };

        active.insert(&txn).await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to insert ranking snapshot: {e}"))
        })?;

        txn.commit().await.map_err(|e| {
            AvaliaNutriError::database_operation(format!(
                "Failed to commit ranking snapshot: {e}"
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rankings::entities::{RankingEntry, Trend};
    use chrono::{TimeZone, Utc};
    use migration::{Migrator, MigratorTrait};

    async fn storage() -> SeaOrmStorage {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        Migrator::up(&db, None).await.expect("migrations");
        SeaOrmStorage { db }
    }

    fn snapshot(scope: &str, position: i64) -> RankingSnapshot {
        RankingSnapshot {
            scope: scope.to_string(),
            entries: vec![RankingEntry {
                student_id: "aluno-1".to_string(),
                position,
                total_score: 80.0,
                normalized_score: 80.0,
                completed_modules: 1,
                average_score: 80.0,
                trend: Trend::Same,
            }],
            taken_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, position as u32).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_scope() {
        let storage = storage().await;

        storage
            .upsert_ranking_snapshot_impl(&snapshot("global", 1))
            .await
            .unwrap();
        storage
            .upsert_ranking_snapshot_impl(&snapshot("global", 2))
            .await
            .unwrap();
        storage
            .upsert_ranking_snapshot_impl(&snapshot("turma-a", 1))
            .await
            .unwrap();

        let rows = RankingSnapshots::find().all(&storage.db).await.unwrap();
        assert_eq!(rows.len(), 2);

        // a linha sobrevivente do escopo é a mais recente
        let latest = storage
            .get_latest_ranking_snapshot_impl("global")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.entries[0].position, 2);
    }

    #[tokio::test]
    async fn test_latest_snapshot_missing_scope_is_none() {
        let storage = storage().await;
        let latest = storage
            .get_latest_ranking_snapshot_impl("turma-x")
            .await
            .unwrap();
        assert!(latest.is_none());
    }
}
