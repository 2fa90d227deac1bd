//! Snapshots de ranking (cache de renderização, usado para a tendência)

use sea_orm::entity::prelude::*;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ranking_snapshots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    // class_id ou "global"
    pub scope: String,
    #[sea_orm(column_type = "Text")]
    pub entries: String, // JSON RankingEntry[]
    pub taken_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_ranking_snapshot(self) -> crate::models::rankings::entities::RankingSnapshot {
        use chrono::{DateTime, Utc};

        let entries: Vec<crate::models::rankings::entities::RankingEntry> =
            serde_json::from_str(&self.entries).unwrap_or_else(|e| {
                warn!("Corrupted ranking snapshot for scope {}: {}", self.scope, e);
                Vec::new()
            });

        crate::models::rankings::entities::RankingSnapshot {
            scope: self.scope,
            entries,
            taken_at: DateTime::<Utc>::from_timestamp(self.taken_at, 0).unwrap_or_default(),
        }
    }
}
