//! Pontuação unificada por aluno
//!
//! Documento derivado; sempre sobrescrito por inteiro a partir das melhores
//! tentativas, nunca atualizado campo a campo.

use sea_orm::entity::prelude::*;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "unified_scores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: String,
    pub class_id: Option<String>,
    pub total_score: f64,
    pub normalized_score: f64,
    pub completed_modules: i64,
    #[sea_orm(column_type = "Text")]
    pub module_scores: String, // JSON { moduleId: bestScore }
    pub last_activity: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_unified_score(self) -> crate::models::scores::entities::UnifiedScore {
        use chrono::{DateTime, Utc};
        use std::collections::BTreeMap;

        let module_scores: BTreeMap<String, f64> = serde_json::from_str(&self.module_scores)
            .unwrap_or_else(|e| {
                warn!(
                    "Corrupted module_scores JSON for student {}: {}",
                    self.student_id, e
                );
                BTreeMap::new()
            });

        crate::models::scores::entities::UnifiedScore {
            student_id: self.student_id,
            class_id: self.class_id,
            total_score: self.total_score,
            normalized_score: self.normalized_score,
            completed_modules: self.completed_modules,
            module_scores,
            last_activity: self
                .last_activity
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
