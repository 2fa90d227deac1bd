//! Progresso de módulo (coleção fonte, append-only)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "module_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: String,
    pub module_id: String,
    pub score: f64,
    pub max_score: f64,
    pub completed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_raw_activity(self) -> crate::models::activities::entities::RawActivity {
        use crate::models::activities::entities::{ActivitySource, RawActivity};
        use chrono::{DateTime, Utc};

        RawActivity {
            student_id: self.student_id,
            module_id: self.module_id,
            raw_score: self.score,
            max_score: self.max_score,
            completed_at: DateTime::<Utc>::from_timestamp(self.completed_at, 0)
                .unwrap_or_default(),
            source: ActivitySource::ModuleProgress,
        }
    }
}
