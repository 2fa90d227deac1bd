//! Melhor tentativa por (aluno, módulo)
//!
//! Uma linha por par; `best_score` nunca diminui (garantido pelo serviço de
//! pontuação, não pelo banco).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "module_best_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: String,
    pub module_id: String,
    pub best_score: f64,
    pub attempts: i64,
    pub first_attempt_at: i64,
    pub last_attempt_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_module_best_score(self) -> crate::models::scores::entities::ModuleBestScore {
        use chrono::{DateTime, Utc};

        crate::models::scores::entities::ModuleBestScore {
            student_id: self.student_id,
            module_id: self.module_id,
            best_score: self.best_score,
            attempts: self.attempts,
            first_attempt_at: DateTime::<Utc>::from_timestamp(self.first_attempt_at, 0)
                .unwrap_or_default(),
            last_attempt_at: DateTime::<Utc>::from_timestamp(self.last_attempt_at, 0)
                .unwrap_or_default(),
        }
    }
}
