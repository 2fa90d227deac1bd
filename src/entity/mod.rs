//! Entidades SeaORM
//!
//! Estas entidades são usadas apenas pela camada de storage; o restante do
//! código trabalha com os modelos de negócio do módulo `models`, convertidos
//! na fronteira do banco.

pub mod prelude;

pub mod class_counters;
pub mod course_modules;
pub mod enrollments;
pub mod game_progress;
pub mod module_best_scores;
pub mod module_progress;
pub mod quiz_attempts;
pub mod ranking_snapshots;
pub mod unified_scores;
