//! Pré-importação das entidades

pub use super::class_counters::{
    ActiveModel as ClassCounterActiveModel, Entity as ClassCounters, Model as ClassCounterModel,
};
pub use super::course_modules::{
    ActiveModel as CourseModuleActiveModel, Entity as CourseModules, Model as CourseModuleModel,
};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::game_progress::{
    ActiveModel as GameProgressActiveModel, Entity as GameProgress, Model as GameProgressModel,
};
pub use super::module_best_scores::{
    ActiveModel as ModuleBestScoreActiveModel, Entity as ModuleBestScores,
    Model as ModuleBestScoreModel,
};
pub use super::module_progress::{
    ActiveModel as ModuleProgressActiveModel, Entity as ModuleProgress,
    Model as ModuleProgressModel,
};
pub use super::quiz_attempts::{
    ActiveModel as QuizAttemptActiveModel, Entity as QuizAttempts, Model as QuizAttemptModel,
};
pub use super::ranking_snapshots::{
    ActiveModel as RankingSnapshotActiveModel, Entity as RankingSnapshots,
    Model as RankingSnapshotModel,
};
pub use super::unified_scores::{
    ActiveModel as UnifiedScoreActiveModel, Entity as UnifiedScores, Model as UnifiedScoreModel,
};
