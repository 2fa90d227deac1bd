//! Implementação de storage com SeaORM
//!
//! Camada única de persistência, com suporte a SQLite, PostgreSQL e MySQL.

mod activities;
mod best_scores;
mod counters;
mod enrollments;
mod modules;
mod snapshots;
mod unified_scores;

use crate::config::AppConfig;
use crate::errors::{AvaliaNutriError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Storage SeaORM
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// Cria uma nova instância de storage
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // modo de conexão conforme o tipo do banco
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // migrações
        Migrator::up(&db, None)
            .await
            .map_err(|e| AvaliaNutriError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// Conexão SQLite (WAL + pragmas)
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| {
                AvaliaNutriError::database_config(format!("Failed to parse SQLite URL: {e}"))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Conexão genérica (PostgreSQL, MySQL)
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            AvaliaNutriError::database_connection(format!("Failed to connect to database: {e}"))
        })
    }

    /// Infere o tipo do banco a partir da URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AvaliaNutriError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

// Implementação do trait Storage
use crate::models::{
    activities::entities::RawActivity,
    enrollments::{
        entities::{ClassCounter, Enrollment, EnrollmentStatus},
        requests::EnrollmentListQuery,
        responses::EnrollmentListResponse,
    },
    rankings::entities::RankingSnapshot,
    scores::entities::{CourseModule, ModuleBestScore, UnifiedScore},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // atividades
    async fn append_activity(&self, activity: RawActivity) -> Result<RawActivity> {
        self.append_activity_impl(activity).await
    }

    async fn list_activities_for_pair(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> Result<Vec<RawActivity>> {
        self.list_activities_for_pair_impl(student_id, module_id)
            .await
    }

    async fn list_activities_for_student(&self, student_id: &str) -> Result<Vec<RawActivity>> {
        self.list_activities_for_student_impl(student_id).await
    }

    // melhores tentativas
    async fn get_module_best_score(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> Result<Option<ModuleBestScore>> {
        self.get_module_best_score_impl(student_id, module_id).await
    }

    async fn upsert_module_best_score(&self, best: &ModuleBestScore) -> Result<ModuleBestScore> {
        self.upsert_module_best_score_impl(best).await
    }

    async fn list_module_best_scores(&self, student_id: &str) -> Result<Vec<ModuleBestScore>> {
        self.list_module_best_scores_impl(student_id).await
    }

    // pontuação unificada
    async fn put_unified_score(&self, score: &UnifiedScore) -> Result<UnifiedScore> {
        self.put_unified_score_impl(score).await
    }

    async fn get_unified_score(&self, student_id: &str) -> Result<Option<UnifiedScore>> {
        self.get_unified_score_impl(student_id).await
    }

    async fn list_unified_scores(&self, student_ids: &[String]) -> Result<Vec<UnifiedScore>> {
        self.list_unified_scores_impl(student_ids).await
    }

    async fn list_all_student_ids(&self) -> Result<Vec<String>> {
        self.list_all_student_ids_impl().await
    }

    // matrículas
    async fn create_enrollment(&self, class_id: &str, student_id: &str) -> Result<Enrollment> {
        self.create_enrollment_impl(class_id, student_id).await
    }

    async fn get_enrollment(
        &self,
        class_id: &str,
        student_id: &str,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(class_id, student_id).await
    }

    async fn list_enrollments_by_class(&self, class_id: &str) -> Result<Vec<Enrollment>> {
        self.list_enrollments_by_class_impl(class_id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        class_id: &str,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        self.list_enrollments_with_pagination_impl(class_id, query)
            .await
    }

    async fn update_enrollment_status(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_status_impl(enrollment_id, status)
            .await
    }

    async fn mark_enrollments_removed(&self, row_ids: &[i64]) -> Result<u64> {
        self.mark_enrollments_removed_impl(row_ids).await
    }

    async fn get_active_enrollment_for_student(
        &self,
        student_id: &str,
    ) -> Result<Option<Enrollment>> {
        self.get_active_enrollment_for_student_impl(student_id)
            .await
    }

    async fn list_active_student_ids(&self, class_id: Option<&str>) -> Result<Vec<String>> {
        self.list_active_student_ids_impl(class_id).await
    }

    // contadores
    async fn get_class_counter(&self, class_id: &str) -> Result<Option<ClassCounter>> {
        self.get_class_counter_impl(class_id).await
    }

    async fn set_class_counter(
        &self,
        class_id: &str,
        students_count: i64,
    ) -> Result<ClassCounter> {
        self.set_class_counter_impl(class_id, students_count).await
    }

    async fn set_class_counters(&self, counters: &[(String, i64)]) -> Result<()> {
        self.set_class_counters_impl(counters).await
    }

    async fn list_class_ids(&self) -> Result<Vec<String>> {
        self.list_class_ids_impl().await
    }

    // módulos do curso
    async fn list_course_modules(&self) -> Result<Vec<CourseModule>> {
        self.list_course_modules_impl().await
    }

    async fn upsert_course_module(&self, module: &CourseModule) -> Result<CourseModule> {
        self.upsert_course_module_impl(module).await
    }

    // snapshots de ranking
    async fn get_latest_ranking_snapshot(&self, scope: &str) -> Result<Option<RankingSnapshot>> {
        self.get_latest_ranking_snapshot_impl(scope).await
    }

    async fn upsert_ranking_snapshot(&self, snapshot: &RankingSnapshot) -> Result<()> {
        self.upsert_ranking_snapshot_impl(snapshot).await
    }
}
