use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Coleções fonte de atividade (append-only)
    // Anexa um registro bruto à coleção indicada pelo source
    async fn append_activity(&self, activity: RawActivity) -> Result<RawActivity>;
    // Todos os registros brutos de um par (aluno, módulo), nas três coleções
    async fn list_activities_for_pair(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> Result<Vec<RawActivity>>;
    // Todos os registros brutos de um aluno
    async fn list_activities_for_student(&self, student_id: &str) -> Result<Vec<RawActivity>>;

    /// Melhores tentativas
    async fn get_module_best_score(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> Result<Option<ModuleBestScore>>;
    async fn upsert_module_best_score(&self, best: &ModuleBestScore) -> Result<ModuleBestScore>;
    async fn list_module_best_scores(&self, student_id: &str) -> Result<Vec<ModuleBestScore>>;

    /// Pontuação unificada
    // Sobrescrita integral do documento; nunca merge parcial
    async fn put_unified_score(&self, score: &UnifiedScore) -> Result<UnifiedScore>;
    async fn get_unified_score(&self, student_id: &str) -> Result<Option<UnifiedScore>>;
    async fn list_unified_scores(&self, student_ids: &[String]) -> Result<Vec<UnifiedScore>>;
    // Todos os alunos conhecidos (matrículas ∪ pontuações), ordenados por id
    async fn list_all_student_ids(&self) -> Result<Vec<String>>;

    /// Matrículas
    async fn create_enrollment(&self, class_id: &str, student_id: &str) -> Result<Enrollment>;
    // Matrícula mais recente não-removida do par (turma, aluno)
    async fn get_enrollment(&self, class_id: &str, student_id: &str)
    -> Result<Option<Enrollment>>;
    async fn list_enrollments_by_class(&self, class_id: &str) -> Result<Vec<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        class_id: &str,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;
    async fn update_enrollment_status(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>>;
    // Marca linhas duplicadas como removed (dedup do reconciliador)
    async fn mark_enrollments_removed(&self, row_ids: &[i64]) -> Result<u64>;
    async fn get_active_enrollment_for_student(
        &self,
        student_id: &str,
    ) -> Result<Option<Enrollment>>;
    // Alunos ativos, da turma ou globais (class_id = None), deduplicados
    async fn list_active_student_ids(&self, class_id: Option<&str>) -> Result<Vec<String>>;

    /// Contadores por turma
    async fn get_class_counter(&self, class_id: &str) -> Result<Option<ClassCounter>>;
    // Sobrescrita de valor inteiro, nunca incremento
    async fn set_class_counter(&self, class_id: &str, students_count: i64)
    -> Result<ClassCounter>;
    // Correção de vários contadores em uma única transação
    async fn set_class_counters(&self, counters: &[(String, i64)]) -> Result<()>;
    // Todas as turmas conhecidas (matrículas ∪ contadores), ordenadas por id
    async fn list_class_ids(&self) -> Result<Vec<String>>;

    /// Módulos do curso
    async fn list_course_modules(&self) -> Result<Vec<CourseModule>>;
    async fn upsert_course_module(&self, module: &CourseModule) -> Result<CourseModule>;

    /// Snapshots de ranking
    async fn get_latest_ranking_snapshot(&self, scope: &str) -> Result<Option<RankingSnapshot>>;
    // Substitui o snapshot do escopo; a tabela mantém uma linha por escopo
    async fn upsert_ranking_snapshot(&self, snapshot: &RankingSnapshot) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
