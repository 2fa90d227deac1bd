//! Operações de matrícula

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{AvaliaNutriError, Result};
use crate::models::{
    PaginationInfo,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::EnrollmentListQuery,
        responses::EnrollmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::BTreeSet;

impl SeaOrmStorage {
    /// Cria uma matrícula com status pending
    pub async fn create_enrollment_impl(
        &self,
        class_id: &str,
        student_id: &str,
    ) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id.to_string()),
            class_id: Set(class_id.to_string()),
            status: Set(EnrollmentStatus::Pending.to_string()),
            enrolled_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to create enrollment: {e}"))
        })?;

        Ok(result.into_enrollment())
    }

    /// Matrícula mais recente não-removida do par (turma, aluno)
    pub async fn get_enrollment_impl(
        &self,
        class_id: &str,
        student_id: &str,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.ne(EnrollmentStatus::Removed.to_string()))
            .order_by_desc(Column::EnrolledAt)
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to get enrollment: {e}"))
            })?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// Todas as linhas de matrícula de uma turma (inclusive removidas,
    /// para o reconciliador enxergar duplicatas e histórico)
    pub async fn list_enrollments_by_class_impl(&self, class_id: &str) -> Result<Vec<Enrollment>> {
        let rows = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list enrollments: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// Roster paginado de uma turma
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        class_id: &str,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Enrollments::find().filter(Column::ClassId.eq(class_id));

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_asc(Column::StudentId);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to count enrollments: {e}"))
        })?;
        let total_pages = paginator.num_pages().await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to count enrollment pages: {e}"))
        })?;

        let items: Vec<Enrollment> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to fetch enrollments: {e}"))
            })?
            .into_iter()
            .map(|m| m.into_enrollment())
            .collect();

        Ok(EnrollmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: total_pages as i64,
            },
        })
    }

    /// Atualiza o status de uma linha de matrícula
    pub async fn update_enrollment_status_impl(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        let existing = Enrollments::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to find enrollment: {e}"))
            })?;

        let Some(row) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = row.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active.update(&self.db).await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to update enrollment: {e}"))
        })?;

        Ok(Some(updated.into_enrollment()))
    }

    /// Marca linhas duplicadas como removed
    pub async fn mark_enrollments_removed_impl(&self, row_ids: &[i64]) -> Result<u64> {
        if row_ids.is_empty() {
            return Ok(0);
        }

        let result = Enrollments::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(EnrollmentStatus::Removed.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.is_in(row_ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to mark enrollments removed: {e}"
                ))
            })?;

        Ok(result.rows_affected)
    }

    /// Matrícula ativa mais recente de um aluno (para derivar class_id)
    pub async fn get_active_enrollment_for_student_impl(
        &self,
        student_id: &str,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .order_by_desc(Column::EnrolledAt)
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!(
                    "Failed to get active enrollment: {e}"
                ))
            })?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// Alunos ativos da turma (ou globais), deduplicados e ordenados
    pub async fn list_active_student_ids_impl(
        &self,
        class_id: Option<&str>,
    ) -> Result<Vec<String>> {
        let mut select = Enrollments::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .distinct();

        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let ids: Vec<String> = select.into_tuple().all(&self.db).await.map_err(|e| {
            AvaliaNutriError::database_operation(format!("Failed to list active students: {e}"))
        })?;

        let ids: BTreeSet<String> = ids.into_iter().collect();
        Ok(ids.into_iter().collect())
    }
}
