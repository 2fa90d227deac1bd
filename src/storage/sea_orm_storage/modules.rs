//! Operações nos módulos do curso

use super::SeaOrmStorage;
use crate::entity::course_modules::{ActiveModel, Column, Entity as CourseModules};
use crate::errors::{AvaliaNutriError, Result};
use crate::models::scores::entities::CourseModule;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// Todos os módulos configurados, em ordem de id
    pub async fn list_course_modules_impl(&self) -> Result<Vec<CourseModule>> {
        let rows = CourseModules::find()
            .order_by_asc(Column::ModuleId)
            .all(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to list course modules: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_course_module()).collect())
    }

    /// Insere ou atualiza um módulo (semeadura no startup)
    pub async fn upsert_course_module_impl(&self, module: &CourseModule) -> Result<CourseModule> {
        let existing = CourseModules::find_by_id(module.module_id.clone())
            .one(&self.db)
            .await
            .map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to find course module: {e}"))
            })?;

        let active = ActiveModel {
            module_id: Set(module.module_id.clone()),
            title: Set(module.title.clone()),
            max_score: Set(module.max_score),
            passing_threshold: Set(module.passing_threshold),
        };

        let model = if existing.is_some() {
            active.update(&self.db).await.map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to update course module: {e}"))
            })?
        } else {
            active.insert(&self.db).await.map_err(|e| {
                AvaliaNutriError::database_operation(format!("Failed to insert course module: {e}"))
            })?
        };

        Ok(model.into_course_module())
    }
}
