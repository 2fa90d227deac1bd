//! Módulos do curso (configuração de pontuação)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_modules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub module_id: String,
    pub title: String,
    pub max_score: f64,
    // threshold específico do módulo; NULL usa o padrão da configuração
    pub passing_threshold: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course_module(self) -> crate::models::scores::entities::CourseModule {
        crate::models::scores::entities::CourseModule {
            module_id: self.module_id,
            title: self.title,
            max_score: self.max_score,
            passing_threshold: self.passing_threshold,
        }
    }
}
