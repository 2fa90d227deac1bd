pub mod aggregate;
pub mod best_attempt;
pub mod get;
pub mod normalize;
pub mod recompute;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::storage::Storage;

pub struct ScoringService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScoringService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Object cache not found in app data")
            .get_ref()
            .clone()
    }

    // Pontuação unificada de um aluno (storage, com cache como fallback)
    pub async fn get_unified_score(
        &self,
        request: &HttpRequest,
        student_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_unified_score(self, request, student_id).await
    }

    // Melhores tentativas por módulo de um aluno
    pub async fn list_module_best_scores(
        &self,
        request: &HttpRequest,
        student_id: String,
    ) -> ActixResult<HttpResponse> {
        get::list_module_best_scores(self, request, student_id).await
    }

    // Recomputação completa (melhores tentativas + pontuação unificada)
    pub async fn recompute_student(
        &self,
        request: &HttpRequest,
        student_id: String,
    ) -> ActixResult<HttpResponse> {
        recompute::recompute_student_handler(self, request, student_id).await
    }
}
