pub mod build;
pub mod get;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::rankings::requests::RankingQueryParams;
use crate::storage::Storage;

pub struct RankingService {
    storage: Option<Arc<dyn Storage>>,
}

impl RankingService {
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

    // Leaderboard global ou de uma turma
    pub async fn get_ranking(
        &self,
        request: &HttpRequest,
        query: RankingQueryParams,
    ) -> ActixResult<HttpResponse> {
        get::get_ranking(self, request, query).await
    }
}
