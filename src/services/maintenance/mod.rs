pub mod retry;
pub mod run;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::reconciliation::requests::ReconcileRequest;
use crate::storage::Storage;

pub struct MaintenanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaintenanceService {
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

    // Reconciliação em lote (rosters, contadores e pontuações)
    pub async fn reconcile(
        &self,
        request: &HttpRequest,
        data: ReconcileRequest,
    ) -> ActixResult<HttpResponse> {
        run::reconcile_handler(self, request, data).await
    }
}
