pub mod enroll;
pub mod list;
pub mod update_status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListParams, UpdateEnrollmentStatusRequest,
};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // Nova matrícula (nasce pending)
    pub async fn create_enrollment(
        &self,
        request: &HttpRequest,
        class_id: String,
        data: CreateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::create_enrollment(self, request, class_id, data).await
    }

    // Transição de status de uma matrícula
    pub async fn update_enrollment_status(
        &self,
        request: &HttpRequest,
        class_id: String,
        student_id: String,
        data: UpdateEnrollmentStatusRequest,
    ) -> ActixResult<HttpResponse> {
        update_status::update_enrollment_status(self, request, class_id, student_id, data).await
    }

    // Roster paginado de uma turma
    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        class_id: String,
        params: EnrollmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, request, class_id, params).await
    }
}
