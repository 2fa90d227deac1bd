//! Extratores de parâmetros de caminho com validação

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_entity_id;

fn extract_validated_id(
    request: &HttpRequest,
    name: &str,
) -> Result<String, actix_web::Error> {
    let value = request.match_info().get(name).unwrap_or("");
    match validate_entity_id(value) {
        Ok(()) => Ok(value.to_string()),
        Err(reason) => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid {name}: {reason}"),
            ));
            Err(InternalError::from_response(reason, response).into())
        }
    }
}

/// student_id validado extraído do caminho
pub struct SafeStudentId(pub String);

impl FromRequest for SafeStudentId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(request: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_validated_id(request, "student_id").map(SafeStudentId))
    }
}

/// class_id validado extraído do caminho
pub struct SafeClassId(pub String);

impl FromRequest for SafeClassId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(request: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_validated_id(request, "class_id").map(SafeClassId))
    }
}
