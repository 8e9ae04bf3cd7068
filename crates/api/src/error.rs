use actix_web::{http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Errors returned to api clients. The response body is a json object with
/// the error `code` and a human readable `message`.
#[derive(Error, Debug)]
pub enum DillError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: {0}")]
    BadClientData(String),
    #[error("The request conflicts with the service state: {0}")]
    Conflict(String),
    #[error("Unauthorized request: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DillError {
    fn code(&self) -> &'static str {
        match self {
            Self::InternalError => "internal_error",
            Self::BadClientData(_) => "bad_request",
            Self::Conflict(_) => "conflict",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl actix_web::error::ResponseError for DillError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "code": self.code(),
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{body::to_bytes, ResponseError};

    #[actix_web::test]
    async fn renders_json_error_body() {
        let err = DillError::NotFound("Reminder: r1 was not found".into());
        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["message"], "Not found: Reminder: r1 was not found");
    }

    #[test]
    fn hides_internal_details() {
        assert_eq!(
            DillError::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(DillError::InternalError.to_string(), "Internal server error");
    }
}
