//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent `{ "message" }` bodies
//! and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, ErrorCode, messages};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

/// Error payload returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Localised, human-readable description.
    #[schema(example = "Ресурс не найден")]
    pub message: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &DomainError) -> ErrorBody {
    let message = if matches!(error.code(), ErrorCode::InternalError) {
        messages::SERVER_ERROR
    } else {
        error.message()
    };
    ErrorBody {
        message: message.to_owned(),
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(error = %self, "internal error redacted from response");
        }
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

/// Fallback handler for unmatched method and path pairs.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(DomainError::not_found(messages::RESOURCE_NOT_FOUND))
}

#[cfg(test)]
mod tests;
