//! JSON request body extractor.
//!
//! Bodies are parsed only when the request declares `application/json` and
//! carries bytes. A missing body or any other content type yields the
//! payload's default, so absent fields reach the domain as `None` and the
//! endpoint's own schema message applies. Unparseable JSON is rejected with
//! the malformed-body message.

use std::future::Future;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, mime, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{DomainError, messages};

/// Request body decoded from JSON, or `T::default()` when none was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    /// Unwrap the decoded body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn declares_json(req: &HttpRequest) -> bool {
    match req.mime_type() {
        Ok(Some(content_type)) => {
            content_type.type_() == mime::APPLICATION && content_type.subtype() == mime::JSON
        }
        _ => false,
    }
}

impl<T> FromRequest for JsonBody<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = declares_json(req).then(|| web::Bytes::from_request(req, payload));
        Box::pin(decode(body, req.path().to_owned()))
    }
}

async fn decode<T, F>(body: Option<F>, path: String) -> Result<JsonBody<T>, actix_web::Error>
where
    T: DeserializeOwned + Default,
    F: Future<Output = Result<web::Bytes, actix_web::Error>>,
{
    let Some(body) = body else {
        return Ok(JsonBody(T::default()));
    };
    let bytes = body.await?;
    if bytes.is_empty() {
        return Ok(JsonBody(T::default()));
    }
    serde_json::from_slice(&bytes).map(JsonBody).map_err(|error| {
        debug!(error = %error, path = %path, "rejected request body");
        DomainError::bad_request(messages::MALFORMED_BODY).into()
    })
}
