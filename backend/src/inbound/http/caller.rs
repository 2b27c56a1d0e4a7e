//! Caller identity extractor.
//!
//! Reads the identifier attached by [`crate::middleware::CallerIdentity`] so
//! handlers only deal with a validated [`UserId`].

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{DomainError, UserId};
use crate::middleware::InjectedCaller;

/// Raw caller identity of the current request, if any was attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(Option<String>);

impl Caller {
    /// Identity exactly as attached, before validation.
    pub fn raw(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Require a well-formed caller identity.
    ///
    /// A missing and a malformed identity are both reported as a bad request
    /// carrying `message`.
    pub fn require(&self, message: &'static str) -> Result<UserId, DomainError> {
        let Some(raw) = self.raw() else {
            debug!("request carries no caller identity");
            return Err(DomainError::bad_request(message));
        };
        UserId::new(raw).map_err(|err| {
            debug!(caller = raw, error = %err, "malformed caller identity");
            DomainError::bad_request(message)
        })
    }
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let caller = req
            .extensions()
            .get::<InjectedCaller>()
            .map(|caller| caller.as_str().to_owned());
        ready(Ok(Self(caller)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, messages};
    use crate::middleware::CallerIdentity;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use rstest::rstest;

    #[rstest]
    fn require_accepts_well_formed_identity() {
        let caller = Caller(Some("683c2711f588f756a662f7e9".to_owned()));
        let id = caller.require(messages::INVALID_USER_ID).expect("valid caller");
        assert_eq!(id.to_string(), "683c2711f588f756a662f7e9");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("not-an-id"))]
    #[case(Some(""))]
    fn require_rejects_missing_or_malformed_identity(#[case] raw: Option<&str>) {
        let caller = Caller(raw.map(str::to_owned));
        let err = caller
            .require(messages::MISSING_CALLER)
            .expect_err("caller rejected");
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), messages::MISSING_CALLER);
    }

    #[rstest]
    #[case(CallerIdentity::new("683c2711f588f756a662f7e9"), "683c2711f588f756a662f7e9")]
    #[case(CallerIdentity::anonymous(), "")]
    #[actix_web::test]
    async fn extracts_identity_attached_by_middleware(
        #[case] middleware: CallerIdentity,
        #[case] expected: &str,
    ) {
        let app = actix_test::init_service(App::new().wrap(middleware).route(
            "/",
            web::get().to(|caller: Caller| async move {
                HttpResponse::Ok().body(caller.raw().unwrap_or_default().to_owned())
            }),
        ))
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        let body = actix_test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), expected);
    }
}
