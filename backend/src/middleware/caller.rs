//! Caller identity middleware.
//!
//! Every request is stamped with the configured caller identifier before it
//! reaches a handler, and runs inside an `http.request` span so logs emitted
//! while handling it carry the method and path.
//!
//! The identifier is stored verbatim; handlers that act on behalf of the
//! caller validate it through the `Caller` extractor.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, info_span};

/// Raw caller identifier attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedCaller(Arc<str>);

impl InjectedCaller {
    /// Identifier exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Middleware attaching the configured caller identity to each request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use mesto::middleware::CallerIdentity;
///
/// let _app = App::new().wrap(CallerIdentity::new("683c2711f588f756a662f7e9"));
/// ```
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    caller: Option<Arc<str>>,
}

impl CallerIdentity {
    /// Attach `caller` to every request.
    pub fn new(caller: impl Into<Arc<str>>) -> Self {
        Self {
            caller: Some(caller.into()),
        }
    }

    /// Attach nothing; operations that need a caller reject the request.
    pub fn anonymous() -> Self {
        Self { caller: None }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CallerIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CallerIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CallerIdentityMiddleware {
            service,
            caller: self.caller.clone(),
        }))
    }
}

/// Service wrapper produced by [`CallerIdentity`].
///
/// Applications should not use this type directly.
pub struct CallerIdentityMiddleware<S> {
    service: S,
    caller: Option<Arc<str>>,
}

impl<S, B> Service<ServiceRequest> for CallerIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = info_span!(
            "http.request",
            method = %req.method(),
            path = %req.path(),
        );
        if let Some(caller) = &self.caller {
            req.extensions_mut().insert(InjectedCaller(Arc::clone(caller)));
        }
        let fut = self.service.call(req);
        Box::pin(
            async move {
                let res = fut.await?;
                debug!(status = res.status().as_u16(), "request completed");
                Ok(res)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpRequest, HttpResponse, web};
    use rstest::rstest;

    async fn echo_caller(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<InjectedCaller>() {
            Some(caller) => HttpResponse::Ok().body(caller.as_str().to_owned()),
            None => HttpResponse::NoContent().finish(),
        }
    }

    #[rstest]
    #[case::configured(
        CallerIdentity::new("683c2711f588f756a662f7e9"),
        Some("683c2711f588f756a662f7e9")
    )]
    #[case::verbatim(CallerIdentity::new("not-an-id"), Some("not-an-id"))]
    #[case::anonymous(CallerIdentity::anonymous(), None)]
    #[actix_web::test]
    async fn injects_configured_caller(
        #[case] middleware: CallerIdentity,
        #[case] expected: Option<&str>,
    ) {
        let app = actix_test::init_service(
            App::new()
                .wrap(middleware)
                .route("/", web::get().to(echo_caller)),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        let body = actix_test::read_body(res).await;
        let observed = std::str::from_utf8(&body).expect("utf8 body");
        assert_eq!(observed, expected.unwrap_or_default());
    }
}
