//! Request correlation middleware.
//!
//! Every request runs inside a fresh [`TraceId`] scope and a `request` span
//! carrying that id, its method, and its path. The id is echoed back in the
//! `trace-id` header and a single completion event records status and
//! latency.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, info, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap the whole app with it.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use devhub::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, inner: S) -> Self::Future {
        ready(Ok(TraceMiddleware { inner }))
    }
}

/// Per-worker service produced by [`Trace`].
#[derive(Debug)]
pub struct TraceMiddleware<S> {
    inner: S,
}

fn echo_header<B>(res: &mut ServiceResponse<B>, id: TraceId) {
    match HeaderValue::try_from(id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => warn!(%error, "trace id is not a valid header value"),
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = TraceId::generate();
        let span = info_span!(
            "request",
            trace_id = %id,
            method = %req.method(),
            path = req.path(),
        );
        let started = Instant::now();
        let handled = TraceId::scope(id, self.inner.call(req));

        Box::pin(
            async move {
                let mut res = handled.await?;
                echo_header(&mut res, id);
                info!(
                    status = res.status().as_u16(),
                    elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "request completed"
                );
                Ok(res)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use actix_web::{App, HttpResponse, test, web};

    fn header(res: &ServiceResponse) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace-id header")
    }

    #[actix_web::test]
    async fn handlers_see_the_echoed_id() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
                HttpResponse::Ok().body(id)
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let echoed = header(&res);
        let body = test::read_body(res).await;
        assert_eq!(body, echoed.as_bytes());
    }

    #[actix_web::test]
    async fn domain_errors_are_stamped_and_redacted() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                Err::<HttpResponse, _>(DomainError::internal("document store unavailable"))
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let echoed = header(&res);
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(echoed.as_str()));
        assert_eq!(body.message(), "Internal server error");
    }

    #[actix_web::test]
    async fn unmatched_routes_still_get_an_id() {
        let app = test::init_service(App::new().wrap(Trace)).await;

        let first = test::call_service(&app, test::TestRequest::get().uri("/a").to_request()).await;
        let second =
            test::call_service(&app, test::TestRequest::get().uri("/b").to_request()).await;

        assert_eq!(first.status(), actix_web::http::StatusCode::NOT_FOUND);
        assert_ne!(header(&first), header(&second));
    }
}
