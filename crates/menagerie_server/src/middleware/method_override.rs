//! POST-to-verb rewriting for HTML forms.
//!
//! Browsers only submit GET and POST. A POST carrying `_method=PUT` (or
//! PATCH / DELETE) in its query string or URL-encoded body is rewritten to
//! that verb before routing. The body is buffered only when the query does
//! not already name a method, and is re-attached unchanged.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use log::{debug, warn};
use tower::{Layer, Service};

/// Name of the override field.
pub const METHOD_FIELD: &str = "_method";

/// Largest body buffered while looking for the override field.
pub const MAX_BUFFERED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Tower `Layer` that applies method override before the inner service.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodOverrideLayer;

impl MethodOverrideLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for MethodOverrideLayer {
    type Service = MethodOverride<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MethodOverride { inner }
    }
}

/// Tower `Service` that rewrites overridden POST requests.
#[derive(Debug, Clone)]
pub struct MethodOverride<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for MethodOverride<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let req = match apply_override(req).await {
                Ok(req) => req,
                Err(response) => return Ok(response),
            };
            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}

async fn apply_override(req: Request<Body>) -> Result<Request<Body>, Response> {
    if req.method() != Method::POST {
        return Ok(req);
    }

    if let Some(method) = req.uri().query().and_then(|query| find_override(query.as_bytes())) {
        return Ok(rewrite(req, method));
    }

    if !is_form_encoded(&req) {
        return Ok(req);
    }

    let (parts, body) = req.into_parts();
    let bytes: Bytes = match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("event=method_override module=server status=error error={err}");
            return Err((StatusCode::BAD_REQUEST, "unreadable request body").into_response());
        }
    };
    let method = find_override(&bytes);
    let req = Request::from_parts(parts, Body::from(bytes));

    Ok(match method {
        Some(method) => rewrite(req, method),
        None => req,
    })
}

fn rewrite(mut req: Request<Body>, method: Method) -> Request<Body> {
    debug!(
        "event=method_override module=server status=ok from=POST to={} path={}",
        method,
        req.uri().path()
    );
    *req.method_mut() = method;
    req
}

fn is_form_encoded(req: &Request<Body>) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
        .unwrap_or(false)
}

/// Returns the first `_method` value naming a supported verb.
fn find_override(encoded: &[u8]) -> Option<Method> {
    url::form_urlencoded::parse(encoded)
        .find(|(key, _)| key == METHOD_FIELD)
        .and_then(|(_, value)| parse_override(&value))
}

fn parse_override(value: &str) -> Option<Method> {
    match value.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    /// Echoes the method the inner service observed, plus the body.
    #[derive(Clone)]
    struct EchoService;

    impl Service<Request<Body>> for EchoService {
        type Response = Response;
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Body>) -> Self::Future {
            Box::pin(async move {
                let method = req.method().to_string();
                let body = to_bytes(req.into_body(), usize::MAX).await.unwrap();
                let text = format!("{method} {}", String::from_utf8_lossy(&body));
                Ok(text.into_response())
            })
        }
    }

    async fn observed(req: Request<Body>) -> String {
        let resp = MethodOverrideLayer::new()
            .layer(EchoService)
            .oneshot(req)
            .await
            .unwrap();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn query_override_rewrites_post() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/animals/1?_method=put")
            .body(Body::empty())
            .unwrap();
        assert_eq!(observed(req).await, "PUT ");
    }

    #[tokio::test]
    async fn body_override_rewrites_post_and_preserves_body() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/animals/1")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("_method=DELETE&species=Dodo"))
            .unwrap();
        assert_eq!(observed(req).await, "DELETE _method=DELETE&species=Dodo");
    }

    #[tokio::test]
    async fn non_post_requests_are_untouched() {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/animals?_method=DELETE")
            .body(Body::empty())
            .unwrap();
        assert_eq!(observed(req).await, "GET ");
    }

    #[tokio::test]
    async fn unsupported_override_is_ignored() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/animals?_method=CONNECT")
            .body(Body::empty())
            .unwrap();
        assert_eq!(observed(req).await, "POST ");
    }

    #[test]
    fn is_form_encoded_accepts_charset_suffix() {
        let req = Request::builder()
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded; charset=UTF-8",
            )
            .body(Body::empty())
            .unwrap();
        assert!(is_form_encoded(&req));
    }
}
