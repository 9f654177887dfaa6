//! HTTP response building module
//!
//! Maps function results and host failures onto hyper responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Response, StatusCode};

use crate::error::InvokeError;
use crate::function::FunctionResponse;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Convert the function's structured response into an HTTP response
///
/// Status, every header and the body are passed through untouched. The host only adds
/// `Server` and `X-Request-Id`. Anything the HTTP layer cannot represent is reported as
/// a malformed response rather than silently dropped.
pub fn build_function_response(
    resp: FunctionResponse,
    request_id: &str,
    server_name: &str,
) -> Result<Response<Full<Bytes>>, InvokeError> {
    let status = StatusCode::from_u16(resp.status_code).map_err(|_| {
        InvokeError::MalformedResponse(format!("invalid status code {}", resp.status_code))
    })?;

    let mut builder = Response::builder()
        .status(status)
        .header("Server", server_name)
        .header(REQUEST_ID_HEADER, request_id);

    for (name, value) in &resp.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| InvokeError::MalformedResponse(format!("header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| InvokeError::MalformedResponse(format!("header '{name}' value: {e}")))?;
        builder = builder.header(name, value);
    }

    builder
        .body(Full::new(Bytes::from(resp.body)))
        .map_err(|e| InvokeError::MalformedResponse(e.to_string()))
}

/// Build the gateway-style error response for a host failure
pub fn build_error_response(
    err: &InvokeError,
    request_id: Option<&str>,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let status = err.status();
    let message = status.canonical_reason().unwrap_or("Error");
    let body = serde_json::json!({ "message": message }).to_string();

    let mut builder = Response::builder()
        .status(status)
        .header("Server", server_name)
        .header("Content-Type", "application/json");
    if let Some(id) = request_id {
        builder = builder.header(REQUEST_ID_HEADER, id);
    }

    builder
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            internal_error()
        })
}

/// Build health check response
pub fn build_health_response(body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Cache-Control", "no-cache")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            internal_error()
        })
}

fn internal_error() -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::new()));
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{lambda_handler, InvocationContext, InvocationRequest};
    use http_body_util::BodyExt;
    use std::time::Duration;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_function_response_passthrough() {
        let fn_resp = lambda_handler(&InvocationRequest::empty(), &InvocationContext::default());
        let expected_body = fn_resp.body.clone();

        let resp = build_function_response(fn_resp, "req-1", "static-web-page/0.1").unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(resp.headers()[REQUEST_ID_HEADER], "req-1");
        assert_eq!(resp.headers()["server"], "static-web-page/0.1");
        assert_eq!(body_string(resp).await, expected_body);
    }

    #[test]
    fn test_invalid_header_name_is_malformed() {
        let mut fn_resp =
            lambda_handler(&InvocationRequest::null(), &InvocationContext::default());
        fn_resp
            .headers
            .insert("Bad Header".to_string(), "x".to_string());

        let err = build_function_response(fn_resp, "req-2", "test").unwrap_err();
        assert!(matches!(err, InvokeError::MalformedResponse(_)));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_invalid_header_value_is_malformed() {
        let mut fn_resp =
            lambda_handler(&InvocationRequest::null(), &InvocationContext::default());
        fn_resp
            .headers
            .insert("X-Note".to_string(), "line\nbreak".to_string());

        assert!(build_function_response(fn_resp, "req-3", "test").is_err());
    }

    #[test]
    fn test_invalid_status_is_malformed() {
        let mut fn_resp =
            lambda_handler(&InvocationRequest::null(), &InvocationContext::default());
        fn_resp.status_code = 42;
        assert!(build_function_response(fn_resp, "req-4", "test").is_err());
    }

    #[tokio::test]
    async fn test_error_response() {
        let err = InvokeError::Timeout(Duration::from_secs(3));
        let resp = build_error_response(&err, Some("req-5"), "test");
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()[REQUEST_ID_HEADER], "req-5");
        assert_eq!(body_string(resp).await, r#"{"message":"Gateway Timeout"}"#);
    }

    #[tokio::test]
    async fn test_health_response() {
        let resp = build_health_response("ok");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "ok");
    }
}
