//! Invocation event building
//!
//! Turns an HTTP request into the opaque event and context a platform hands a function.
//! The event follows the HTTP API payload format 2.0 shape.

use hyper::http::request::Parts;
use serde_json::{json, Map, Value};
use std::net::SocketAddr;

use crate::config::FunctionConfig;
use crate::function::{InvocationContext, InvocationRequest};

/// Build the proxy event for one request
///
/// Repeated headers are joined with `,`. Header names are lower-cased by `http` already.
/// Bodies that are not valid UTF-8 are passed lossily, since nothing downstream reads them.
pub fn build_event(
    parts: &Parts,
    body: &[u8],
    peer_addr: SocketAddr,
    request_id: &str,
    time_epoch_ms: i64,
) -> InvocationRequest {
    let mut headers = Map::new();
    for name in parts.headers.keys() {
        let joined = parts
            .headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        headers.insert(name.as_str().to_string(), Value::String(joined));
    }

    let body = if body.is_empty() {
        Value::Null
    } else {
        Value::String(String::from_utf8_lossy(body).into_owned())
    };

    InvocationRequest::from_value(json!({
        "version": "2.0",
        "rawPath": parts.uri.path(),
        "rawQueryString": parts.uri.query().unwrap_or(""),
        "headers": headers,
        "requestContext": {
            "requestId": request_id,
            "timeEpoch": time_epoch_ms,
            "http": {
                "method": parts.method.as_str(),
                "path": parts.uri.path(),
                "protocol": format!("{:?}", parts.version),
                "sourceIp": peer_addr.ip().to_string(),
            },
        },
        "body": body,
        "isBase64Encoded": false,
    }))
}

/// Build the execution context for one invocation
pub fn build_context(
    function: &FunctionConfig,
    request_id: String,
    now_ms: i64,
) -> InvocationContext {
    let timeout_ms = i64::try_from(function.timeout_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
    InvocationContext {
        request_id,
        function_name: function.name.clone(),
        memory_limit_mb: function.memory_limit_mb,
        deadline_ms: now_ms.saturating_add(timeout_ms),
    }
}
