//! Request dispatch module
//!
//! Entry point for HTTP request processing: health probes are answered by the host,
//! every other request becomes one function invocation.

use crate::config::AppState;
use crate::error::InvokeError;
use crate::function::{FunctionResponse, InvocationContext, InvocationRequest};
use crate::handler::{event, invoke};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let responder = state.responder;
    dispatch(req, peer_addr, state, move |request, context| {
        responder.invoke(&request, &context)
    })
    .await
}

/// Answer health probes, otherwise run `function` once for the request
async fn dispatch<B, F>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    function: F,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    F: FnOnce(InvocationRequest, InvocationContext) -> FunctionResponse + Send + 'static,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = http_version_label(parts.version);
    entry.user_agent = parts
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = if let Some(resp) = check_health(parts.uri.path(), &state) {
        resp
    } else {
        let request_id = state.next_request_id();
        entry.request_id = Some(request_id.clone());
        match invoke_function(&parts, body, peer_addr, &request_id, &state, function).await {
            Ok(resp) => resp,
            Err(err) => {
                logger::log_warning(&format!("Invocation {request_id} failed: {err}"));
                http::build_error_response(&err, Some(&request_id), &state.config.http.server_name)
            }
        }
    };

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn check_health(path: &str, state: &AppState) -> Option<Response<Full<Bytes>>> {
    let health = &state.config.health;
    if !health.enabled {
        return None;
    }
    if path == health.liveness_path || path == health.readiness_path {
        return Some(http::build_health_response("ok"));
    }
    None
}

async fn invoke_function<B, F>(
    parts: &hyper::http::request::Parts,
    body: B,
    peer_addr: SocketAddr,
    request_id: &str,
    state: &Arc<AppState>,
    function: F,
) -> Result<Response<Full<Bytes>>, InvokeError>
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    F: FnOnce(InvocationRequest, InvocationContext) -> FunctionResponse + Send + 'static,
{
    let max_body_size = state.config.http.max_body_size;
    check_content_length(parts, max_body_size)?;
    let body = read_body(body, max_body_size).await?;

    let now_ms = chrono::Utc::now().timestamp_millis();
    let request = event::build_event(parts, &body, peer_addr, request_id, now_ms);
    let context = event::build_context(&state.config.function, request_id.to_string(), now_ms);

    let limit = Duration::from_secs(state.config.function.timeout_secs);
    let invoked = Instant::now();
    let fn_resp = invoke::run_with_timeout(move || function(request, context), limit).await?;

    logger::log_invocation(
        request_id,
        &state.config.function.name,
        fn_resp.status_code,
        invoked.elapsed(),
    );

    http::build_function_response(fn_resp, request_id, &state.config.http.server_name)
}

/// Reject early when the declared Content-Length is already over the limit
fn check_content_length(
    parts: &hyper::http::request::Parts,
    max_body_size: u64,
) -> Result<(), InvokeError> {
    let Some(value) = parts.headers.get("content-length") else {
        return Ok(());
    };
    match value.to_str().ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(size) if size > max_body_size => Err(InvokeError::BodyTooLarge {
            size,
            max: max_body_size,
        }),
        Some(_) => Ok(()),
        None => {
            logger::log_warning("Invalid Content-Length header, skipping size check");
            Ok(())
        }
    }
}

async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, InvokeError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(InvokeError::BodyTooLarge {
                size: max_body_size.saturating_add(1),
                max: max_body_size,
            })
        }
        Err(err) => Err(InvokeError::BodyRead(err.to_string())),
    }
}

fn http_version_label(version: hyper::Version) -> String {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
    .to_string()
}
