//! Function invocation
//!
//! Runs the function on the blocking pool under the configured time limit, the way a
//! platform sandbox would: a stuck or crashing function cannot take a connection task
//! down with it.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppState;
use crate::error::InvokeError;
use crate::function::{FunctionResponse, InvocationRequest};
use crate::handler::event;

pub async fn run_with_timeout<F>(f: F, limit: Duration) -> Result<FunctionResponse, InvokeError>
where
    F: FnOnce() -> FunctionResponse + Send + 'static,
{
    match tokio::time::timeout(limit, tokio::task::spawn_blocking(f)).await {
        Ok(Ok(resp)) => Ok(resp),
        Ok(Err(join_err)) => {
            let reason = if join_err.is_panic() {
                "function panicked".to_string()
            } else {
                join_err.to_string()
            };
            Err(InvokeError::Crashed(reason))
        }
        Err(_) => Err(InvokeError::Timeout(limit)),
    }
}

/// Invoke the configured function once with a ready-made event, outside of HTTP
pub async fn invoke_event(
    state: &Arc<AppState>,
    request: InvocationRequest,
) -> Result<FunctionResponse, InvokeError> {
    let now_ms = chrono::Utc::now().timestamp_millis();
    let context = event::build_context(&state.config.function, state.next_request_id(), now_ms);
    let responder = state.responder;
    let limit = Duration::from_secs(state.config.function.timeout_secs);
    run_with_timeout(move || responder.invoke(&request, &context), limit).await
}

/// Read the event for a one-shot invocation; no path means a null event
pub fn load_event(path: Option<&Path>) -> Result<InvocationRequest, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(InvocationRequest::null());
    };
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_event(&raw)?)
}

fn parse_event(raw: &str) -> Result<InvocationRequest, InvokeError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::function::{lambda_handler, InvocationContext};

    #[tokio::test]
    async fn test_completes_within_limit() {
        let resp = run_with_timeout(
            || lambda_handler(&InvocationRequest::null(), &InvocationContext::default()),
            Duration::from_secs(3),
        )
        .await
        .unwrap();
        assert_eq!(resp.status_code, 200);
    }

    #[tokio::test]
    async fn test_timeout() {
        let result = run_with_timeout(
            || {
                std::thread::sleep(Duration::from_millis(200));
                lambda_handler(&InvocationRequest::null(), &InvocationContext::default())
            },
            Duration::from_millis(10),
        )
        .await;
        assert!(matches!(result, Err(InvokeError::Timeout(d)) if d == Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_panic_is_contained() {
        let result = run_with_timeout(
            || -> FunctionResponse { panic!("boom") },
            Duration::from_secs(1),
        )
        .await;
        assert!(matches!(result, Err(InvokeError::Crashed(_))));
    }

    #[tokio::test]
    async fn test_invoke_event_null_and_empty_match() {
        let cfg = Config::load_from("/nonexistent/static-web-page-config").unwrap();
        let state = Arc::new(AppState::new(&cfg));
        let null = invoke_event(&state, InvocationRequest::null()).await.unwrap();
        let empty = invoke_event(&state, InvocationRequest::empty()).await.unwrap();
        assert_eq!(null, empty);
        assert_eq!(null.to_json().unwrap(), empty.to_json().unwrap());
        assert_eq!(state.invocation_count(), 2);
    }

    fn write_event(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "static-web-page-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_event_file_invokes_function() {
        let path = write_event("event", r#"{"rawPath": "/orders", "body": null}"#);
        let request = load_event(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(request.0.as_ref().unwrap()["rawPath"], "/orders");

        let cfg = Config::load_from("/nonexistent/static-web-page-config").unwrap();
        let state = Arc::new(AppState::new(&cfg));
        let from_file = invoke_event(&state, request).await.unwrap();
        let from_null = invoke_event(&state, load_event(None).unwrap()).await.unwrap();
        assert_eq!(from_file.status_code, 200);
        assert_eq!(from_file, from_null);
    }

    #[test]
    fn test_malformed_event_file_is_bad_request() {
        let path = write_event("malformed", "{\"rawPath\": ");
        let err = load_event(Some(path.as_path())).unwrap_err();
        std::fs::remove_file(&path).ok();

        let invoke_err = err.downcast_ref::<InvokeError>().unwrap();
        assert!(matches!(invoke_err, InvokeError::Event(_)));
        assert_eq!(invoke_err.status(), hyper::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_event_file() {
        let err = load_event(Some(Path::new("/nonexistent/static-web-page-event.json"))).unwrap_err();
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
