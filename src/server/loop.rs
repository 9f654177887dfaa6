// Server loop module
// Accepts connections until a shutdown is requested

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::Instant;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Poll interval while waiting for open connections to finish
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections on `listener` until `state.shutdown` is notified.
///
/// On shutdown the listener is closed, open connections are told to finish the request
/// they are serving, and the loop returns once none are left or
/// `performance.write_timeout` has passed.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>) {
    let shutdown = Arc::clone(&state.shutdown);
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.notified() => {
                logger::log_shutdown(state.active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }
    drop(listener);

    state.begin_drain();
    let grace = Duration::from_secs(state.config.performance.write_timeout);
    let remaining = drain_connections(&state, grace).await;
    if remaining == 0 {
        logger::log_info("All connections closed");
    } else {
        logger::log_warning(&format!(
            "Giving up on {remaining} connection(s) after {} seconds",
            grace.as_secs()
        ));
    }
}

/// Wait until no connection is open or `grace` has passed; returns the count still open
async fn drain_connections(state: &AppState, grace: Duration) -> usize {
    let deadline = Instant::now() + grace;
    loop {
        let open = state.active_connections.load(Ordering::SeqCst);
        if open == 0 || Instant::now() >= deadline {
            return open;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
