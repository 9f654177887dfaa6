// Application state module
// Runtime state shared by every connection task

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Notify};

use super::types::Config;
use crate::function::StaticPageResponder;

/// Application state
pub struct AppState {
    pub config: Config,
    pub responder: StaticPageResponder,
    pub active_connections: AtomicUsize,
    pub shutdown: Arc<Notify>,

    // Monotonic sequence used to mint request ids
    invocation_seq: AtomicU64,
    // Flipped once on shutdown; connection tasks watch it to stop keep-alive
    draining: watch::Sender<bool>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            responder: StaticPageResponder::new(config.function.variant),
            active_connections: AtomicUsize::new(0),
            shutdown: Arc::new(Notify::new()),
            invocation_seq: AtomicU64::new(0),
            draining: watch::channel(false).0,
        }
    }

    /// Ask every open connection to finish its current request and close
    pub fn begin_drain(&self) {
        self.draining.send_replace(true);
    }

    pub fn drain_receiver(&self) -> watch::Receiver<bool> {
        self.draining.subscribe()
    }

    /// Mint a request id unique within this process: `<hex millis>-<hex sequence>`
    pub fn next_request_id(&self) -> String {
        let seq = self.invocation_seq.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();
        format!("{millis:x}-{seq:08x}")
    }

    /// Number of invocations handed out so far
    pub fn invocation_count(&self) -> u64 {
        self.invocation_seq.load(Ordering::Relaxed)
    }
}
