//! Request handler module
//!
//! Plays the hosting platform: builds the invocation event and context, runs the
//! function and maps its response back onto HTTP.

pub mod event;
pub mod invoke;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
