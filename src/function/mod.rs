//! Static page function
//!
//! The cloud-function handler and the invocation contract types it speaks.
//! Nothing here performs I/O or keeps state between calls.

pub mod page;
pub mod responder;
pub mod types;

pub use page::PageVariant;
pub use responder::{lambda_handler, StaticPageResponder};
pub use types::{FunctionResponse, InvocationContext, InvocationRequest};
