//! A cloud function that always answers with a fixed HTML page, plus a small local host
//! that speaks the platform's invocation contract over HTTP.

pub mod cli;
pub mod config;
pub mod error;
pub mod function;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use function::{
    lambda_handler, FunctionResponse, InvocationContext, InvocationRequest, PageVariant,
    StaticPageResponder,
};
