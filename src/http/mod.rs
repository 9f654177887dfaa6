//! HTTP protocol layer module
//!
//! Response builders shared by the invocation path and the health endpoints.

pub mod response;

pub use response::{
    build_error_response, build_function_response, build_health_response, REQUEST_ID_HEADER,
};
