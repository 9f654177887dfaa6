//! Static page responder
//!
//! The function proper. It ignores the request and context it is handed and returns the
//! configured page with status 200 on every call.

use std::collections::BTreeMap;

use super::page::PageVariant;
use super::types::{FunctionResponse, InvocationContext, InvocationRequest};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticPageResponder {
    variant: PageVariant,
}

impl StaticPageResponder {
    pub const fn new(variant: PageVariant) -> Self {
        Self { variant }
    }

    pub const fn variant(&self) -> PageVariant {
        self.variant
    }

    /// Build the response for one invocation. Never fails.
    pub fn invoke(
        &self,
        _request: &InvocationRequest,
        _context: &InvocationContext,
    ) -> FunctionResponse {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Content-Type".to_string(),
            self.variant.content_type().to_string(),
        );

        FunctionResponse {
            status_code: 200,
            headers,
            body: self.variant.html().to_string(),
        }
    }
}

/// Platform-style entry point using the default page
pub fn lambda_handler(
    request: &InvocationRequest,
    context: &InvocationContext,
) -> FunctionResponse {
    StaticPageResponder::default().invoke(request, context)
}
