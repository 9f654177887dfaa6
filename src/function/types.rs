// Invocation contract types
// Shapes exchanged between the hosting platform and the function

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured response handed back to the platform
///
/// Serializes as `{"statusCode": .., "headers": {..}, "body": ".."}`. Headers live in an
/// ordered map so repeated invocations serialize to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl FunctionResponse {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Trigger event supplied by the platform
///
/// `None` stands for a null event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationRequest(pub Option<Value>);

impl InvocationRequest {
    pub const fn null() -> Self {
        Self(None)
    }

    pub fn empty() -> Self {
        Self(Some(Value::Object(serde_json::Map::new())))
    }

    pub const fn from_value(value: Value) -> Self {
        Self(Some(value))
    }
}

/// Execution environment metadata supplied by the platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub memory_limit_mb: u32,
    /// Milliseconds since the Unix epoch
    pub deadline_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_names() {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());
        let resp = FunctionResponse {
            status_code: 200,
            headers,
            body: "<html></html>".to_string(),
        };
        let value: Value = serde_json::from_str(&resp.to_json().unwrap()).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], "text/html");
        assert_eq!(value["body"], "<html></html>");
    }

    #[test]
    fn test_request_null_and_empty() {
        assert_eq!(serde_json::to_string(&InvocationRequest::null()).unwrap(), "null");
        assert_eq!(serde_json::to_string(&InvocationRequest::empty()).unwrap(), "{}");
        let parsed: InvocationRequest = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, InvocationRequest::null());
    }
}
