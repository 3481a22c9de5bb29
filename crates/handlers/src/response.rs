use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const CONTENT_TYPE: &str = "Content-Type";

/// HTTP-style handler result.
///
/// Serialises in the API-Gateway proxy shape
/// (`{"statusCode", "headers", "body"}`) with the body as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    /// A JSON response carrying the open CORS and JSON content-type headers.
    pub fn json(status_code: u16, body: &serde_json::Value) -> Self {
        let headers = BTreeMap::from([
            (ACCESS_CONTROL_ALLOW_ORIGIN.to_owned(), "*".to_owned()),
            (CONTENT_TYPE.to_owned(), "application/json".to_owned()),
        ]);
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn ok(body: &serde_json::Value) -> Self {
        Self::json(200, body)
    }

    pub fn internal_error(body: &serde_json::Value) -> Self {
        Self::json(500, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_response_carries_cors_and_content_type() {
        let resp = HandlerResponse::ok(&json!({"a": 1}));
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(resp.headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(resp.body, r#"{"a":1}"#);
        assert!(resp.is_success());
    }

    #[test]
    fn serialises_in_proxy_shape() {
        let resp = HandlerResponse::internal_error(&json!({"message": "boom"}));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["statusCode"], 500);
        assert_eq!(value["body"], r#"{"message":"boom"}"#);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert!(!resp.is_success());
    }
}
