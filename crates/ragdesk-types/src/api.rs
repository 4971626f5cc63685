//! Wire types for the answer service.
//!
//! Field names follow the backend's camelCase JSON contract.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
///
/// `companyName` is omitted entirely in general mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Success body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Success body of `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub company_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_omits_absent_company() {
        let req = ChatRequest {
            query: "hello".to_string(),
            company_name: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "query": "hello" }));
    }

    #[test]
    fn test_chat_request_uses_camel_case() {
        let req = ChatRequest {
            query: "hello".to_string(),
            company_name: Some("Acme".to_string()),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"companyName\":\"Acme\""));
    }

    #[test]
    fn test_upload_response_parses_backend_body() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"message":"ok","companyName":"Acme Corp"}"#).unwrap();
        assert_eq!(parsed.company_name, "Acme Corp");
        assert_eq!(parsed.message, "ok");
    }

    #[test]
    fn test_chat_response_requires_answer() {
        assert!(serde_json::from_str::<ChatResponse>("{}").is_err());
    }
}
