//! Data Transfer Objects - request/response types for the editor API.

use serde::{Deserialize, Serialize};

/// A post as submitted by the editor, for both create and update.
///
/// `url` and `title` are required; the rest may be missing or null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// A stored post as returned to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub author: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_defaults_optional_fields() {
        let payload: PostPayload = serde_json::from_str(r#"{"url":"a","title":"T"}"#).unwrap();

        assert_eq!(payload.url, "a");
        assert_eq!(payload.title, "T");
        assert!(payload.content.is_none());
        assert!(payload.description.is_none());
        assert!(payload.author.is_none());
    }

    #[test]
    fn test_payload_accepts_null_content() {
        let payload: PostPayload =
            serde_json::from_str(r#"{"url":"a","title":"T","content":null,"author":null}"#)
                .unwrap();

        assert!(payload.content.is_none());
        assert!(payload.author.is_none());
    }

    #[test]
    fn test_payload_requires_url() {
        let result = serde_json::from_str::<PostPayload>(r#"{"title":"T"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = PostResponse {
            id: "1".to_string(),
            url: "a".to_string(),
            title: "T".to_string(),
            description: None,
            content: String::new(),
            author: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
