use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;

const GREETING: &str =
    "AI Architect Mentor initialized. Ready to review your engineering roadmap.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
    System,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A citation attached to a search-grounded answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

/// What the router hands back for every chat call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterResponse {
    /// Never empty.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

impl ChatMessage {
    fn new(role: Role, text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text,
            timestamp: Utc::now(),
            attachment: None,
            grounding_chunks: None,
        }
    }

    /// The system line every transcript opens with.
    pub fn greeting() -> Self {
        Self::new(Role::System, GREETING.to_string())
    }

    pub fn user(text: impl Into<String>, attachment: Option<Attachment>) -> Self {
        Self {
            attachment,
            ..Self::new(Role::User, text.into())
        }
    }

    pub fn from_response(response: RouterResponse) -> Self {
        Self {
            grounding_chunks: response.grounding_chunks,
            ..Self::new(Role::Model, response.text)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    Tall,
    #[default]
    #[serde(rename = "16:9")]
    Wide,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Tall => "9:16",
            AspectRatio::Wide => "16:9",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_is_system_message() {
        let msg = ChatMessage::greeting();
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.text, GREETING);
        assert!(msg.attachment.is_none());
    }

    #[test]
    fn test_messages_get_distinct_ids() {
        let a = ChatMessage::user("hello", None);
        let b = ChatMessage::user("hello", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_from_response_keeps_grounding() {
        let chunks = vec![GroundingChunk {
            web: Some(WebSource {
                uri: Some("https://azure.microsoft.com".into()),
                title: None,
            }),
        }];
        let msg = ChatMessage::from_response(RouterResponse {
            text: "answer".into(),
            grounding_chunks: Some(chunks.clone()),
        });
        assert_eq!(msg.role, Role::Model);
        assert_eq!(msg.grounding_chunks, Some(chunks));
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let resp = RouterResponse {
            text: "ok".into(),
            grounding_chunks: Some(vec![GroundingChunk::default()]),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["groundingChunks"], serde_json::json!([{}]));

        let bare = RouterResponse {
            text: "ok".into(),
            grounding_chunks: None,
        };
        assert_eq!(
            serde_json::to_value(&bare).unwrap(),
            serde_json::json!({ "text": "ok" })
        );
    }

    #[test]
    fn test_role_and_aspect_ratio_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        let ratio: AspectRatio = serde_json::from_str("\"9:16\"").unwrap();
        assert_eq!(ratio, AspectRatio::Tall);
        assert_eq!(
            serde_json::to_string(&AspectRatio::Wide).unwrap(),
            format!("\"{}\"", AspectRatio::Wide.as_str())
        );
    }
}
