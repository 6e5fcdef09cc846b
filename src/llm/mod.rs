pub mod gemini;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{AspectRatio, GroundingChunk};

/// Raw binary content carried alongside text in a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded payload.
    pub data: String,
}

impl InlineData {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    InlineData(InlineData),
    Text(String),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text(text) => Some(text),
            ContentPart::InlineData(_) => None,
        }
    }

    pub fn as_inline_data(&self) -> Option<&InlineData> {
        match self {
            ContentPart::InlineData(data) => Some(data),
            ContentPart::Text(_) => None,
        }
    }
}

/// Tool capabilities a request can enable on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    GoogleSearch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub aspect_ratio: AspectRatio,
    /// Output resolution hint such as "1K"; not every image model accepts it.
    pub image_size: Option<String>,
}

/// A single provider-neutral "generate content" call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub parts: Vec<ContentPart>,
    pub system_instruction: Option<String>,
    pub temperature: Option<f32>,
    pub tools: Vec<Tool>,
    pub image_config: Option<ImageConfig>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, parts: Vec<ContentPart>) -> Self {
        Self {
            model: model.into(),
            parts,
            system_instruction: None,
            temperature: None,
            tools: Vec::new(),
            image_config: None,
        }
    }

    pub fn has_tool(&self, tool: Tool) -> bool {
        self.tools.contains(&tool)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub parts: Vec<ContentPart>,
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, `None` when it carries no text.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .parts
            .iter()
            .filter_map(ContentPart::as_text)
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn grounding_chunks(&self) -> Option<Vec<GroundingChunk>> {
        self.candidates.first()?.grounding_chunks.clone()
    }

    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .parts
            .iter()
            .find_map(ContentPart::as_inline_data)
    }
}

/// The generative service the router talks to.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate_content(
        &self,
        credential: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Serialize for LlmError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WebSource;

    fn response(parts: Vec<ContentPart>) -> GenerateResponse {
        GenerateResponse {
            candidates: vec![Candidate {
                parts,
                grounding_chunks: None,
            }],
        }
    }

    #[test]
    fn test_text_joins_text_parts_of_first_candidate() {
        let resp = response(vec![
            ContentPart::text("Use "),
            ContentPart::InlineData(InlineData {
                mime_type: "image/png".into(),
                data: "AAAA".into(),
            }),
            ContentPart::text("Semantic Kernel."),
        ]);
        assert_eq!(resp.text().as_deref(), Some("Use Semantic Kernel."));
    }

    #[test]
    fn test_text_is_none_without_candidates_or_text() {
        assert_eq!(GenerateResponse::default().text(), None);
        assert_eq!(response(vec![ContentPart::text("")]).text(), None);
    }

    #[test]
    fn test_grounding_chunks_come_from_first_candidate() {
        let chunk = GroundingChunk {
            web: Some(WebSource {
                uri: Some("https://learn.microsoft.com".into()),
                title: Some("Microsoft Learn".into()),
            }),
        };
        let resp = GenerateResponse {
            candidates: vec![
                Candidate {
                    parts: vec![ContentPart::text("a")],
                    grounding_chunks: Some(vec![chunk.clone()]),
                },
                Candidate {
                    parts: vec![ContentPart::text("b")],
                    grounding_chunks: None,
                },
            ],
        };
        assert_eq!(resp.grounding_chunks(), Some(vec![chunk]));
    }

    #[test]
    fn test_first_inline_data_skips_text() {
        let image = InlineData {
            mime_type: "image/jpeg".into(),
            data: "/9j/".into(),
        };
        let resp = response(vec![
            ContentPart::text("here you go"),
            ContentPart::InlineData(image.clone()),
        ]);
        assert_eq!(resp.first_inline_data(), Some(&image));
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_llm_error_serializes_as_message() {
        let err = LlmError::Api {
            status: 429,
            message: "quota exceeded".into(),
        };
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            "\"API error: 429 - quota exceeded\""
        );
    }
}
