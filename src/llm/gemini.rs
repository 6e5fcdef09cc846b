use super::{
    Candidate, ContentPart, GenerateRequest, GenerateResponse, GenerativeBackend, InlineData,
    LlmError, Tool,
};
use crate::config::DEFAULT_BASE_URL;
use crate::models::GroundingChunk;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Google Gemini `generateContent` over REST.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
}

#[derive(Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    /// Marks reasoning summaries, which are not part of the answer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<GeminiImageConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiImageConfig {
    aspect_ratio: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_size: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    google_search: EmptyObject,
}

#[derive(Serialize)]
struct EmptyObject {}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Option<Vec<GroundingChunk>>,
}

fn to_wire_part(part: &ContentPart) -> GeminiPart {
    match part {
        ContentPart::Text(text) => GeminiPart {
            text: Some(text.clone()),
            ..Default::default()
        },
        ContentPart::InlineData(data) => GeminiPart {
            inline_data: Some(data.clone()),
            ..Default::default()
        },
    }
}

fn build_request(request: &GenerateRequest) -> GeminiRequest {
    let system_instruction = request
        .system_instruction
        .as_ref()
        .map(|instruction| GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: Some(instruction.clone()),
                ..Default::default()
            }],
        });

    let generation_config = if request.temperature.is_some() || request.image_config.is_some() {
        Some(GeminiGenerationConfig {
            temperature: request.temperature,
            image_config: request.image_config.as_ref().map(|c| GeminiImageConfig {
                aspect_ratio: c.aspect_ratio.as_str(),
                image_size: c.image_size.clone(),
            }),
        })
    } else {
        None
    };

    let tools = request
        .tools
        .iter()
        .map(|tool| match tool {
            Tool::GoogleSearch => GeminiTool {
                google_search: EmptyObject {},
            },
        })
        .collect();

    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: request.parts.iter().map(to_wire_part).collect(),
        }],
        system_instruction,
        generation_config,
        tools,
    }
}

fn from_wire_response(data: GeminiResponse) -> GenerateResponse {
    let candidates = data
        .candidates
        .into_iter()
        .map(|candidate| {
            let parts = candidate
                .content
                .unwrap_or_default()
                .parts
                .into_iter()
                .filter(|p| p.thought != Some(true))
                .filter_map(|p| match (p.inline_data, p.text) {
                    (Some(data), _) => Some(ContentPart::InlineData(data)),
                    (None, Some(text)) => Some(ContentPart::Text(text)),
                    (None, None) => None,
                })
                .collect();
            Candidate {
                parts,
                grounding_chunks: candidate
                    .grounding_metadata
                    .and_then(|m| m.grounding_chunks),
            }
        })
        .collect();

    GenerateResponse { candidates }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_content(
        &self,
        credential: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, LlmError> {
        let body = build_request(request);
        tracing::debug!(model = %request.model, parts = request.parts.len(), "Calling generateContent");

        let resp = self
            .client
            .post(self.endpoint(&request.model))
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", credential)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status,
                message: text,
            });
        }

        let data: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;
        Ok(from_wire_response(data))
    }
}
