pub mod image;
pub mod simulation;

use std::sync::Arc;

use crate::attachment::Attachment;
use crate::config::{ModelVariant, RouterConfig};
use crate::llm::gemini::{GeminiClient, GeminiConfig};
use crate::llm::{ContentPart, GenerateRequest, GenerativeBackend, Tool};
use crate::models::{GroundingChunk, RouterResponse};

const IMAGE_ANALYSIS_PREFIX: &str = "Analyze this image in the context of our Azure AI architecture. ";
const NO_RESPONSE_TEXT: &str = "I'm analyzing the architecture... (No response returned)";
const FAILURE_TEXT: &str = "Architecture validation failed. Please check your connection.";

/// How a chat call resolved. Every variant carries displayable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Answered {
        text: String,
        grounding_chunks: Option<Vec<GroundingChunk>>,
    },
    Simulated(&'static str),
    Failed(&'static str),
}

impl From<ChatOutcome> for RouterResponse {
    fn from(outcome: ChatOutcome) -> Self {
        match outcome {
            ChatOutcome::Answered {
                text,
                grounding_chunks,
            } => RouterResponse {
                text,
                grounding_chunks,
            },
            ChatOutcome::Simulated(text) | ChatOutcome::Failed(text) => RouterResponse {
                text: text.to_string(),
                grounding_chunks: None,
            },
        }
    }
}

/// Treats an empty credential the same as none.
fn present(credential: Option<&str>) -> Option<&str> {
    credential.filter(|c| !c.is_empty())
}

/// Stateless front door to the generative backend.
///
/// Holds only immutable configuration and a shared backend handle, so clones are
/// cheap and calls may run concurrently.
#[derive(Clone)]
pub struct Router {
    backend: Arc<dyn GenerativeBackend>,
    config: Arc<RouterConfig>,
}

impl Router {
    pub fn new(backend: Arc<dyn GenerativeBackend>, config: RouterConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    /// Router backed by the Gemini REST API at `config.base_url`.
    pub fn gemini(config: RouterConfig) -> Self {
        let client = GeminiClient::new(GeminiConfig {
            base_url: config.base_url.clone(),
        });
        Self::new(Arc::new(client), config)
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    fn model(&self, variant: ModelVariant) -> &str {
        self.config.models.model(variant)
    }

    /// Answer a chat message. Never fails: errors become displayable text.
    pub async fn generate_chat_response(
        &self,
        message: &str,
        credential: Option<&str>,
        attachment: Option<&Attachment>,
        use_search: bool,
    ) -> RouterResponse {
        self.chat_outcome(message, credential, attachment, use_search)
            .await
            .into()
    }

    pub async fn chat_outcome(
        &self,
        message: &str,
        credential: Option<&str>,
        attachment: Option<&Attachment>,
        use_search: bool,
    ) -> ChatOutcome {
        let Some(credential) = present(credential) else {
            let text = simulation::simulate(message, self.config.simulation_delay()).await;
            return ChatOutcome::Simulated(text);
        };

        let request = self.chat_request(message, attachment, use_search);
        tracing::debug!(
            model = %request.model,
            use_search,
            has_attachment = attachment.is_some(),
            "Routing chat message"
        );

        match self.backend.generate_content(credential, &request).await {
            Ok(response) => ChatOutcome::Answered {
                text: response
                    .text()
                    .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string()),
                grounding_chunks: response.grounding_chunks(),
            },
            Err(err) => {
                tracing::error!(
                    backend = self.backend.name(),
                    model = %request.model,
                    error = %err,
                    "Chat generation failed"
                );
                ChatOutcome::Failed(FAILURE_TEXT)
            }
        }
    }

    pub(crate) fn chat_request(
        &self,
        message: &str,
        attachment: Option<&Attachment>,
        use_search: bool,
    ) -> GenerateRequest {
        // Search wins model selection even when an image is attached.
        let variant = if use_search {
            ModelVariant::SearchCapable
        } else {
            ModelVariant::TextDefault
        };

        let parts = match attachment {
            Some(attachment) => vec![
                ContentPart::InlineData(attachment.to_inline_data()),
                ContentPart::text(format!("{IMAGE_ANALYSIS_PREFIX}{message}")),
            ],
            None => vec![ContentPart::text(message)],
        };

        GenerateRequest {
            model: self.model(variant).to_string(),
            parts,
            system_instruction: Some(self.config.system_instruction.clone()),
            temperature: Some(self.config.temperature),
            tools: if use_search {
                vec![Tool::GoogleSearch]
            } else {
                Vec::new()
            },
            image_config: None,
        }
    }
}
