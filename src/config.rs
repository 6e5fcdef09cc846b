use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = r#"
You are the "NEXUS Mentor", a Principal Cloud Architect at Microsoft.
Your goal is to guide users through the "Zero-to-Hero Agentic AI Roadmap".

Context:
The user is building "NEXUS", a SaaS learning platform on Azure (formerly Agentic Forge).
Stack: Azure OpenAI, Semantic Kernel (C#), Cosmos DB, Azure Container Apps.

You have access to the following phases:
Phase 1 (MVP): Focus on Copilot Studio, AI-900, and basic Logic Apps.
Phase 2 (Engineering): Focus on AI-102, Semantic Kernel, AI Search, and refactoring "azure-search-openai-demo".
Phase 3 (Architect): Focus on AB-100, Governance, Multi-Agent orchestration (AutoGen).

Rules:
1. Be authoritative but encouraging. Use "Principal Architect" tone.
2. When asked about a repository, explain SPECIFICALLY how to adapt it for the "NEXUS" product.
3. Keep answers concise and technical.
4. If the user asks about code, provide C# or Python snippets relevant to Semantic Kernel.
"#;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid router config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Router config needs at least one image attempt")]
    NoImageAttempts,
}

/// Model roles the router chooses between. Provider ids live in [`ModelTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// High-reasoning model for plain text and image analysis.
    TextDefault,
    /// Fast model that supports the web-search tool.
    SearchCapable,
    ImageDefault,
    ImageFast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTable {
    pub text_default: String,
    pub search_capable: String,
    pub image_default: String,
    pub image_fast: String,
}

impl Default for ModelTable {
    fn default() -> Self {
        Self {
            text_default: "gemini-3-pro-preview".to_string(),
            search_capable: "gemini-2.5-flash".to_string(),
            image_default: "gemini-3-pro-image-preview".to_string(),
            image_fast: "gemini-2.5-flash-image".to_string(),
        }
    }
}

impl ModelTable {
    pub fn model(&self, variant: ModelVariant) -> &str {
        match variant {
            ModelVariant::TextDefault => &self.text_default,
            ModelVariant::SearchCapable => &self.search_capable,
            ModelVariant::ImageDefault => &self.image_default,
            ModelVariant::ImageFast => &self.image_fast,
        }
    }
}

/// One step of the image generation chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttempt {
    pub model: ModelVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
}

fn default_image_attempts() -> Vec<ImageAttempt> {
    vec![
        ImageAttempt {
            model: ModelVariant::ImageDefault,
            image_size: Some("1K".to_string()),
        },
        ImageAttempt {
            model: ModelVariant::ImageFast,
            image_size: None,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub base_url: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub models: ModelTable,
    pub image_attempts: Vec<ImageAttempt>,
    /// Artificial latency of the offline chat simulation.
    pub simulation_delay_ms: u64,
    /// Artificial latency before the placeholder blueprint URL is returned.
    pub placeholder_delay_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            temperature: 0.7,
            models: ModelTable::default(),
            image_attempts: default_image_attempts(),
            simulation_delay_ms: 800,
            placeholder_delay_ms: 1500,
        }
    }
}

impl RouterConfig {
    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RouterConfig = serde_json::from_str(json)?;
        if config.image_attempts.is_empty() {
            return Err(ConfigError::NoImageAttempts);
        }
        Ok(config)
    }

    pub fn simulation_delay(&self) -> Duration {
        Duration::from_millis(self.simulation_delay_ms)
    }

    pub fn placeholder_delay(&self) -> Duration {
        Duration::from_millis(self.placeholder_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.simulation_delay(), Duration::from_millis(800));
        assert_eq!(config.models.model(ModelVariant::SearchCapable), "gemini-2.5-flash");
        assert_eq!(config.image_attempts.len(), 2);
        assert_eq!(config.image_attempts[0].model, ModelVariant::ImageDefault);
        assert!(config.system_instruction.contains("NEXUS Mentor"));
    }

    #[test]
    fn test_from_json_overrides_only_given_fields() {
        let config = RouterConfig::from_json(
            r#"{
                "system_instruction": "You are a test persona.",
                "models": { "text_default": "gemini-exp" },
                "simulation_delay_ms": 0
            }"#,
        )
        .unwrap();
        assert_eq!(config.system_instruction, "You are a test persona.");
        assert_eq!(config.models.model(ModelVariant::TextDefault), "gemini-exp");
        assert_eq!(config.models.model(ModelVariant::ImageFast), "gemini-2.5-flash-image");
        assert_eq!(config.simulation_delay(), Duration::ZERO);
        assert_eq!(config.placeholder_delay_ms, 1500);
    }

    #[test]
    fn test_from_json_parses_image_attempts() {
        let config = RouterConfig::from_json(
            r#"{ "image_attempts": [{ "model": "image_fast" }] }"#,
        )
        .unwrap();
        assert_eq!(
            config.image_attempts,
            vec![ImageAttempt {
                model: ModelVariant::ImageFast,
                image_size: None,
            }]
        );
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            RouterConfig::from_json(r#"{ "image_attempts": [] }"#),
            Err(ConfigError::NoImageAttempts)
        ));
        assert!(matches!(
            RouterConfig::from_json(r#"{ "temperature": "hot" }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
