//! Blueprint image generation and editing.
//!
//! Both operations resolve to `Option<String>`: a `data:` URI (or, for
//! generation without a credential, a placeholder URL) when an image is
//! available, `None` otherwise. Backend errors are logged, never returned.

use super::{present, Router};
use crate::config::ModelVariant;
use crate::llm::{ContentPart, GenerateRequest, ImageConfig, InlineData};
use crate::models::AspectRatio;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const MVP_SCENE: &str = "A futuristic sci-fi blueprint of a single robot assistant interface connected to a glowing data stream. Green and Cyan neon aesthetics. Isometric view. High tech HUD overlay.";
const CORE_SCENE: &str = "A complex technical schematic of a cloud backend architecture. Central AI processor chip connected to multiple database nodes and search index modules. Azure Blue and Deep Blue neon style. Detailed engineering diagram.";
const SCALE_SCENE: &str = "A massive planetary-scale network visualization. Multiple AI agents orbiting a central governance citadel. Purple and Gold energy streams connecting global nodes. Strategic holographic map style.";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, like JS `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const DATA_URL_PREFIXES: [&str; 3] = [
    "data:image/png;base64,",
    "data:image/jpeg;base64,",
    "data:image/webp;base64,",
];

/// Scene description for a roadmap phase, keyed on its title.
pub fn phase_scene(phase_title: &str) -> &'static str {
    if phase_title.contains("MVP") {
        MVP_SCENE
    } else if phase_title.contains("Core") {
        CORE_SCENE
    } else {
        SCALE_SCENE
    }
}

pub fn phase_prompt(phase_title: &str) -> String {
    format!(
        "Render a high-quality sci-fi infographic: {}. The image should look like a holographic projection from a Star Wars or Mass Effect terminal. Dark background, glowing lines. No text.",
        phase_scene(phase_title)
    )
}

pub fn placeholder_url(phase_title: &str) -> String {
    format!(
        "https://placehold.co/800x450/0f172a/0078D4?text={}+Blueprint+(Simulation)",
        utf8_percent_encode(phase_title, URI_COMPONENT)
    )
}

fn strip_data_url(image: &str) -> &str {
    DATA_URL_PREFIXES
        .iter()
        .find_map(|prefix| image.strip_prefix(prefix))
        .unwrap_or(image)
}

impl Router {
    /// Render a blueprint for a roadmap phase.
    ///
    /// Walks the configured image attempts in order. A failed attempt moves on
    /// to the next one; a successful call ends the walk whether or not it
    /// carried an image.
    pub async fn generate_phase_image(
        &self,
        phase_title: &str,
        goal: &str,
        aspect_ratio: AspectRatio,
        credential: Option<&str>,
    ) -> Option<String> {
        let Some(credential) = present(credential) else {
            tokio::time::sleep(self.config.placeholder_delay()).await;
            return Some(placeholder_url(phase_title));
        };

        tracing::debug!(phase_title, goal, aspect = aspect_ratio.as_str(), "Generating phase image");
        let prompt = phase_prompt(phase_title);
        let attempts = &self.config.image_attempts;

        for (i, attempt) in attempts.iter().enumerate() {
            let mut request = GenerateRequest::new(
                self.model(attempt.model),
                vec![ContentPart::text(prompt.clone())],
            );
            request.image_config = Some(ImageConfig {
                aspect_ratio,
                image_size: attempt.image_size.clone(),
            });

            match self.backend.generate_content(credential, &request).await {
                Ok(response) => return response.first_inline_data().map(InlineData::to_data_url),
                Err(err) => match attempts.get(i + 1) {
                    Some(next) => tracing::warn!(
                        model = %request.model,
                        next_model = %self.model(next.model),
                        error = %err,
                        "Image generation failed, falling back"
                    ),
                    None => tracing::error!(
                        model = %request.model,
                        error = %err,
                        "Image generation failed on every model"
                    ),
                },
            }
        }

        None
    }

    /// Apply an edit instruction to an existing blueprint.
    ///
    /// Without a credential there is nothing to edit with, so this returns
    /// `None` rather than a placeholder.
    pub async fn edit_phase_image(
        &self,
        base64_image: &str,
        edit_prompt: &str,
        credential: Option<&str>,
    ) -> Option<String> {
        let credential = present(credential)?;

        let request = GenerateRequest::new(
            self.model(ModelVariant::ImageFast),
            vec![
                ContentPart::InlineData(InlineData {
                    mime_type: "image/png".to_string(),
                    data: strip_data_url(base64_image).to_string(),
                }),
                ContentPart::text(format!(
                    "Edit this image: {edit_prompt}. Maintain the sci-fi holographic style."
                )),
            ],
        );

        match self.backend.generate_content(credential, &request).await {
            Ok(response) => response.first_inline_data().map(InlineData::to_data_url),
            Err(err) => {
                tracing::error!(model = %request.model, error = %err, "Image edit failed");
                None
            }
        }
    }
}
