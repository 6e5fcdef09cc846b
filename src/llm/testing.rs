use super::{
    Candidate, ContentPart, GenerateRequest, GenerateResponse, GenerativeBackend, InlineData,
    LlmError,
};
use crate::models::GroundingChunk;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Backend that replays queued results and records every request it sees.
/// When the queue runs dry it answers with an empty response.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<GenerateResponse, LlmError>>>,
    calls: Mutex<Vec<(String, GenerateRequest)>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, result: Result<GenerateResponse, LlmError>) -> Self {
        self.replies.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, GenerateRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn requests(&self) -> Vec<GenerateRequest> {
        self.calls().into_iter().map(|(_, req)| req).collect()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate_content(
        &self,
        credential: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.to_string(), request.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GenerateResponse::default()))
    }
}

pub(crate) fn text_response(text: &str) -> GenerateResponse {
    GenerateResponse {
        candidates: vec![Candidate {
            parts: vec![ContentPart::text(text)],
            grounding_chunks: None,
        }],
    }
}

pub(crate) fn grounded_response(text: &str, chunks: Vec<GroundingChunk>) -> GenerateResponse {
    GenerateResponse {
        candidates: vec![Candidate {
            parts: vec![ContentPart::text(text)],
            grounding_chunks: Some(chunks),
        }],
    }
}

pub(crate) fn image_response(mime_type: &str, data: &str) -> GenerateResponse {
    GenerateResponse {
        candidates: vec![Candidate {
            parts: vec![
                ContentPart::text("Here is your blueprint."),
                ContentPart::InlineData(InlineData {
                    mime_type: mime_type.to_string(),
                    data: data.to_string(),
                }),
            ],
            grounding_chunks: None,
        }],
    }
}

pub(crate) fn api_error(status: u16) -> LlmError {
    LlmError::Api {
        status,
        message: "backend unavailable".to_string(),
    }
}
