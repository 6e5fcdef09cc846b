use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::llm::InlineData;

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Attachment is missing a MIME type")]
    MissingMimeType,
    #[error("Attachment has no data")]
    MissingData,
    #[error("Attachment data is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Not a base64 data URL")]
    InvalidDataUrl,
    #[error("Unsupported image type: .{0}")]
    UnsupportedType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The single image a user can attach to an outgoing message.
///
/// Both halves are always present: construction and deserialization reject an
/// empty MIME type, an empty payload, or a payload that is not base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAttachment")]
pub struct Attachment {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttachment {
    mime_type: String,
    data: String,
}

impl TryFrom<RawAttachment> for Attachment {
    type Error = AttachmentError;

    fn try_from(raw: RawAttachment) -> Result<Self, Self::Error> {
        Attachment::new(raw.mime_type, raw.data)
    }
}

impl Attachment {
    pub fn new(
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Result<Self, AttachmentError> {
        let mime_type = mime_type.into();
        let data = data.into();
        if mime_type.trim().is_empty() {
            return Err(AttachmentError::MissingMimeType);
        }
        if data.is_empty() {
            return Err(AttachmentError::MissingData);
        }
        STANDARD.decode(&data)?;
        Ok(Self { mime_type, data })
    }

    /// Parse `data:<mime>;base64,<payload>` as produced by a browser FileReader.
    pub fn from_data_url(url: &str) -> Result<Self, AttachmentError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or(AttachmentError::InvalidDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(AttachmentError::InvalidDataUrl)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(AttachmentError::InvalidDataUrl)?;
        Self::new(mime_type, payload)
    }

    /// Read an image file from disk
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let mime_type = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "heic" => "image/heic",
            "heif" => "image/heif",
            _ => return Err(AttachmentError::UnsupportedType(ext)),
        };

        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(AttachmentError::MissingData);
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub(crate) fn to_inline_data(&self) -> InlineData {
        InlineData {
            mime_type: self.mime_type.clone(),
            data: self.data.clone(),
        }
    }
}
