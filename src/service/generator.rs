use std::future::Future;

use crate::error::GenerateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    DjRecommendation,
    Quiz,
    PhotoStyle,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::DjRecommendation => "dj_recommendation",
            PromptKind::Quiz => "quiz",
            PromptKind::PhotoStyle => "photo_style",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub kind: PromptKind,
    pub prompt: String,
    pub media: Option<Media>,
}

impl GenerationRequest {
    pub fn text(kind: PromptKind, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            media: None,
        }
    }
}

/// A hosted model that turns a prompt, and optionally an image, into text.
pub trait ContentGenerator: Send + Sync {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<String, GenerateError>> + Send;
}
