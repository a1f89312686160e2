use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::service::generator::{ContentGenerator, GenerationRequest, PromptKind};

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

fn system_message(kind: PromptKind) -> &'static str {
    match kind {
        PromptKind::DjRecommendation | PromptKind::Quiz => {
            "You are a tango assistant. Reply ONLY with a single JSON value, with no markdown, no backticks, and no extra text."
        }
        PromptKind::PhotoStyle => {
            "You are a photo stylist for a tango community. Reply with plain text only."
        }
    }
}

pub struct OpenAIGenerator {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAIGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, request: GenerationRequest) -> OpenAIRequest {
        let content = match request.media {
            Some(media) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: request.prompt,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!(
                            "data:{};base64,{}",
                            media.mime_type,
                            STANDARD.encode(&media.bytes)
                        ),
                    },
                },
            ]),
            None => MessageContent::Text(request.prompt),
        };
        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(system_message(request.kind).to_string()),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content,
                },
            ],
            max_tokens: 1500,
            temperature: 0.7,
        }
    }

    async fn query(&self, request: GenerationRequest) -> Result<String, GenerateError> {
        let kind = request.kind;
        let body = self.build_request(request);
        let response = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("event=generate_failed kind={} status={}", kind.as_str(), status);
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: OpenAIResponse = serde_json::from_str(&text)
            .map_err(|e| GenerateError::Malformed(format!("{}; raw body: {}", e, text)))?;
        debug!("event=generate_ok kind={} choices={}", kind.as_str(), parsed.choices.len());
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerateError::Empty)
    }
}

impl ContentGenerator for OpenAIGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerateError> {
        self.query(request).await
    }
}
