use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::models::event::Event;
use crate::service::generator::{ContentGenerator, GenerationRequest, Media, PromptKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjRecommendation {
    pub orchestras: Vec<String>,
    pub tanda: String,
    #[serde(default)]
    pub note: String,
}

pub struct DjService;

impl DjService {
    /// Suggests orchestras for a mood. Falls back to a canned pick when the
    /// generator fails or answers with something unusable.
    pub async fn recommend<G: ContentGenerator>(
        generator: &G,
        mood: &str,
        events: &[&Event],
    ) -> DjRecommendation {
        let upcoming: Vec<String> = events
            .iter()
            .take(5)
            .map(|event| format!("- {} ({}, {})", event.title, event.kind.as_str(), event.start_date))
            .collect();
        let prompt = format!(
            "Recommend a tango tanda for the mood below.\n\
             Upcoming events:\n{events}\n\
             The JSON shape must be exactly:\n\
             {{\"orchestras\":[\"<name>\"],\"tanda\":\"tango|vals|milonga\",\"note\":\"<one sentence>\"}}\n\
             Mood: \"{mood}\"",
            events = if upcoming.is_empty() { "- none".to_string() } else { upcoming.join("\n") },
            mood = mood.trim(),
        );

        match generator
            .generate(GenerationRequest::text(PromptKind::DjRecommendation, prompt))
            .await
        {
            Ok(payload) => match parse_recommendation(&payload) {
                Some(recommendation) => recommendation,
                None => {
                    warn!("event=dj_fallback reason=malformed");
                    fallback_recommendation(mood)
                }
            },
            Err(err) => {
                warn!("event=dj_fallback reason={}", err);
                fallback_recommendation(mood)
            }
        }
    }
}

fn parse_recommendation(payload: &str) -> Option<DjRecommendation> {
    let parsed: DjRecommendation = serde_json::from_str(strip_fences(payload)).ok()?;
    if parsed.orchestras.is_empty() || parsed.tanda.trim().is_empty() {
        return None;
    }
    Some(parsed)
}

pub fn fallback_recommendation(mood: &str) -> DjRecommendation {
    let lower = mood.to_lowercase();
    let (orchestras, tanda) = if ["happy", "fast", "energ", "alegre"]
        .iter()
        .any(|k| lower.contains(k))
    {
        (vec!["D'Arienzo", "Canaro"], "milonga")
    } else if ["sad", "melanch", "triste", "slow"]
        .iter()
        .any(|k| lower.contains(k))
    {
        (vec!["Pugliese", "Troilo"], "tango")
    } else if ["romantic", "light", "romant"].iter().any(|k| lower.contains(k)) {
        (vec!["Di Sarli", "Fresedo"], "vals")
    } else {
        (vec!["Di Sarli"], "tango")
    };
    DjRecommendation {
        orchestras: orchestras.into_iter().map(String::from).collect(),
        tanda: tanda.to_string(),
        note: "Offline pick.".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize,
}

pub struct QuizService;

impl QuizService {
    /// Asks for `count` questions and keeps those whose answer points at an
    /// existing option.
    pub async fn generate<G: ContentGenerator>(
        generator: &G,
        topic: &str,
        count: usize,
    ) -> Result<Vec<QuizQuestion>, GenerateError> {
        if count == 0 {
            return Err(GenerateError::InvalidRequest("question count must be positive".to_string()));
        }
        let prompt = format!(
            "Write {count} multiple choice questions about tango, topic: \"{topic}\".\n\
             The JSON shape must be exactly:\n\
             [{{\"question\":\"<string>\",\"options\":[\"<string>\"],\"answer\":<zero-based index>}}]",
            count = count,
            topic = topic.trim(),
        );
        let payload = generator
            .generate(GenerationRequest::text(PromptKind::Quiz, prompt))
            .await?;
        let questions: Vec<QuizQuestion> = serde_json::from_str(strip_fences(&payload))
            .map_err(|e| GenerateError::Malformed(e.to_string()))?;
        let usable: Vec<QuizQuestion> = questions
            .into_iter()
            .filter(|q| !q.question.trim().is_empty() && q.answer < q.options.len())
            .take(count)
            .collect();
        if usable.is_empty() {
            return Err(GenerateError::Malformed("no usable questions".to_string()));
        }
        Ok(usable)
    }
}

pub struct PhotoStyleService;

impl PhotoStyleService {
    pub async fn stylize<G: ContentGenerator>(
        generator: &G,
        media: Media,
        style: &str,
    ) -> Result<String, GenerateError> {
        if media.bytes.is_empty() {
            return Err(GenerateError::InvalidRequest("image is empty".to_string()));
        }
        let request = GenerationRequest {
            kind: PromptKind::PhotoStyle,
            prompt: format!(
                "Describe how this dance photo would look restyled as \"{}\". Keep it to two sentences.",
                style.trim()
            ),
            media: Some(media),
        };
        let text = generator.generate(request).await?;
        Ok(text.trim().to_string())
    }
}

// Models sometimes wrap JSON in markdown fences despite instructions.
fn strip_fences(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
