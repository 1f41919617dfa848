use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{CompletionClient, CompletionFailure, CompletionOutcome};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client. Temperature is pinned to 0.
pub(crate) struct OpenAiClient {
    agent: ureq::Agent,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub(crate) fn new(api_key: String, model: String, api_base: &str) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder().build().into();
        Self {
            agent,
            api_key,
            model,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
        }
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, prompt: &str) -> CompletionOutcome {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let start = Instant::now();
        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "sending completion request");

        let result = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body);

        let outcome = match result {
            Ok(mut response) => match response.body_mut().read_to_string() {
                Ok(raw) => parse_chat_response(&raw),
                Err(e) => CompletionOutcome::Failed(CompletionFailure::Malformed(e.to_string())),
            },
            Err(ureq::Error::StatusCode(status)) => {
                CompletionOutcome::Failed(CompletionFailure::Status { status })
            }
            Err(e) => CompletionOutcome::Failed(CompletionFailure::Transport(e.to_string())),
        };

        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            answered = outcome.is_answered(),
            "completion finished"
        );
        if let CompletionOutcome::Failed(failure) = &outcome {
            tracing::warn!("completion failed: {failure}");
        }
        outcome
    }
}

/// Extract the first choice's message content
pub(super) fn parse_chat_response(raw: &str) -> CompletionOutcome {
    let parsed: ChatResponse = match serde_json::from_str(raw) {
        Ok(p) => p,
        Err(e) => return CompletionOutcome::Failed(CompletionFailure::Malformed(e.to_string())),
    };
    match parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
    {
        Some(content) => CompletionOutcome::Answered(content),
        None => CompletionOutcome::Failed(CompletionFailure::Empty),
    }
}
