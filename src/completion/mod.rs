//! Hosted chat-completion boundary
//!
//! A `CompletionClient` turns a prompt into a `CompletionOutcome`. Remote
//! failures never escape as errors: they come back as
//! `CompletionOutcome::Failed` so callers can branch on the outcome and
//! still show, record and export a readable message.

mod openai;

use thiserror::Error;

pub(crate) use openai::OpenAiClient;

/// Why a completion call produced no answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum CompletionFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response contained no message content")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CompletionOutcome {
    Answered(String),
    Failed(CompletionFailure),
}

impl CompletionOutcome {
    pub(crate) fn is_answered(&self) -> bool {
        matches!(self, CompletionOutcome::Answered(_))
    }

    /// Text shown to the user, recorded in history and exported
    pub(crate) fn response_text(&self) -> String {
        match self {
            CompletionOutcome::Answered(text) => text.clone(),
            CompletionOutcome::Failed(failure) => format!("API request failed: {failure}"),
        }
    }
}

/// One blocking prompt-in, outcome-out call
pub(crate) trait CompletionClient {
    fn complete(&self, prompt: &str) -> CompletionOutcome;
}
