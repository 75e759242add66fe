#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    JnanaMitra,
    OpenAI,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }
}

pub struct BackendPrompt {
    /// Chat log as it was before the user submitted `text`.
    pub history: Vec<Message>,
    pub text: String,
}

impl BackendPrompt {
    pub fn new(history: Vec<Message>, text: String) -> BackendPrompt {
        return BackendPrompt { history, text };
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BackendResponse {
    pub message: String,
}

#[async_trait]
pub trait Backend {
    /// Returns the name of the backend.
    fn name(&self) -> BackendName;

    /// Used at startup to verify the backend can be reached before the first
    /// prompt is sent.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single chat completion for the prompt. On failure, the
    /// error's display string should be a human readable detail, as it is
    /// shown to the user as is.
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
