#[cfg(test)]
#[path = "jnanamitra_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::Message;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
    image: String,
    timestamp: String,
}

impl From<&Message> for MessageRequest {
    fn from(message: &Message) -> MessageRequest {
        return MessageRequest {
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            image: message.media().unwrap_or_default().to_string(),
            timestamp: message.timestamp().to_string(),
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    messages: Vec<MessageRequest>,
    new_message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    detail: String,
}

/// The JnanaMitra chat server, a JSON API that answers one prompt per request.
pub struct JnanaMitra {
    url: String,
    timeout: String,
}

impl Default for JnanaMitra {
    fn default() -> JnanaMitra {
        return JnanaMitra {
            url: Config::get(ConfigKey::ChatURL),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for JnanaMitra {
    fn name(&self) -> BackendName {
        return BackendName::JnanaMitra;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("JnanaMitra chat URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(format!("{url}/openapi.json", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "JnanaMitra is not reachable");
                bail!("JnanaMitra is not reachable");
            }
        };

        let status = res.status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "JnanaMitra health check failed");
            bail!("JnanaMitra health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse> {
        let req = ChatRequest {
            messages: prompt.history.iter().map(MessageRequest::from).collect(),
            new_message: prompt.text,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/chat", url = self.url))
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Failed to make chat request to JnanaMitra"
            );

            if let Ok(err_res) = serde_json::from_str::<ErrorResponse>(&body) {
                if !err_res.detail.is_empty() {
                    bail!(err_res.detail);
                }
            }
            bail!("Request failed with status code {}", status.as_u16());
        }

        let body = res.json::<ChatResponse>().await?;
        tracing::debug!(body = ?body, "Chat response");

        return Ok(BackendResponse {
            message: body.message,
        });
    }
}
