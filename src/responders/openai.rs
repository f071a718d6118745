use super::Responder;
use crate::config::OpenAIConfig;
use crate::core::error::{ClimaError, Service};
use crate::responders::base_client::BaseApiClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatCompletionMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Single-turn chat completions with a fixed persona. No history is carried
/// between calls.
pub struct OpenAIResponder {
    client: BaseApiClient,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    system_prompt: String,
}

impl OpenAIResponder {
    pub fn new(config: &OpenAIConfig, api_key: Option<String>) -> Result<Self, ClimaError> {
        Ok(Self {
            client: BaseApiClient::new(Service::OpenAI, config.base_url(), config.timeout())?,
            api_key,
            model: config.model().to_string(),
            max_tokens: config.max_tokens(),
            system_prompt: config.system_prompt().to_string(),
        })
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ClimaError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ClimaError::MissingCredential(Service::OpenAI))?;

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatCompletionMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatCompletionMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, max_tokens = self.max_tokens, "requesting chat completion");
        let response = self
            .client
            .post_json("chat/completions", api_key, &payload)
            .await?;

        let status = response.status();
        let body = self.client.read_body(response).await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| body.trim().to_string());
            debug!(status = status.as_u16(), "chat completion rejected");
            return Err(ClimaError::Upstream {
                service: Service::OpenAI,
                status: status.as_u16(),
                message: format!("Error code: {} - {}", status.as_u16(), detail),
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| ClimaError::json(Service::OpenAI, &e))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ClimaError::Transport {
                service: Service::OpenAI,
                detail: "respuesta sin contenido".to_string(),
            })
    }
}

#[async_trait]
impl Responder for OpenAIResponder {
    fn service(&self) -> Service {
        Service::OpenAI
    }

    async fn respond(&self, input: &str) -> Result<String, ClimaError> {
        self.complete(input).await
    }
}
