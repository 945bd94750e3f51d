use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::{helpers::detect_image_mime, ports::LLMClient},
    common::entities::app_errors::CoreError,
};

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    api_key: String,
    base_url: String,
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
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

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(api_key: String, base_url: String, model_name: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name,
            client: Client::new(),
        }
    }

    /// Same endpoint and credentials, different model.
    pub fn with_model(&self, model_name: String) -> Self {
        Self {
            model_name,
            ..self.clone()
        }
    }

    async fn call_chat_api(&self, request: ChatRequest) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat completion request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Chat completion API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat completion response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl LLMClient for ChatCompletionClient {
    async fn generate_with_text(
        &self,
        system_prompt: String,
        prompt: String,
    ) -> Result<String, CoreError> {
        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(system_prompt),
                },
                Message {
                    role: "user",
                    content: MessageContent::Text(prompt),
                },
            ],
        };

        self.call_chat_api(request).await
    }

    async fn generate_with_image(
        &self,
        system_prompt: String,
        prompt: String,
        image_data: Bytes,
    ) -> Result<String, CoreError> {
        let data_uri = format!(
            "data:{};base64,{}",
            detect_image_mime(&image_data),
            general_purpose::STANDARD.encode(&image_data)
        );

        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(system_prompt),
                },
                Message {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: prompt },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: data_uri },
                        },
                    ]),
                },
            ],
        };

        self.call_chat_api(request).await
    }
}
