// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenRouter chat-completions API.
//!
//! Handles request construction, bearer authentication, and a single retry
//! on transient errors (429, 500, 503). Implements
//! [`triage_core::CompletionClient`] so the routing engine stays unaware of
//! the wire protocol.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};
use triage_config::model::OpenRouterSettings;
use triage_core::{
    CompletionClient, CompletionRequest, CompletionResponse, TokenUsage, TriageError,
};

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client for OpenRouter API communication.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl OpenRouterClient {
    /// Creates a new client from settings and an API key.
    pub fn new(settings: &OpenRouterSettings, api_key: &str) -> Result<Self, TriageError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| TriageError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| TriageError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            max_retries: 1,
        })
    }

    /// Sends a non-streaming chat completion and returns the parsed response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second
    /// delay.
    pub async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, TriageError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .json(request)
                .send()
                .await
                .map_err(|e| TriageError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| TriageError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| TriageError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(TriageError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!("OpenRouter API error: {}", api_err.error.message)
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(TriageError::Provider {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| TriageError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, TriageError> {
        let wire_request = ChatCompletionRequest {
            model: request.model,
            messages: request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        let response = self.complete_chat(&wire_request).await?;
        let text = response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| TriageError::Provider {
                message: "API response contained no choices".to_string(),
                source: None,
            })?;
        Ok(CompletionResponse {
            text,
            model: response.model,
            usage: TokenUsage {
                prompt_tokens: response.usage.prompt_tokens,
                completion_tokens: response.usage.completion_tokens,
            },
        })
    }
}

/// Whether a status code warrants a retry.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::ChatMessage;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> OpenRouterSettings {
        OpenRouterSettings {
            api_key: None,
            base_url: format!("{}/chat/completions", server.uri()),
            timeout_secs: 5,
            temperature: 0.7,
        }
    }

    fn sample_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "minimax/minimax-m2.5".to_string(),
            messages: vec![ChatMessage::user("why is this failing")],
            max_tokens: 256,
            temperature: 0.7,
        }
    }

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "id": "gen-1",
            "model": "minimax/minimax-m2.5",
            "choices": [
                {"message": {"role": "assistant", "content": "try checking the logs"},
                 "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18}
        })
    }

    #[tokio::test]
    async fn complete_chat_parses_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&settings_for(&server), "test-key").unwrap();
        let response = client.complete_chat(&sample_request()).await.unwrap();
        assert_eq!(response.choices[0].message.content, "try checking the logs");
        assert_eq!(response.usage.prompt_tokens, 10);
    }

    #[tokio::test]
    async fn transient_error_is_retried_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&settings_for(&server), "test-key").unwrap();
        let response = client.complete_chat(&sample_request()).await.unwrap();
        assert_eq!(response.id, "gen-1");
    }

    #[tokio::test]
    async fn api_error_body_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"message": "invalid model", "code": 400}
            })))
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&settings_for(&server), "test-key").unwrap();
        let err = client.complete_chat(&sample_request()).await.unwrap_err();
        assert!(err.to_string().contains("invalid model"));
    }

    #[tokio::test]
    async fn completion_client_trait_maps_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&settings_for(&server), "test-key").unwrap();
        let response = client
            .complete(CompletionRequest {
                model: "minimax/minimax-m2.5".to_string(),
                messages: vec![ChatMessage::user("hi")],
                max_tokens: 64,
                temperature: 0.7,
            })
            .await
            .unwrap();
        assert_eq!(response.text, "try checking the logs");
        assert_eq!(response.usage.total(), 18);
    }

    #[tokio::test]
    async fn empty_choices_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "gen-2",
                "model": "m",
                "choices": [],
                "usage": {"prompt_tokens": 1, "completion_tokens": 0, "total_tokens": 1}
            })))
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&settings_for(&server), "test-key").unwrap();
        let err = client
            .complete(CompletionRequest {
                model: "m".to_string(),
                messages: vec![ChatMessage::user("hi")],
                max_tokens: 64,
                temperature: 0.7,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }
}
