use anyhow::Result;
use reqwest::blocking::Client; // we are using blocking API here to make sync calls
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use super::{
    base::{Provider, Usage},
    configs::openai::OpenAiProviderConfig,
    utils::{
        check_openai_context_length_error, get_usage, messages_to_openai_spec,
        openai_response_to_text,
    },
};
use crate::errors::ProviderError;
use crate::models::message::Message;

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    fn post(&self, payload: Value) -> Result<Value> {
        let url = format!("{}v1/chat/completions", self.config.host);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()?;

        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                warn!(%status, "completion request rejected by server");
                Err(ProviderError::Server(status).into())
            }
            status => Err(ProviderError::RequestFailed(status).into()),
        }
    }
}

impl Provider for OpenAiProvider {
    fn complete(&self, model: &str, messages: &[Message]) -> Result<(String, Usage)> {
        let payload = json!({
            "model": model,
            "messages": messages_to_openai_spec(messages),
        });

        let response = self.post(payload)?;

        if let Some(error) = response.get("error") {
            if let Some(err) = check_openai_context_length_error(error) {
                return Err(err.into());
            }
            return Err(ProviderError::Api(error.to_string()).into());
        }

        let text = openai_response_to_text(&response)?;
        let usage = get_usage(&response);
        debug!(?usage, "completion received");

        Ok((text, usage))
    }
}
