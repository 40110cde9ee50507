use std::fmt::Debug;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::runtime::Runtime;

use crate::config::GraderConfig;

#[derive(Debug, thiserror::Error)]
pub enum GraderGatewayError {
    #[error("grader credential missing")]
    MissingCredential,
    #[error("grader endpoint returned status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("grader transport failed: {0}")]
    Transport(String),
    #[error("grader runtime unavailable: {0}")]
    Runtime(String),
    #[error("grader response shape unexpected")]
    MalformedEnvelope,
}

/// Outbound boundary to the remote grading model.
///
/// Implementations send one prompt and return the model's raw text; parsing
/// and fallback decisions belong to the caller. Calls are never retried:
/// any failure means the deterministic scorer takes over for this request.
pub trait GraderGateway: Debug + Send + Sync {
    fn grade(&self, prompt: &str) -> Result<String, GraderGatewayError>;
}

/// Chat-completions client for OpenAI-compatible grading endpoints.
///
/// Wraps the async reqwest client in an owned runtime so the synchronous
/// grading pipeline can drive it without exposing async at the seam. Callers
/// on an async executor must invoke it from a blocking section.
pub struct HttpGraderClient {
    client: reqwest::Client,
    runtime: Runtime,
    config: GraderConfig,
}

impl HttpGraderClient {
    pub fn new(config: GraderConfig) -> Result<Self, GraderGatewayError> {
        let runtime = Runtime::new().map_err(|err| GraderGatewayError::Runtime(err.to_string()))?;
        Ok(Self {
            client: reqwest::Client::new(),
            runtime,
            config,
        })
    }
}

impl Debug for HttpGraderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGraderClient")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl GraderGateway for HttpGraderClient {
    fn grade(&self, prompt: &str) -> Result<String, GraderGatewayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GraderGatewayError::MissingCredential)?;

        let payload = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.7,
        });

        let body: Value = self.runtime.block_on(async {
            let response = self
                .client
                .post(&self.config.endpoint)
                .bearer_auth(api_key)
                .json(&payload)
                .timeout(Duration::from_secs(self.config.timeout_secs))
                .send()
                .await
                .map_err(|err| GraderGatewayError::Transport(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                return Err(GraderGatewayError::Status {
                    status: status.as_u16(),
                    detail,
                });
            }

            response
                .json::<Value>()
                .await
                .map_err(|err| GraderGatewayError::Transport(err.to_string()))
        })?;

        body.get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(GraderGatewayError::MalformedEnvelope)
    }
}
