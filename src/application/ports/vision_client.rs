use std::time::Duration;

use async_trait::async_trait;

/// Single vision-model inference call against the configured endpoint.
///
/// The adapter owns prompt construction: callers hand over the structured
/// request and get the model's raw text back untouched. No retries at this
/// layer; retry policy belongs to the caller.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, VisionClientError>;
}

#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub image: Vec<u8>,
    /// Required columns; empty means the model detects headers itself.
    pub headers: Vec<String>,
    pub instructions: Option<String>,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VisionClientError {
    #[error("inference endpoint unreachable: {0}")]
    UnreachableEndpoint(String),
    #[error("model not available on the endpoint: {0}")]
    ModelUnavailable(String),
    #[error("inference call exceeded {0:?}")]
    Timeout(Duration),
}
