use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{
    ConnectivityProber, EndpointStatus, InferenceRequest, ModelInfo, ProbeReport, VisionClient,
    VisionClientError,
};

use super::prompt::build_extraction_prompt;

/// Ollama adapter: `/api/chat` for inference, `/` and `/api/tags` for the
/// connectivity probe. Optional basic auth applies to every call.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl OllamaClient {
    pub const INFERENCE_TIMEOUT: Duration = Duration::from_secs(120);
    pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(base_url: &str, credentials: Option<(String, String)>) -> Self {
        let client = Client::builder()
            .timeout(Self::INFERENCE_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some((username, password)) => builder.basic_auth(username, Some(password)),
            None => builder,
        }
    }

    async fn list_models(&self) -> Option<Vec<ModelInfo>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .authorized(self.client.get(&url).timeout(Self::PROBE_TIMEOUT))
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        let tags: TagsResponse = response.json().await.ok()?;
        Some(
            tags.models
                .into_iter()
                .map(|model| ModelInfo {
                    name: model.name,
                    size_bytes: model.size,
                    parameter_size: model.details.parameter_size,
                    quantization_level: model.details.quantization_level,
                })
                .collect(),
        )
    }
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    details: TagDetails,
}

#[derive(Deserialize, Default)]
struct TagDetails {
    #[serde(default)]
    parameter_size: String,
    #[serde(default)]
    quantization_level: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl VisionClient for OllamaClient {
    #[tracing::instrument(
        skip(self, request),
        fields(model = %request.model, image_bytes = request.image.len())
    )]
    async fn generate(&self, request: &InferenceRequest) -> Result<String, VisionClientError> {
        let prompt = build_extraction_prompt(&request.headers, request.instructions.as_deref());
        let image = general_purpose::STANDARD.encode(&request.image);

        let body = serde_json::json!({
            "model": request.model,
            "messages": [{
                "role": "user",
                "content": prompt,
                "images": [image],
            }],
            "stream": false,
        });

        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .authorized(self.client.post(&url).json(&body))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VisionClientError::Timeout(Self::INFERENCE_TIMEOUT)
                } else {
                    VisionClientError::UnreachableEndpoint(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // Ollama answers 404 for a model id it has not pulled.
            return Err(VisionClientError::ModelUnavailable(request.model.clone()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VisionClientError::UnreachableEndpoint(format!(
                "endpoint returned {status}: {text}"
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            VisionClientError::UnreachableEndpoint(format!("undecodable chat envelope: {e}"))
        })?;

        Ok(completion.message.content)
    }
}

#[async_trait]
impl ConnectivityProber for OllamaClient {
    async fn probe(&self) -> ProbeReport {
        let reachable = self
            .authorized(self.client.get(&self.base_url).timeout(Self::PROBE_TIMEOUT))
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false);

        if !reachable {
            tracing::debug!(host = %self.base_url, "Inference endpoint offline");
            return ProbeReport::offline();
        }

        ProbeReport {
            status: EndpointStatus::Online,
            models: self.list_models().await.unwrap_or_default(),
        }
    }
}
