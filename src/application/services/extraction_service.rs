use std::sync::Arc;

use crate::application::ports::{InferenceRequest, VisionClient, VisionClientError};
use crate::domain::{HeaderSpec, Table};

use super::confidence::annotate;
use super::header_resolver::{resolve, NoHeadersResolved};
use super::response_parser::{parse_table_response, MalformedResponse};

/// One extraction, end to end: prompt the vision model, parse its untrusted
/// reply, resolve headers, annotate confidence. Nothing here touches the
/// store; persisting is a separate, explicit operation.
pub struct ExtractionService<C>
where
    C: VisionClient,
{
    client: Arc<C>,
    default_model: String,
    default_threshold: f64,
}

#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub image: Vec<u8>,
    pub headers: HeaderSpec,
    pub instructions: Option<String>,
    pub model: Option<String>,
    pub threshold: Option<f64>,
}

impl<C> ExtractionService<C>
where
    C: VisionClient,
{
    pub fn new(client: Arc<C>, default_model: String, default_threshold: f64) -> Self {
        Self {
            client,
            default_model,
            default_threshold,
        }
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn extract(&self, request: ExtractionRequest) -> Result<Table, ExtractionError> {
        let model = request
            .model
            .unwrap_or_else(|| self.default_model.clone());
        let threshold = request.threshold.unwrap_or(self.default_threshold);
        let header_hint = match &request.headers {
            HeaderSpec::UserSpecified(columns) => columns.clone(),
            HeaderSpec::AutoDetect => Vec::new(),
        };

        let inference = InferenceRequest {
            image: request.image,
            headers: header_hint,
            instructions: request.instructions,
            model,
        };

        let raw = self.client.generate(&inference).await?;
        tracing::debug!(chars = raw.len(), "Model response received");

        let parsed = parse_table_response(&raw)?;
        let table = resolve(&request.headers, parsed)?;

        tracing::info!(
            columns = table.headers.len(),
            rows = table.rows.len(),
            "Extraction reconciled"
        );

        Ok(annotate(table, threshold))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("inference: {0}")]
    Inference(#[from] VisionClientError),
    #[error("parse: {0}")]
    Parse(#[from] MalformedResponse),
    #[error("resolve: {0}")]
    Resolve(#[from] NoHeadersResolved),
}
