use async_trait::async_trait;

/// Lightweight reachability check against the inference endpoint.
#[async_trait]
pub trait ConnectivityProber: Send + Sync {
    /// Unreachability is a reported status, never an error.
    async fn probe(&self) -> ProbeReport;
}

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub status: EndpointStatus,
    pub models: Vec<ModelInfo>,
}

impl ProbeReport {
    pub fn offline() -> Self {
        Self {
            status: EndpointStatus::Offline,
            models: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStatus {
    Online,
    Offline,
}

impl EndpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointStatus::Online => "online",
            EndpointStatus::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub size_bytes: u64,
    pub parameter_size: String,
    pub quantization_level: String,
}
