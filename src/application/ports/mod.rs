mod connectivity;
mod table_store;
mod vision_client;

pub use connectivity::{ConnectivityProber, EndpointStatus, ModelInfo, ProbeReport};
pub use table_store::{TableStore, TableStoreError};
pub use vision_client::{InferenceRequest, VisionClient, VisionClientError};
