use std::sync::Arc;

use tokio::net::TcpListener;

use kuching::application::services::ExtractionService;
use kuching::infrastructure::llm::OllamaClient;
use kuching::infrastructure::observability::{init_tracing, TracingConfig};
use kuching::infrastructure::persistence::CsvFileStore;
use kuching::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let client = Arc::new(OllamaClient::new(
        &settings.ollama.host,
        settings.ollama.credentials(),
    ));
    let table_store = Arc::new(CsvFileStore::new(settings.store.csv_path.clone()));

    let extraction_service = Arc::new(ExtractionService::new(
        Arc::clone(&client),
        settings.ollama.model.clone(),
        settings.extraction.confidence_threshold,
    ));

    let state = AppState {
        extraction_service,
        prober: Arc::clone(&client),
        table_store,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
