mod ollama_client;
mod prompt;

pub use ollama_client::OllamaClient;
pub use prompt::build_extraction_prompt;
