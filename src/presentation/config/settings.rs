use std::path::PathBuf;

use crate::application::services::DEFAULT_CONFIDENCE_THRESHOLD;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub ollama: OllamaSettings,
    pub extraction: ExtractionSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct OllamaSettings {
    pub host: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub model: String,
}

impl OllamaSettings {
    /// Basic-auth pair, only when both halves are configured.
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub confidence_threshold: f64,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub csv_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "127.0.0.1"),
                port: parsed_env("SERVER_PORT").unwrap_or(3000),
            },
            ollama: OllamaSettings {
                host: env_or("OLLAMA_HOST", "http://localhost:11434"),
                username: non_empty_env("OLLAMA_USERNAME"),
                password: non_empty_env("OLLAMA_PASSWORD"),
                model: env_or("OLLAMA_MODEL", "qwen2.5vl:7b"),
            },
            extraction: ExtractionSettings {
                confidence_threshold: parsed_env("CONFIDENCE_THRESHOLD")
                    .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD),
            },
            store: StoreSettings {
                csv_path: PathBuf::from(env_or("CSV_STORE_PATH", "data/results.csv")),
            },
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    non_empty_env(name).unwrap_or_else(|| default.to_string())
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parsed_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}
