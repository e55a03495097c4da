// src/config.rs
//! Environment-based configuration, loaded once at startup.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where exported PDFs land when saved server-side or via the CLI.
    pub output_path: PathBuf,
    pub model_service_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let output_path = match std::env::var("RESUMAKER_OUTPUT_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .context("Failed to get current directory")?
                .join("out"),
        };

        let model_service_url = std::env::var("MODEL_SERVICE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5555".to_string());

        let port = match std::env::var("RESUMAKER_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid RESUMAKER_PORT value: {}", raw))?,
            Err(_) => 8000,
        };

        info!(
            output = %output_path.display(),
            model_service = %model_service_url,
            port,
            "configuration loaded"
        );

        Ok(Self {
            output_path,
            model_service_url,
            port,
        })
    }

    pub async fn ensure_directories(&self) -> Result<()> {
        crate::utils::ensure_directory(&self.output_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_uses_defaults() {
        // Env-free load falls back to cwd/out and the local model service.
        let config = AppConfig::load().unwrap();
        assert!(config.output_path.ends_with("out"));
        assert_eq!(config.port, 8000);
        assert!(config.model_service_url.starts_with("http://"));
    }
}
