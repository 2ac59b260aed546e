use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "tenure-server")]
#[command(about = "Tenure contract tracking server")]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "TENURE_HTTP_ADDR", default_value = "0.0.0.0:8088")]
    pub http_addr: SocketAddr,

    /// Data directory for the JSON stores
    #[arg(long, env = "TENURE_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Base URL of the Ollama endpoint
    #[arg(long, env = "TENURE_OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Model identifier sent with every completion request
    #[arg(long, env = "TENURE_MODEL", default_value = "llama3.2")]
    pub model: String,

    /// Upstream completion timeout in seconds
    #[arg(long, env = "TENURE_LLM_TIMEOUT", default_value = "120")]
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn contracts_path(&self) -> PathBuf {
        self.data_dir.join("contracts.json")
    }

    pub fn sessions_path(&self) -> PathBuf {
        self.data_dir.join("sessions.json")
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8088".parse().unwrap(),
            data_dir: PathBuf::from("./data"),
            ollama_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            llm_timeout_secs: 120,
        }
    }
}
