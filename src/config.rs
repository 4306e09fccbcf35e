//! Specdaemon configuration types and loading

use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main specdaemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM proxy configuration
    pub llm: LlmConfig,

    /// OAuth credential configuration
    pub auth: AuthConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Artefact pipeline defaults
    pub artefacts: ArtefactsConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that required environment variables are set. Call this early
    /// in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        for env_name in [
            &self.llm.api_key_env,
            &self.auth.client_id_env,
            &self.auth.client_secret_env,
        ] {
            if std::env::var(env_name).is_err() {
                return Err(eyre::eyre!("Missing credential. Set the {} environment variable.", env_name));
            }
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .specdaemon.yml
        let local_config = PathBuf::from(".specdaemon.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/specdaemon/specdaemon.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("specdaemon").join("specdaemon.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier, as the LiteLLM gateway knows it
    pub model: String,

    /// Environment variable containing the proxy API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Proxy base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per reply
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "groq/llama-3.3-70b-versatile".to_string(),
            api_key_env: "LITELLM_API_KEY".to_string(),
            base_url: "https://litellm.internal.example.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 120_000,
        }
    }
}

/// OAuth credential configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Token endpoint for the client-credentials grant
    #[serde(rename = "token-url")]
    pub token_url: String,

    /// Environment variable containing the OAuth client id
    #[serde(rename = "client-id-env")]
    pub client_id_env: String,

    /// Environment variable containing the OAuth client secret
    #[serde(rename = "client-secret-env")]
    pub client_secret_env: String,

    /// How long an acquired token is kept before refreshing, in seconds
    #[serde(rename = "token-ttl-secs")]
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: "https://auth.example.com/oauth/token?grant_type=client_credentials".to_string(),
            client_id_env: "CLIENT_ID".to_string(),
            client_secret_env: "CLIENT_SECRET".to_string(),
            // Tokens are valid for an hour upstream; keep 55 minutes
            token_ttl_secs: 55 * 60,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP API
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Artefact pipeline defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtefactsConfig {
    /// Requirements JSON produced by a finished conversation
    #[serde(rename = "input-json")]
    pub input_json: PathBuf,

    /// Directory the artefacts are written into
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,

    /// Export PDF twins by default
    #[serde(rename = "export-pdf")]
    pub export_pdf: bool,
}

impl Default for ArtefactsConfig {
    fn default() -> Self {
        Self {
            input_json: PathBuf::from("outputs/requirements_output.json"),
            output_dir: PathBuf::from("outputs"),
            export_pdf: false,
        }
    }
}
