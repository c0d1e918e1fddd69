use crate::utils::error::{CardcastError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub cardcast: CardcastConfig,
    pub files: FilesConfig,
    #[serde(default)]
    pub decks: DecksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Where the remote deck service lives and how its paths are built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardcastConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(alias = "deckInfo")]
    pub deck_info: String,
    #[serde(alias = "deckCards")]
    pub deck_cards: String,
    /// 未設定時不限制請求時間
    pub timeout_seconds: Option<u64>,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_port() -> u16 {
    443
}

impl CardcastConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    pub cache: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecksConfig {
    #[serde(default)]
    pub featured: Vec<String>,
    #[serde(default)]
    pub preload_featured: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CardcastError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CardcastError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CARDCAST_HOST})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn cache_dir(&self) -> &Path {
        &self.files.cache
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        let cardcast = &self.cardcast;

        validation::validate_non_empty_string("cardcast.host", &cardcast.host)?;
        validation::validate_base_url("cardcast", &cardcast.scheme, &cardcast.host, cardcast.port)?;
        validation::validate_range("cardcast.port", cardcast.port, 1, u16::MAX)?;
        validation::validate_deck_template("cardcast.deck_info", &cardcast.deck_info)?;
        validation::validate_deck_template("cardcast.deck_cards", &cardcast.deck_cards)?;

        if let Some(timeout) = cardcast.timeout_seconds {
            validation::validate_range("cardcast.timeout_seconds", timeout, 1, 3600)?;
        }

        let cache = self.files.cache.to_string_lossy();
        validation::validate_path("files.cache", &cache)?;

        self.server
            .bind
            .parse::<std::net::SocketAddr>()
            .map_err(|e| CardcastError::InvalidConfigValueError {
                field: "server.bind".to_string(),
                value: self.server.bind.clone(),
                reason: format!("Invalid socket address: {}", e),
            })?;

        Ok(())
    }
}
