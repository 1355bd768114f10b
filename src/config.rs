use std::env;
use std::path::PathBuf;

const DEF_ADVISORY_BASE_URL: &str = "https://api.cohere.com";
const DEF_ADVISORY_MODEL: &str = "command-r7b-12-2024";
const DEF_CONSOLE_BIND: &str = "0.0.0.0:4545";

/// Process configuration, resolved once from environment variables at startup.
///
/// All values have working defaults except the advisory API key: when
/// `ADVISORY_API_KEY` is absent the advisory tier is disabled entirely and
/// every diversion request is answered by the deterministic fallback tier.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the advisory chat API.
    advisory_base_url: String,
    /// Credential for the advisory API; `None` disables tier 1.
    advisory_api_key: Option<String>,
    /// Model identifier passed to the advisory chat endpoint.
    advisory_model: String,
    /// Optional path to the persistent airport catalog (JSON array).
    airport_db: Option<PathBuf>,
    /// Bind address for the console bridge endpoint.
    console_bind: String,
}

impl Config {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            advisory_base_url: non_empty("ADVISORY_BASE_URL")
                .unwrap_or_else(|| DEF_ADVISORY_BASE_URL.to_string()),
            advisory_api_key: non_empty("ADVISORY_API_KEY"),
            advisory_model: non_empty("ADVISORY_MODEL")
                .unwrap_or_else(|| DEF_ADVISORY_MODEL.to_string()),
            airport_db: non_empty("AIRPORT_DB").map(PathBuf::from),
            console_bind: non_empty("CONSOLE_BIND")
                .unwrap_or_else(|| DEF_CONSOLE_BIND.to_string()),
        }
    }

    pub fn advisory_base_url(&self) -> &str { &self.advisory_base_url }
    pub fn advisory_api_key(&self) -> Option<&str> { self.advisory_api_key.as_deref() }
    pub fn advisory_model(&self) -> &str { &self.advisory_model }
    pub fn airport_db(&self) -> Option<&PathBuf> { self.airport_db.as_ref() }
    pub fn console_bind(&self) -> &str { &self.console_bind }
}
