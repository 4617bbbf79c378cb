// Configuration module: loads the coinlayer access key (and an
// optional base-URL override) once at startup. The resulting value is
// passed explicitly into the API client rather than living in a
// process-wide global.

use anyhow::{Context, Result};

/// Default API host. Overridable through `COINLAYER_BASE_URL`.
const DEFAULT_BASE_URL: &str = "http://api.coinlayer.com/api";

/// Process configuration, immutable after startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Load configuration from the environment. A `.env` file in the
    /// working directory is read first if present. A missing
    /// `API_KEY` is a fatal startup condition.
    pub fn from_env() -> Result<Self> {
        // Absence of the .env file itself is fine; the variable may
        // come from the real environment.
        dotenvy::dotenv().ok();

        let api_key = std::env::var("API_KEY")
            .context("API_KEY not found. Please check your environment or .env file")?;
        let base_url =
            std::env::var("COINLAYER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Ok(Config { api_key, base_url })
    }
}
