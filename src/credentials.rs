//! API key resolution from the environment and the local secrets store.
//!
//! Resolution order:
//! 1. `GROQ_API_KEY` environment variable (a `.env` file in the working
//!    directory is loaded first via `dotenvy`)
//! 2. `groq_api_key` in `~/.dealdesk/secrets.toml`
//!
//! Absence from both sources is a fatal startup error; no view renders
//! without a credential.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::config::config_dir;

/// Environment variable consulted first.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// File name of the secrets store inside the config directory.
pub const SECRETS_FILE: &str = "secrets.toml";

/// A resolved Groq API key.
///
/// The wrapped value is deliberately excluded from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

impl ApiKey {
    /// Wrap a raw key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw secret, for constructing the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// On-disk secrets store format.
#[derive(Debug, Deserialize)]
struct SecretsFile {
    groq_api_key: Option<String>,
}

/// Resolve the Groq API key: environment first, secrets store second.
///
/// # Errors
///
/// Returns an error when neither source provides a non-empty key, or when a
/// present secrets file cannot be parsed.
pub fn resolve_api_key() -> anyhow::Result<ApiKey> {
    // A missing .env is fine; an unreadable one is not worth failing over.
    let _ = dotenvy::dotenv();

    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            debug!("using {API_KEY_ENV} from environment");
            return Ok(ApiKey::new(key.trim()));
        }
    }

    let secrets_path = config_dir()?.join(SECRETS_FILE);
    if let Some(key) = read_secrets_store(&secrets_path)? {
        debug!(path = %secrets_path.display(), "using groq_api_key from secrets store");
        return Ok(ApiKey::new(key));
    }

    anyhow::bail!(
        "{API_KEY_ENV} not found: set the environment variable or add \
         groq_api_key to {}",
        secrets_path.display()
    )
}

/// Read the key from a secrets TOML file, if the file exists.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn read_secrets_store(path: &Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read secrets store at {}", path.display()))?;
    let secrets: SecretsFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse secrets store at {}", path.display()))?;

    Ok(secrets
        .groq_api_key
        .map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty()))
}
