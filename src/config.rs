//! Configuration loading and validation.
//!
//! DealDesk reads an optional `config.toml`. Every field carries a serde
//! default, so a missing file yields a fully usable configuration; a present
//! but malformed file is a fatal startup error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Model invocation parameters.
    #[serde(default)]
    pub model: ModelConfig,

    /// Data directory and input file names.
    #[serde(default)]
    pub data: DataConfig,
}

/// Model invocation parameters for the chat-completions call.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub id: String,

    /// Sampling temperature. Low-randomness but not greedy.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Response token cap.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Location and names of the four input tables.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory the CSV files are read from.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Accounts table file name.
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,

    /// Opportunities table file name.
    #[serde(default = "default_opportunities_file")]
    pub opportunities_file: String,

    /// Contacts table file name.
    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,

    /// Tasks table file name.
    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            accounts_file: default_accounts_file(),
            opportunities_file: default_opportunities_file(),
            contacts_file: default_contacts_file(),
            tasks_file: default_tasks_file(),
        }
    }
}

impl DataConfig {
    /// Full path to the accounts CSV.
    pub fn accounts_path(&self) -> PathBuf {
        self.dir.join(&self.accounts_file)
    }

    /// Full path to the opportunities CSV.
    pub fn opportunities_path(&self) -> PathBuf {
        self.dir.join(&self.opportunities_file)
    }

    /// Full path to the contacts CSV.
    pub fn contacts_path(&self) -> PathBuf {
        self.dir.join(&self.contacts_file)
    }

    /// Full path to the tasks CSV.
    pub fn tasks_path(&self) -> PathBuf {
        self.dir.join(&self.tasks_file)
    }
}

// Default value functions for serde

fn default_model() -> String {
    "openai/gpt-oss-120b".to_owned()
}
fn default_temperature() -> f64 {
    0.4
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_accounts_file() -> String {
    "accounts.csv".to_owned()
}
fn default_opportunities_file() -> String {
    "opportunities.csv".to_owned()
}
fn default_contacts_file() -> String {
    "contacts.csv".to_owned()
}
fn default_tasks_file() -> String {
    "tasks.csv".to_owned()
}

/// Load configuration from a TOML file, or defaults when the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Resolve the default config directory (`~/.dealdesk/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".dealdesk"))
}
