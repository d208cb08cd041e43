// Configuration loader
// Layers defaults, ~/.gstc/config.toml and GSTC_* environment variables

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::ClientConfig;
use crate::client::{DEFAULT_HOST, DEFAULT_PORT};

/// Prefix for environment overrides (GSTC_HOST, GSTC_PORT)
pub const ENV_PREFIX: &str = "GSTC";

/// Default config file location
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".gstc").join("config.toml"))
}

/// Load configuration from ~/.gstc/config.toml and the environment
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(&default_config_path()?)
}

/// Load configuration from an explicit file; a missing file is not an error
pub fn load_config_from(path: &Path) -> Result<ClientConfig> {
    let settings = ::config::Config::builder()
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", i64::from(DEFAULT_PORT))?
        .add_source(
            ::config::File::from(path)
                .format(::config::FileFormat::Toml)
                .required(false),
        )
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let client_config: ClientConfig = settings
        .try_deserialize()
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!(
        host = %client_config.host,
        port = client_config.port,
        "Loaded client configuration"
    );

    Ok(client_config)
}

/// Write the default configuration to `path`
pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(&ClientConfig::default())
        .context("Failed to serialize default config")?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}
