use crate::Config;
use anyhow::Result;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use xdg::BaseDirectories;

const COMMENT_HEADER: &str = "# scrollwm configuration
# Unset keys take their default value.

";

/// `$XDG_CONFIG_HOME/scrollwm/config.toml`, with its directory created.
///
/// # Errors
///
/// Errors when the XDG base directories cannot be determined or the config
/// directory cannot be created.
pub fn get_default_path() -> Result<PathBuf> {
    Ok(BaseDirectories::with_prefix("scrollwm")?.place_config_file("config.toml")?)
}

/// Load the configuration from `path`, or from the default location when no
/// path is given. A missing default file is written out with the defaults.
///
/// # Errors
///
/// Errors if the file cannot be read or is not valid TOML, or if the default
/// file cannot be created.
pub fn load_config_file(path: Option<PathBuf>) -> Result<Config> {
    tracing::debug!("Loading config file");
    let path = match path {
        Some(path) => path,
        None => {
            let path = get_default_path()?;
            if !path.exists() {
                tracing::debug!("Config file not found. Using default config file.");
                let config = Config::default();
                write_to_file(&path, &config)?;
                return Ok(config);
            }
            path
        }
    };
    tracing::debug!("Config file '{}' found.", path.to_string_lossy());
    read_config(&path)
}

/// # Errors
///
/// Errors if the file cannot be read or parsed.
pub fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// # Errors
/// This function errors when:
/// - serialization of the config fails
/// - writing to file fails
pub fn write_to_file(path: &Path, config: &Config) -> Result<()> {
    let toml = toml::to_string_pretty(config)?;
    let mut file = File::create(path)?;
    file.write_all(COMMENT_HEADER.as_bytes())?;
    file.write_all(toml.as_bytes())?;
    Ok(())
}
