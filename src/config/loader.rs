// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the path to the default configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("neat-pong");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from `path`, or create a default file there if it doesn't exist
///
/// A file that fails to parse is not fatal: a warning is logged and defaults are used.
pub fn load_config_from(path: &Path) -> Result<Config, io::Error> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        Ok(parse_config(&contents))
    } else {
        create_default_config(path)?;
        Ok(Config::default())
    }
}

/// Parse TOML contents, falling back to defaults on error
pub fn parse_config(contents: &str) -> Config {
    match toml::from_str(contents) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let commented_toml = format!(
        "# neat-pong configuration file\n\
         # Any section or key may be omitted; missing values use the defaults below\n\
         #\n\
         # physics:    board/paddle/ball geometry in pixels (y grows downward)\n\
         # training:   match stopping rule, fitness bonus, seeds and output paths\n\
         # evolution:  population size, network shape and mutation rates\n\
         # keybindings: \"Up\", \"Down\", \"Esc\" or single characters like \"W\"\n\n\
         {}",
        toml_string
    );

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, commented_toml)?;
    info!("Created default config file at: {}", path.display());
    Ok(())
}
