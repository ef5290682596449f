use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Environment variable that relocates every persisted file.
pub const CONFIG_DIR_ENV: &str = "PADEL_CONFIG_DIR";
pub const ENV_PREFIX: &str = "PADEL";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, an optional
/// `config.{toml,json,yaml}` inside the resolved config directory, then
/// `PADEL__SECTION__KEY` environment variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    load_config_from(&resolve_config_dir())
}

/// Same as [`load_config`] but rooted at an explicit directory.
pub fn load_config_from(dir: &Path) -> Result<AppConfig, ConfigError> {
    let file_stem = dir.join("config");
    debug!("Loading configuration from {}", file_stem.display());

    let builder = Config::builder()
        .add_source(File::with_name(&file_stem.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

    let mut config: AppConfig = builder.build()?.try_deserialize()?;
    if config.storage.config_dir.is_none() {
        config.storage.config_dir = Some(dir.to_path_buf());
    }
    if config.storage.default_timezone.trim().is_empty() {
        config.storage.default_timezone = DEFAULT_VENUE_TIMEZONE.to_string();
    }
    Ok(config)
}

/// Resolves the per-user configuration directory.
///
/// `PADEL_CONFIG_DIR` wins, then `$XDG_CONFIG_HOME/padel`, then the
/// platform config dir, then `~/.config/padel`.
pub fn resolve_config_dir() -> PathBuf {
    if let Some(dir) = non_empty_var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = non_empty_var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("padel");
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("padel");
    }
    dirs::home_dir()
        .map(|home| home.join(".config").join("padel"))
        .unwrap_or_else(|| PathBuf::from(".padel"))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the `.env` file into the process environment, once.
///
/// `DOTENV_OVERRIDE` names an alternative file. A missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
