//! Server settings: an optional TOML file layered under `SPORTCAL_*`
//! environment variables.

use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use sportcal_core::pagination::PaginationDefaults;

/// Environment variable prefix, e.g. `SPORTCAL_PORT=9000`.
pub const ENV_PREFIX: &str = "SPORTCAL";

/// Top-level server configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// SQLite database file. A leading `~/` is expanded at startup.
  pub store_path:    PathBuf,
  /// Browser frontend served at `/` and `/static`. `~/` is expanded too.
  pub static_dir:    PathBuf,
  pub default_page:  i64,
  pub default_limit: i64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "0.0.0.0".to_string(),
      port:          8080,
      store_path:    PathBuf::from("sportcal.db"),
      static_dir:    PathBuf::from("static"),
      default_page:  1,
      default_limit: 10,
    }
  }
}

impl ServerConfig {
  /// Read `path` if it exists, then apply environment overrides.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    config::Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
      .build()?
      .try_deserialize()
  }

  #[cfg(test)]
  fn from_toml(text: &str) -> Result<Self, ConfigError> {
    use config::FileFormat;

    config::Config::builder()
      .add_source(File::from_str(text, FileFormat::Toml))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The listing fallbacks; fails if either value is not positive.
  pub fn pagination(&self) -> sportcal_core::Result<PaginationDefaults> {
    PaginationDefaults::new(self.default_page, self.default_limit)
  }

  /// `store_path` with a leading `~` expanded to `$HOME`.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn resolved_static_dir(&self) -> PathBuf { expand_tilde(&self.static_dir) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
