//! Store configuration, read from an optional TOML file and `KADDEM_*`
//! environment variables (the latter win).

use std::path::{Path, PathBuf};

use ::config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::Result;

pub const DEFAULT_STORE_PATH: &str = "kaddem.db";

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  /// SQLite database file. A leading `~/` is expanded on open.
  #[serde(default = "default_path")]
  pub path: PathBuf,
}

fn default_path() -> PathBuf { PathBuf::from(DEFAULT_STORE_PATH) }

impl Default for StoreConfig {
  fn default() -> Self { Self { path: default_path() } }
}

impl StoreConfig {
  /// Load from `file` (which may be absent) overlaid with the environment,
  /// e.g. `KADDEM_PATH=/var/lib/kaddem.db`.
  pub fn load(file: impl AsRef<Path>) -> Result<Self> {
    Self::from_builder(
      Config::builder()
        .add_source(File::from(file.as_ref().to_path_buf()).required(false))
        .add_source(Environment::with_prefix("KADDEM")),
    )
  }

  pub(crate) fn from_builder(
    builder: ConfigBuilder<DefaultState>,
  ) -> Result<Self> {
    Ok(builder.build()?.try_deserialize()?)
  }

  /// The configured path with a leading `~` expanded to `$HOME`.
  pub fn resolved_path(&self) -> PathBuf { expand_tilde(&self.path) }
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
