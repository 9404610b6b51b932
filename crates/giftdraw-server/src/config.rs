//! Server configuration.
//!
//! Loaded with the `config` crate in three layers, later ones winning:
//! built-in defaults, an optional `giftdraw.toml`, then `GIFTDRAW_*`
//! environment variables (e.g. `GIFTDRAW_PORT=9000`).

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use giftdraw::store::SeedSource;
use giftdraw::{AdminGate, DrawStrategy, EngineConfig, MatchMode};

use crate::error::ServerError;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GIFTDRAW";

/// Config file looked up in the working directory (extension optional).
pub const DEFAULT_CONFIG_FILE: &str = "giftdraw";

/// Which store backend holds the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A JSON document replaced atomically on every write.
    #[default]
    File,
    /// A SQLite database.
    Sqlite,
    /// Process memory only. State is lost on restart.
    Memory,
}

/// Complete server configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The host address to bind to.
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
    /// Store backend.
    pub backend: Backend,
    /// Where the file or SQLite backend keeps its state.
    pub data_path: PathBuf,
    /// Roster seed used before any durable state exists. Falls back to the
    /// built-in list when unset or missing.
    pub seed_path: Option<PathBuf>,
    /// How name queries match display names.
    pub match_mode: MatchMode,
    /// How targets are picked.
    pub strategy: DrawStrategy,
    /// Secret for `/pairs` and `/reset`. Unset disables both.
    pub admin_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3000,
            backend: Backend::File,
            data_path: PathBuf::from("giftdraw.json"),
            seed_path: None,
            match_mode: MatchMode::Exact,
            strategy: DrawStrategy::Uniform,
            admin_key: None,
        }
    }
}

impl ServerConfig {
    /// Load from `giftdraw.toml` (if present) and the process environment.
    pub fn load() -> Result<Self, ServerError> {
        Self::load_from(Some(Path::new(DEFAULT_CONFIG_FILE)), None)
    }

    /// Load from an optional config file and an environment.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ServerError> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            let name = path.to_string_lossy();
            builder = builder.add_source(File::with_name(&name).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        let config = builder
            .build()
            .and_then(|config| config.try_deserialize::<ServerConfig>())
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            match_mode: self.match_mode,
            strategy: self.strategy,
            admin: AdminGate::new(self.admin_key.clone()),
        }
    }

    /// Seed source derived from `seed_path`.
    pub fn seed_source(&self) -> SeedSource {
        match &self.seed_path {
            Some(path) => SeedSource::File(path.clone()),
            None => SeedSource::Builtin,
        }
    }

    /// `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("backend", &self.backend)
            .field("data_path", &self.data_path)
            .field("seed_path", &self.seed_path)
            .field("match_mode", &self.match_mode)
            .field("strategy", &self.strategy)
            .field("admin_key", &self.admin_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
