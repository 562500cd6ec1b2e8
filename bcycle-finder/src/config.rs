//! Process configuration.
//!
//! Read once at startup from the environment and passed by reference
//! into the pipeline. Nothing else looks at the environment.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::format::{Surface, UnknownSurface};
use crate::gbfs::{GbfsConfig, InvalidProgram, Program};

/// Program (city) whose feeds are queried.
pub const ENV_CITY: &str = "BCYCLE_CITY";
/// Comma separated station ids reported by the bare `bcycle` command.
pub const ENV_DEFAULT_STATIONS: &str = "BCYCLE_DEFAULT_STATIONS";
/// Feed host override.
pub const ENV_API_URL: &str = "BCYCLE_API_URL";
/// `rich` or `plain`.
pub const ENV_SURFACE: &str = "BCYCLE_SURFACE";
/// Name the bot answers to, used in help text.
pub const ENV_BOT_NAME: &str = "BCYCLE_BOT_NAME";
/// Address the HTTP adapter listens on.
pub const ENV_BIND: &str = "BCYCLE_BIND";
/// Feed request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "BCYCLE_TIMEOUT_SECS";
/// Directory of `{feed}.json` files to serve instead of the network.
pub const ENV_MOCK_DIR: &str = "BCYCLE_MOCK_DIR";

const DEFAULT_BOT_NAME: &str = "bot";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Errors in the process configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BCYCLE_CITY: {0}")]
    Program(#[from] InvalidProgram),

    #[error("BCYCLE_SURFACE: {0}")]
    Surface(#[from] UnknownSurface),

    #[error("BCYCLE_BIND: invalid socket address {0:?}")]
    Bind(String),

    #[error("BCYCLE_TIMEOUT_SECS: expected a number of seconds, got {0:?}")]
    Timeout(String),
}

/// Immutable configuration for the whole process.
#[derive(Debug, Clone)]
pub struct BcycleConfig {
    /// Configured program. `None` makes every command report a
    /// configuration error instead of fetching.
    pub program: Option<Program>,

    /// Normalized station ids for the bare `bcycle` command.
    pub default_station_ids: HashSet<String>,

    /// Feed client settings.
    pub gbfs: GbfsConfig,

    /// Output surface of the chat adapter.
    pub surface: Surface,

    /// Name the bot answers to.
    pub bot_name: String,

    /// Listen address of the HTTP adapter.
    pub bind_addr: SocketAddr,

    /// Serve feeds from this directory instead of the network.
    pub mock_dir: Option<PathBuf>,
}

impl BcycleConfig {
    /// Create a config for `program` with defaults for everything else.
    pub fn new(program: Option<Program>) -> Self {
        Self {
            program,
            default_station_ids: HashSet::new(),
            gbfs: GbfsConfig::new(),
            surface: Surface::default(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            mock_dir: None,
        }
    }

    /// Set the default stations from a comma separated list.
    pub fn with_default_stations(mut self, raw: &str) -> Self {
        self.default_station_ids = parse_station_ids(raw);
        self
    }

    /// Set the output surface.
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    /// Set the bot name used in help text.
    pub fn with_bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = name.into();
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup` (environment-style keys).
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let program = get(ENV_CITY).map(|v| Program::parse(&v)).transpose()?;

        let mut config = Self::new(program);

        if let Some(raw) = get(ENV_DEFAULT_STATIONS) {
            config.default_station_ids = parse_station_ids(&raw);
        }

        if let Some(url) = get(ENV_API_URL) {
            config.gbfs = config.gbfs.with_base_url(url.trim());
        }

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Timeout(raw.clone()))?;
            config.gbfs = config.gbfs.with_timeout(secs);
        }

        if let Some(raw) = get(ENV_SURFACE) {
            config.surface = raw.parse()?;
        }

        if let Some(name) = get(ENV_BOT_NAME) {
            config.bot_name = name.trim().to_string();
        }

        let bind = get(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        config.bind_addr = bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Bind(bind.clone()))?;

        config.mock_dir = get(ENV_MOCK_DIR).map(PathBuf::from);

        Ok(config)
    }
}

/// Parse a comma separated list of station ids.
///
/// Entries are trimmed, a leading `#` is dropped, and empty entries are
/// ignored, so `""` yields an empty set.
pub fn parse_station_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|id| id.trim().trim_start_matches('#').trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
