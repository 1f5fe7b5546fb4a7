//! Settings for the website service.
//!
//! Sources, lowest to highest: `config/default.*`, `nazim-site.*`,
//! `--config-file`, `NAZIM_SITE__SECTION__KEY` variables, command flags.

mod cli;

use std::{
    net::SocketAddr,
    num::{NonZeroU32, NonZeroU64, NonZeroUsize},
    str::FromStr,
    time::Duration,
};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub use cli::{
    CliArgs, Command, DatabaseOverride, MigrateArgs, SeoReportArgs, ServeArgs, ServeOverrides,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "nazim-site";
const ENV_PREFIX: &str = "NAZIM_SITE";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_ADMIN_HOST: &str = "127.0.0.1";
const DEFAULT_PUBLIC_PORT: u16 = 3000;
const DEFAULT_ADMIN_PORT: u16 = 3001;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 30;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_PUBLIC_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_PUBLIC_CACHE_MAX_ENTRIES: usize = 500;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u64 = 5;

/// Validated settings, with every default filled in.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub public_addr: SocketAddr,
    pub admin_addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Zero disables the public response cache.
    pub public_ttl: Duration,
    /// Least recently used entries are evicted past this many.
    pub max_entries: NonZeroUsize,
}

#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub window: Duration,
    pub max_requests: NonZeroU32,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_command_overrides(cli.command.as_ref());
    Settings::from_raw(raw)
}

/// Parse the process arguments and resolve settings from them.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    database: RawDatabaseSettings,
    cache: RawCacheSettings,
    rate_limit: RawRateLimitSettings,
}

impl RawSettings {
    fn apply_command_overrides(&mut self, command: Option<&Command>) {
        match command {
            Some(Command::Serve(args)) => self.apply_serve_overrides(&args.overrides),
            Some(Command::Migrate(args)) => self.apply_database_override(&args.database),
            Some(Command::SeoReport(args)) => self.apply_database_override(&args.database),
            None => self.apply_serve_overrides(&ServeOverrides::default()),
        }
    }

    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        let server = &mut self.server;
        overlay(&mut server.host, overrides.server_host.as_ref());
        overlay(&mut server.admin_host, overrides.server_admin_host.as_ref());
        overlay(&mut server.public_port, overrides.public_port.as_ref());
        overlay(&mut server.admin_port, overrides.admin_port.as_ref());
        overlay(
            &mut server.graceful_shutdown_seconds,
            overrides.server_graceful_shutdown_seconds.as_ref(),
        );

        overlay(&mut self.logging.level, overrides.log_level.as_ref());
        overlay(&mut self.logging.json, overrides.log_json.as_ref());

        self.apply_database_override(&overrides.database);
        overlay(
            &mut self.database.max_connections,
            overrides.database_max_connections.as_ref(),
        );

        overlay(
            &mut self.cache.public_ttl_seconds,
            overrides.cache_public_ttl_seconds.as_ref(),
        );
        overlay(
            &mut self.cache.max_entries,
            overrides.cache_max_entries.as_ref(),
        );
        overlay(
            &mut self.rate_limit.window_seconds,
            overrides.rate_limit_window_seconds.as_ref(),
        );
        overlay(
            &mut self.rate_limit.max_requests,
            overrides.rate_limit_max_requests.as_ref(),
        );
    }

    fn apply_database_override(&mut self, overrides: &DatabaseOverride) {
        overlay(&mut self.database.url, overrides.database_url.as_ref());
    }
}

// A flag given on the command line wins over every file and env layer.
fn overlay<T: Clone>(slot: &mut Option<T>, flag: Option<&T>) {
    if let Some(value) = flag {
        *slot = Some(value.clone());
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            database,
            cache,
            rate_limit,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            database: build_database_settings(database)?,
            cache: build_cache_settings(cache)?,
            rate_limit: build_rate_limit_settings(rate_limit)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let public_addr = listener_addr(
        server.host.as_deref().unwrap_or(DEFAULT_HOST),
        server.public_port.unwrap_or(DEFAULT_PUBLIC_PORT),
        "server.public_port",
    )?;
    let admin_addr = listener_addr(
        server.admin_host.as_deref().unwrap_or(DEFAULT_ADMIN_HOST),
        server.admin_port.unwrap_or(DEFAULT_ADMIN_PORT),
        "server.admin_port",
    )?;
    if public_addr == admin_addr {
        return Err(LoadError::invalid(
            "server.admin_port",
            "admin listener must not share the public address",
        ));
    }

    let graceful_shutdown = server
        .graceful_shutdown_seconds
        .map_or(Some(DEFAULT_GRACEFUL_SHUTDOWN_SECS), |secs| {
            NonZeroU64::new(secs).map(NonZeroU64::get)
        })
        .map(Duration::from_secs)
        .ok_or_else(|| {
            LoadError::invalid("server.graceful_shutdown_seconds", "must be greater than zero")
        })?;

    Ok(ServerSettings {
        public_addr,
        admin_addr,
        graceful_shutdown,
    })
}

fn listener_addr(host: &str, port: u16, key: &'static str) -> Result<SocketAddr, LoadError> {
    if port == 0 {
        return Err(LoadError::invalid(key, "port must be greater than zero"));
    }
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| LoadError::invalid(key, format!("invalid address `{candidate}`: {err}")))
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = logging
        .level
        .as_deref()
        .map(LevelFilter::from_str)
        .transpose()
        .map_err(|err| LoadError::invalid("logging.level", format!("unknown level: {err}")))?
        .unwrap_or(LevelFilter::INFO);

    let format = match logging.json {
        Some(true) => LogFormat::Json,
        Some(false) | None => LogFormat::Compact,
    };

    Ok(LoggingSettings { level, format })
}

fn build_database_settings(database: RawDatabaseSettings) -> Result<DatabaseSettings, LoadError> {
    // `migrate` and `serve` check for the URL themselves; here blank means unset.
    let url = database
        .url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
    let max_connections = non_zero_u32(
        u64::from(
            database
                .max_connections
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
        ),
        "database.max_connections",
    )?;

    Ok(DatabaseSettings {
        url,
        max_connections,
    })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let ttl = cache
        .public_ttl_seconds
        .unwrap_or(DEFAULT_PUBLIC_CACHE_TTL_SECS);
    let max_entries = NonZeroUsize::new(
        cache
            .max_entries
            .unwrap_or(DEFAULT_PUBLIC_CACHE_MAX_ENTRIES),
    )
    .ok_or_else(|| LoadError::invalid("cache.max_entries", "must be greater than zero"))?;

    Ok(CacheSettings {
        public_ttl: Duration::from_secs(ttl),
        max_entries,
    })
}

fn build_rate_limit_settings(
    rate_limit: RawRateLimitSettings,
) -> Result<RateLimitSettings, LoadError> {
    let window_seconds = non_zero_u32(
        rate_limit
            .window_seconds
            .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS),
        "rate_limit.window_seconds",
    )?;
    let max_requests = non_zero_u32(
        rate_limit
            .max_requests
            .unwrap_or(DEFAULT_RATE_LIMIT_MAX_REQUESTS),
        "rate_limit.max_requests",
    )?;

    Ok(RateLimitSettings {
        window: Duration::from_secs(window_seconds.get().into()),
        max_requests,
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    admin_host: Option<String>,
    public_port: Option<u16>,
    admin_port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDatabaseSettings {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    public_ttl_seconds: Option<u64>,
    max_entries: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRateLimitSettings {
    window_seconds: Option<u64>,
    max_requests: Option<u64>,
}

fn non_zero_u32(value: u64, key: &'static str) -> Result<NonZeroU32, LoadError> {
    let value: u32 = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "must fit in 32 bits"))?;
    NonZeroU32::new(value).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}
