use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// `nazim-site [--config-file PATH] [serve|migrate|seo-report]`
#[derive(Debug, Parser)]
#[command(
    name = "nazim-site",
    version,
    about = "Nazim school website backend"
)]
pub struct CliArgs {
    /// Extra settings file layered above `config/default` and `nazim-site`.
    #[arg(long = "config-file", env = "NAZIM_SITE_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the public and admin HTTP services.
    Serve(Box<ServeArgs>),
    /// Apply pending database migrations and exit.
    Migrate(MigrateArgs),
    /// Print the SEO completeness audit as JSON.
    #[command(name = "seo-report")]
    SeoReport(SeoReportArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct DatabaseOverride {
    /// Postgres connection URL, e.g. `postgres://nazim@localhost/nazim_site`.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SeoReportArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,

    /// Case-insensitive substring matched against title and slug.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Restrict to one content type (all|page|post).
    #[arg(long = "type", value_name = "TYPE", default_value = "all")]
    pub item_type: String,

    /// Restrict by completeness (all|needs|complete).
    #[arg(long, value_name = "STATUS", default_value = "all")]
    pub status: String,
}

/// Flags accepted by `serve`; each one replaces the matching config key.
#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Host for the public site listener.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Host for the website-manager listener.
    #[arg(long = "server-admin-host", value_name = "HOST")]
    pub server_admin_host: Option<String>,

    #[arg(long = "server-public-port", value_name = "PORT")]
    pub public_port: Option<u16>,

    #[arg(long = "server-admin-port", value_name = "PORT")]
    pub admin_port: Option<u16>,

    /// Seconds in-flight requests get to finish after a shutdown signal.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// trace|debug|info|warn|error
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit one JSON object per log line.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    #[command(flatten)]
    pub database: DatabaseOverride,

    #[arg(long = "database-max-connections", value_name = "COUNT")]
    pub database_max_connections: Option<u32>,

    /// Lifetime of cached public responses; 0 turns the cache off.
    #[arg(long = "cache-public-ttl-seconds", value_name = "SECONDS")]
    pub cache_public_ttl_seconds: Option<u64>,

    /// Upper bound on cached public responses.
    #[arg(long = "cache-max-entries", value_name = "COUNT")]
    pub cache_max_entries: Option<usize>,

    /// Length of the contact/question submission window.
    #[arg(long = "rate-limit-window-seconds", value_name = "SECONDS")]
    pub rate_limit_window_seconds: Option<u64>,

    /// Submissions one client may make per window.
    #[arg(long = "rate-limit-max-requests", value_name = "COUNT")]
    pub rate_limit_max_requests: Option<u64>,
}
