use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the weekly-digest binary.
#[derive(Debug, Parser)]
#[command(
    name = "weekly-digest",
    version,
    about = "Weekly digest content service"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "DIGEST_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP API.
    Serve(Box<ServeArgs>),
    /// Print the tag groups as JSON.
    Tags(TagsArgs),
    /// Print one content record as JSON.
    Content(ContentArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ContentOverrides {
    /// Override the content source path (file or directory).
    #[arg(long = "content-path", value_name = "PATH", value_hint = ValueHint::AnyPath)]
    pub content_path: Option<PathBuf>,

    /// Override the content source kind.
    #[arg(long = "content-kind", value_name = "KIND", value_parser = ["file", "directory"])]
    pub content_kind: Option<String>,

    /// Read precomputed tag groups from this file instead of aggregating.
    #[arg(long = "content-tag-groups-path", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub tag_groups_path: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub content: ContentOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Toggle the memo cache.
    #[arg(
        long = "cache-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub cache_enabled: Option<bool>,

    /// Log memo cache hits and misses.
    #[arg(
        long = "cache-debug",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub cache_debug: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct TagsArgs {
    #[command(flatten)]
    pub content: ContentOverrides,
}

#[derive(Debug, Args, Clone)]
pub struct ContentArgs {
    #[command(flatten)]
    pub content: ContentOverrides,

    /// Identifier stored in `metadata.contentId`.
    #[arg(value_name = "CONTENT_ID")]
    pub content_id: String,
}
