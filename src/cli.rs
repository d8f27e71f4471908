//! Command-line interface definitions.
//!
//! This module defines the CLI structures for the interactive shell, the
//! server and the client using clap. Cache options can also come from the
//! environment.

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::config::{CacheConfig, DEFAULT_CAPACITY};
use crate::error::{CacheError, CacheResult};

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Options shared by every binary that owns a cache.
#[derive(Args, Debug, Clone)]
pub struct CacheArgs {
    /// Maximum number of entries before LRU eviction kicks in.
    #[arg(short, long, env = "CACHE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// TTL in seconds for entries stored without one (0 = never expire).
    #[arg(long, env = "CACHE_DEFAULT_TTL", default_value_t = 0)]
    pub default_ttl: u64,

    /// Ignore TTLs entirely.
    #[arg(long)]
    pub no_expiry: bool,

    /// Do not track hit/miss statistics.
    #[arg(long)]
    pub no_stats: bool,
}

impl CacheArgs {
    pub fn to_config(&self) -> CacheConfig {
        CacheConfig::new(self.capacity)
            .default_ttl(Duration::from_secs(self.default_ttl))
            .expiry(!self.no_expiry)
            .track_stats(!self.no_stats)
            .build()
    }
}

/// Interactive LRU cache shell.
#[derive(Parser, Debug)]
#[command(name = "lru-ttl-cache")]
#[command(author, version, about, long_about = None)]
pub struct ShellCli {
    #[command(flatten)]
    pub cache: CacheArgs,
}

/// LRU cache server.
#[derive(Parser, Debug)]
#[command(name = "cache-server")]
#[command(author, version, about, long_about = None)]
pub struct ServerCli {
    /// Address to listen on.
    #[arg(long, env = "CACHE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "CACHE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[command(flatten)]
    pub cache: CacheArgs,
}

impl ServerCli {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// LRU cache client.
///
/// A CLI tool for interacting with the cache server.
#[derive(Parser, Debug)]
#[command(name = "cache-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Server host.
    #[arg(long, env = "CACHE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port.
    #[arg(short, long, env = "CACHE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The command to execute.
    #[command(subcommand)]
    pub command: ClientCommand,
}

/// Available client commands.
#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Store a key-value pair.
    ///
    /// Overwrites the value (and TTL) if the key already exists.
    Put {
        /// The key to store the value under.
        key: String,
        /// The value to store.
        value: String,
        /// Seconds until the entry expires (0 = never).
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Get a value by key.
    Get {
        /// The key to look up.
        key: String,
    },

    /// Remove a key.
    Remove {
        /// The key to remove.
        key: String,
    },

    /// List entries from most to least recently used.
    Display,

    /// Show hit/miss statistics.
    Stats,

    /// Check that the server is responsive.
    Ping,
}

impl ClientCommand {
    /// The protocol line for this command, without the terminator.
    ///
    /// Keys and values travel as single words, so empty ones and ones
    /// containing whitespace are rejected.
    pub fn to_line(&self) -> CacheResult<String> {
        let line = match self {
            ClientCommand::Put {
                key,
                value,
                ttl: Some(ttl),
            } => format!("put {} {} {}", word(key)?, word(value)?, ttl),
            ClientCommand::Put { key, value, .. } => {
                format!("put {} {}", word(key)?, word(value)?)
            }
            ClientCommand::Get { key } => format!("get {}", word(key)?),
            ClientCommand::Remove { key } => format!("remove {}", word(key)?),
            ClientCommand::Display => "display".to_string(),
            ClientCommand::Stats => "stats".to_string(),
            ClientCommand::Ping => "ping".to_string(),
        };
        Ok(line)
    }
}

fn word(arg: &str) -> CacheResult<&str> {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        return Err(CacheError::ParseError(format!(
            "'{}' must be a single word without whitespace",
            arg
        )));
    }
    Ok(arg)
}
