//! Text commands understood by the shell and the server.
//!
//! A request is one line of whitespace-separated words. `Request::parse`
//! checks the verb and its arguments, `Request::execute` runs it against a
//! `Cache<String, Bytes>` and renders the one-line reply.

use bytes::Bytes;
use std::time::Duration;

use crate::cache::Cache;
use crate::error::{CacheError, CacheResult};

/// Types of commands supported by the shell and the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert or update a key-value pair.
    Put,
    /// Get a value by key.
    Get,
    /// Remove a key.
    Remove,
    /// List entries from most to least recently used.
    Display,
    /// Show hit/miss statistics.
    Stats,
    /// Health check.
    Ping,
    /// End the session.
    Quit,
    /// Invalid or unknown command.
    Invalid,
}

impl Command {
    /// Look up a verb (case-insensitive). Unknown verbs map to
    /// `Command::Invalid`.
    pub fn lookup(s: &str) -> Command {
        match s.to_lowercase().as_str() {
            "put" | "set" => Command::Put,
            "get" => Command::Get,
            "remove" | "delete" | "del" => Command::Remove,
            "display" | "show" | "list" => Command::Display,
            "stats" | "info" => Command::Stats,
            "ping" => Command::Ping,
            "quit" | "exit" => Command::Quit,
            _ => Command::Invalid,
        }
    }

    /// Parse a verb, returning an error for unknown commands.
    pub fn parse(s: &str) -> CacheResult<Command> {
        match Self::lookup(s) {
            Command::Invalid => Err(CacheError::InvalidCommand(s.to_string())),
            cmd => Ok(cmd),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Put => "put",
            Command::Get => "get",
            Command::Remove => "remove",
            Command::Display => "display",
            Command::Stats => "stats",
            Command::Ping => "ping",
            Command::Quit => "quit",
            Command::Invalid => "invalid",
        }
    }

    /// One-line usage string.
    pub fn usage(&self) -> &'static str {
        match self {
            Command::Put => "put <key> <value> [ttl_seconds]",
            Command::Get => "get <key>",
            Command::Remove => "remove <key>",
            Command::Display => "display",
            Command::Stats => "stats",
            Command::Ping => "ping",
            Command::Quit => "quit",
            Command::Invalid => "",
        }
    }

    /// All commands a user can type, in help order.
    pub fn all() -> [Command; 7] {
        [
            Command::Put,
            Command::Get,
            Command::Remove,
            Command::Display,
            Command::Stats,
            Command::Ping,
            Command::Quit,
        ]
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Put {
        key: String,
        value: String,
        /// `None` uses the cache's default TTL; `Some(ZERO)` never expires.
        ttl: Option<Duration>,
    },
    Get {
        key: String,
    },
    Remove {
        key: String,
    },
    Display,
    Stats,
    Ping,
    Quit,
}

impl Request {
    /// Build a request from the words of one input line.
    pub fn parse(parts: &[String]) -> CacheResult<Request> {
        let (verb, args) = parts
            .split_first()
            .ok_or_else(|| CacheError::ParseError("empty command".to_string()))?;
        let command = Command::parse(verb)?;

        match (command, args) {
            (Command::Put, [key, value]) => Ok(Request::Put {
                key: key.clone(),
                value: value.clone(),
                ttl: None,
            }),
            (Command::Put, [key, value, ttl]) => Ok(Request::Put {
                key: key.clone(),
                value: value.clone(),
                ttl: Some(parse_ttl(ttl)?),
            }),
            (Command::Get, [key]) => Ok(Request::Get { key: key.clone() }),
            (Command::Remove, [key]) => Ok(Request::Remove { key: key.clone() }),
            (Command::Display, []) => Ok(Request::Display),
            (Command::Stats, []) => Ok(Request::Stats),
            (Command::Ping, []) => Ok(Request::Ping),
            (Command::Quit, []) => Ok(Request::Quit),
            (command, _) => Err(CacheError::ParseError(format!(
                "wrong number of arguments, usage: {}",
                command.usage()
            ))),
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Request::Put { .. } => Command::Put,
            Request::Get { .. } => Command::Get,
            Request::Remove { .. } => Command::Remove,
            Request::Display => Command::Display,
            Request::Stats => Command::Stats,
            Request::Ping => Command::Ping,
            Request::Quit => Command::Quit,
        }
    }

    /// Run the request and render the reply line.
    ///
    /// Misses on `get` and `remove` come back as `CacheError::KeyNotFound`.
    pub fn execute(self, cache: &Cache<String, Bytes>) -> CacheResult<String> {
        match self {
            Request::Put { key, value, ttl } => {
                let value = Bytes::from(value);
                match ttl {
                    Some(ttl) => cache.put_with_ttl(key, value, ttl),
                    None => cache.put(key, value),
                }
                Ok("OK".to_string())
            }
            Request::Get { key } => cache
                .get(&key)
                .map(|value| String::from_utf8_lossy(&value).into_owned())
                .ok_or(CacheError::KeyNotFound(key)),
            Request::Remove { key } => cache
                .remove(&key)
                .map(|_| "OK".to_string())
                .ok_or(CacheError::KeyNotFound(key)),
            Request::Display => Ok(render_snapshot(&cache.snapshot())),
            Request::Stats => {
                let stats = cache.stats();
                Ok(format!(
                    "hits:{} misses:{} evictions:{} expirations:{} size:{} capacity:{} hit_rate:{:.1}%",
                    stats.hits,
                    stats.misses,
                    stats.evictions,
                    stats.expirations,
                    stats.size,
                    stats.capacity,
                    stats.hit_rate
                ))
            }
            Request::Ping => Ok("PONG".to_string()),
            Request::Quit => Ok("BYE".to_string()),
        }
    }
}

fn parse_ttl(raw: &str) -> CacheResult<Duration> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| CacheError::ParseError(format!("invalid TTL '{}', expected seconds", raw)))
}

fn render_snapshot(entries: &[(String, Bytes)]) -> String {
    if entries.is_empty() {
        return "Cache [MRU -> LRU]: (empty)".to_string();
    }
    let items: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("({},{})", key, String::from_utf8_lossy(value)))
        .collect();
    format!("Cache [MRU -> LRU]: {}", items.join(" "))
}

/// Render an execution result the way both shells print it.
pub fn render_reply(result: CacheResult<String>) -> String {
    match result {
        Ok(reply) => reply,
        Err(err) => format!("ERR {}", err),
    }
}
