//! Interactive shell for the LRU cache.
//!
//! Reads one command per line from stdin and prints the reply:
//!
//! ```bash
//! cargo run -- --capacity 2
//! > put 1 10
//! OK
//! > get 1
//! 10
//! ```

use bytes::Bytes;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lru_ttl_cache::cli::ShellCli;
use lru_ttl_cache::command::render_reply;
use lru_ttl_cache::utils::parse_command;
use lru_ttl_cache::{Cache, Command, Request};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ShellCli::parse();

    // Logs go to stderr so they don't interleave with the prompt.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = args.cache.to_config();
    info!(
        capacity = config.capacity(),
        default_ttl = ?config.get_default_ttl(),
        expiry = config.expiry_enabled(),
        stats = config.stats_enabled(),
        "cache ready"
    );
    let cache: Cache<String, Bytes> = Cache::new(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_help(&mut stdout, cache.capacity())?;

    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            continue;
        }

        let request = parse_command(line.as_bytes()).and_then(|parts| Request::parse(&parts));
        let quit = matches!(request, Ok(Request::Quit));
        if let Ok(request) = &request {
            debug!(command = %request.command(), "executing");
        }

        let reply = render_reply(request.and_then(|request| request.execute(&cache)));
        writeln!(stdout, "{}", reply)?;

        if quit {
            break;
        }
    }

    let stats = cache.stats();
    info!(hits = stats.hits, misses = stats.misses, "session finished");
    Ok(())
}

fn print_help(out: &mut impl Write, capacity: usize) -> io::Result<()> {
    writeln!(out, "LRU cache with capacity {}", capacity)?;
    writeln!(out, "Available commands:")?;
    for command in Command::all() {
        writeln!(out, "  {}", command.usage())?;
    }
    Ok(())
}
