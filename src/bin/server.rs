//! LRU cache server.
//!
//! This binary runs a TCP server that accepts newline-terminated cache
//! commands and answers each with one line.

use bytes::{Bytes, BytesMut};
use clap::Parser;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    signal,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use lru_ttl_cache::cli::ServerCli;
use lru_ttl_cache::command::render_reply;
use lru_ttl_cache::utils::{next_line, parse_command};
use lru_ttl_cache::{Cache, Request};

/// Entry point for the cache server.
#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ServerCli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lru_ttl_cache=info,server=info")),
        )
        .init();

    let config = args.cache.to_config();
    let (default_ttl, expiry, track_stats) = (
        config.get_default_ttl(),
        config.expiry_enabled(),
        config.stats_enabled(),
    );
    // The shared cache; clones are handles to the same store
    let cache: Cache<String, Bytes> = Cache::new(config)?;

    let addr = args.addr();
    let listener = TcpListener::bind(&addr).await?;

    info!(
        %addr,
        capacity = cache.capacity(),
        default_ttl = ?default_ttl,
        expiry,
        stats = track_stats,
        "cache server listening"
    );

    let accept_cache = cache.clone();
    let accept_loop = async move {
        loop {
            match listener.accept().await {
                Ok((socket, peer)) => {
                    debug!(%peer, "connection accepted");
                    let cache = accept_cache.clone();

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(socket, cache).await {
                            warn!(%peer, error = %e, "connection error");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "failed to accept connection");
                }
            }
        }
    };

    tokio::select! {
        _ = accept_loop => {}
        result = signal::ctrl_c() => {
            result?;
            info!("shutting down");
        }
    }

    let stats = cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        size = stats.size,
        "final stats"
    );

    Ok(())
}

/// Serve one client until it disconnects or sends `quit`.
async fn handle_connection(
    mut socket: TcpStream,
    cache: Cache<String, Bytes>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut buf = BytesMut::with_capacity(1024);

    loop {
        loop {
            let line = match next_line(&mut buf) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    // Oversized line: reply once and close.
                    let reply = format!("{}\n", render_reply(Err(e)));
                    socket.write_all(reply.as_bytes()).await?;
                    return Ok(());
                }
            };

            let request = parse_command(&line).and_then(|parts| Request::parse(&parts));
            let quit = matches!(request, Ok(Request::Quit));

            // The cache lock is never held across an await point.
            let mut reply = render_reply(request.and_then(|request| request.execute(&cache)));
            reply.push('\n');
            socket.write_all(reply.as_bytes()).await?;

            if quit {
                return Ok(());
            }
        }

        if socket.read_buf(&mut buf).await? == 0 {
            return Ok(()); // Connection closed
        }
    }
}
