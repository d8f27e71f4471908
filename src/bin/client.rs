//! LRU cache client.
//!
//! This binary sends a single command to a running cache server and prints
//! the reply.

use bytes::BytesMut;
use clap::Parser;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

use lru_ttl_cache::cli::{Cli, ClientCommand};
use lru_ttl_cache::utils::next_line;

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let mut request = match args.command.to_line() {
        Ok(line) => line,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    request.push('\n');

    let addr = format!("{}:{}", args.host, args.port);
    let mut stream = match TcpStream::connect(&addr).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to connect to server at {}: {}", addr, e);
            eprintln!("Make sure the server is running with: cargo run --bin server");
            std::process::exit(1);
        }
    };

    stream.write_all(request.as_bytes()).await?;

    let mut buf = BytesMut::with_capacity(1024);
    let reply = loop {
        if let Some(line) = next_line(&mut buf)? {
            break String::from_utf8_lossy(&line).into_owned();
        }
        if stream.read_buf(&mut buf).await? == 0 {
            eprintln!("Server closed the connection without replying");
            std::process::exit(1);
        }
    };

    if let Some(message) = reply.strip_prefix("ERR ") {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }

    match args.command {
        ClientCommand::Put { key, .. } => println!("Stored key '{}'", key),
        ClientCommand::Remove { key } => println!("Removed key '{}'", key),
        ClientCommand::Stats => {
            println!("Cache Statistics:");
            for part in reply.split_whitespace() {
                if let Some((key, value)) = part.split_once(':') {
                    println!("  {}: {}", key, value);
                }
            }
        }
        ClientCommand::Get { .. } | ClientCommand::Display | ClientCommand::Ping => {
            println!("{}", reply)
        }
    }

    Ok(())
}
