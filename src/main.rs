//! EmberKV - A Bounded LRU Key-Value Store with a Durability Log
//!
//! This is the main entry point for the EmberKV server.
//! It parses configuration, recovers state from the append-only log, and
//! then accepts client connections until shutdown.

use emberkv::aof::FileAof;
use emberkv::commands::{start_storage_service, StorageHandle};
use emberkv::connection::{handle_connection, ConnectionStats};
use emberkv::storage::StorageEngine;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Server configuration
struct Config {
    /// Host to bind to
    host: String,
    /// Port to listen on
    port: u16,
    /// Maximum number of resident keys in the cache
    capacity: usize,
    /// Path of the append-only durability log
    aof_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: emberkv::DEFAULT_HOST.to_string(),
            port: emberkv::DEFAULT_PORT,
            capacity: emberkv::DEFAULT_CAPACITY,
            aof_path: emberkv::DEFAULT_AOF_PATH.to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    if i + 1 < args.len() {
                        config.host = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --host requires a value");
                        std::process::exit(1);
                    }
                }
                "--port" | "-p" => {
                    if i + 1 < args.len() {
                        config.port = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid port number");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --port requires a value");
                        std::process::exit(1);
                    }
                }
                "--capacity" | "-c" => {
                    if i + 1 < args.len() {
                        config.capacity = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid capacity");
                            std::process::exit(1);
                        });
                        if config.capacity == 0 {
                            eprintln!("Error: capacity must be at least 1");
                            std::process::exit(1);
                        }
                        i += 2;
                    } else {
                        eprintln!("Error: --capacity requires a value");
                        std::process::exit(1);
                    }
                }
                "--aof" | "-a" => {
                    if i + 1 < args.len() {
                        config.aof_path = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --aof requires a value");
                        std::process::exit(1);
                    }
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("EmberKV version {}", emberkv::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }

    /// Returns the bind address as a string
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn print_help() {
    println!(
        r#"
EmberKV - A Bounded LRU Key-Value Store with a Durability Log

USAGE:
    emberkv [OPTIONS]

OPTIONS:
    -h, --host <HOST>          Host to bind to (default: 127.0.0.1)
    -p, --port <PORT>          Port to listen on (default: 7379)
    -c, --capacity <KEYS>      Resident key capacity (default: 1024)
    -a, --aof <PATH>           Durability log path (default: emberkv.aof)
    -v, --version              Print version information
        --help                 Print this help message

EXAMPLES:
    emberkv                          # Start on 127.0.0.1:7379
    emberkv --port 7380              # Start on port 7380
    emberkv --capacity 64            # Keep at most 64 keys in memory
    emberkv --aof /var/lib/kv.aof    # Persist to a custom log path

PROTOCOL:
    Requests are arrays of bulk strings, e.g. SET name alice is sent as:
    *3\r\n$3\r\nSET\r\n$4\r\nname\r\n$5\r\nalice\r\n
    Supported commands: SET key value, GET key, DEL key.
"#
    );
}

fn print_banner(config: &Config) {
    println!(
        r#"
        ─────────────────────────────────────────────
          EmberKV v{} - bounded cache, durable log
        ─────────────────────────────────────────────
        Listening on  {}
        Capacity      {} resident keys
        Log file      {}

        Use Ctrl+C to shut down.
"#,
        emberkv::VERSION,
        config.bind_address(),
        config.capacity,
        config.aof_path,
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args();

    // Set up logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // Print the banner
    print_banner(&config);

    // Open the durability log and rebuild resident state from it. Recovery
    // must finish before the listener exists, so the log is never appended
    // to while it is being replayed.
    let aof = FileAof::open(&config.aof_path)?;
    let mut engine = StorageEngine::new(config.capacity, Box::new(aof));
    let applied = engine.recover();
    info!(
        records = applied,
        resident = engine.resident_len(),
        path = %config.aof_path,
        "Recovery complete"
    );

    // Hand the engine to its single-owner service task
    let (storage, _service) = start_storage_service(engine);

    // Create connection statistics
    let stats = Arc::new(ConnectionStats::new());

    // Bind the TCP listener
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", config.bind_address());

    // Set up graceful shutdown
    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping server...");
    };

    // Main accept loop
    tokio::select! {
        _ = accept_loop(listener, storage, Arc::clone(&stats)) => {}
        _ = shutdown => {}
    }

    info!(
        connections = stats.connections_accepted.load(Ordering::Relaxed),
        commands = stats.commands_processed.load(Ordering::Relaxed),
        "Server shutdown complete"
    );
    Ok(())
}

/// Main loop that accepts incoming connections
async fn accept_loop(
    listener: TcpListener,
    storage: StorageHandle,
    stats: Arc<ConnectionStats>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let storage = storage.clone();
                let stats = Arc::clone(&stats);

                // Spawn a task to handle this connection
                tokio::spawn(async move {
                    handle_connection(stream, addr, storage, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
