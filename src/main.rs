//! authdns: Minimal authoritative DNS responder
//!
//! This is the main entry point for the responder.
//!
//! # Usage
//!
//! ```bash
//! # Run with built-in defaults (127.0.0.1:2053, answer 8.8.8.8, TTL 60)
//! ./authdns
//!
//! # Run with custom configuration
//! ./authdns -c /path/to/config.json
//!
//! # Run with environment overrides
//! AUTHDNS_LOG_LEVEL=debug ./authdns
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use authdns::config::{
    apply_env_overrides, create_default_config, load_config_with_env, Config,
};
use authdns::server::{Responder, UdpServer};

/// Configuration path used when `-c` is not given
const DEFAULT_CONFIG_PATH: &str = "/etc/authdns/config.json";

/// Command-line arguments
struct Args {
    /// Configuration file path, if given explicitly
    config_path: Option<PathBuf>,
    /// Generate default configuration
    generate_config: bool,
    /// Check configuration only
    check_config: bool,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut config_path = None;
        let mut generate_config = false;
        let mut check_config = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    if let Some(path) = args.next() {
                        config_path = Some(PathBuf::from(path));
                    }
                }
                "-g" | "--generate-config" => {
                    generate_config = true;
                }
                "--check" => {
                    check_config = true;
                }
                "-h" | "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "-v" | "--version" => {
                    println!("authdns v{}", authdns::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {arg}");
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        Self {
            config_path,
            generate_config,
            check_config,
        }
    }
}

fn print_help() {
    println!(
        r#"authdns v{}

Minimal authoritative DNS responder over UDP.

USAGE:
    authdns [OPTIONS]

OPTIONS:
    -c, --config <PATH>     Configuration file path [default: {DEFAULT_CONFIG_PATH}]
    -g, --generate-config   Generate default configuration and exit
    --check                 Check configuration and exit
    -h, --help              Print help information
    -v, --version           Print version information

ENVIRONMENT:
    AUTHDNS_LISTEN_ADDR     Override listen address
    AUTHDNS_LOG_LEVEL       Override log level (trace, debug, info, warn, error)
    AUTHDNS_ANSWER_ADDR     Override the fixed answer address
    AUTHDNS_TTL_SECS        Override the answer TTL

EXAMPLE:
    # Answer every A query with 203.0.113.9
    AUTHDNS_ANSWER_ADDR=203.0.113.9 authdns

    # Query it
    dig @127.0.0.1 -p 2053 example.com
"#,
        authdns::VERSION
    );
}

/// Initialize logging
fn init_logging(config: &Config) {
    let level = match config.log.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.log.target);

    if config.log.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Load the effective configuration
///
/// An explicit `-c` path must exist. The default path is optional: when it
/// is absent the responder runs with built-in defaults, the way the
/// reference deployment did.
fn resolve_config(args: &Args) -> Result<Config> {
    let config = match &args.config_path {
        Some(path) => load_config_with_env(path)
            .map_err(|e| anyhow::anyhow!("Failed to load configuration from {path:?}: {e}"))?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config_with_env(&default_path).map_err(|e| {
                    anyhow::anyhow!("Failed to load configuration from {default_path:?}: {e}")
                })?
            } else {
                apply_env_overrides(Config::default_config())
                    .map_err(|e| anyhow::anyhow!("Invalid environment override: {e}"))?
            }
        }
    };
    Ok(config)
}

/// Main application entry point
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_config {
        let path = args
            .config_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        create_default_config(&path)?;
        println!("Generated default configuration at {path:?}");
        return Ok(());
    }

    let config = resolve_config(&args)?;

    if args.check_config {
        println!("Configuration is valid");
        return Ok(());
    }

    init_logging(&config);

    info!("authdns v{}", authdns::VERSION);
    if args.config_path.is_none() && !PathBuf::from(DEFAULT_CONFIG_PATH).exists() {
        warn!("No configuration file found, running with built-in defaults");
    }

    let responder = Arc::new(Responder::new(config.answer.policy()));
    let server = UdpServer::bind(
        config.listen.address,
        Arc::clone(&responder),
        config.listen.recv_buffer_len,
    )
    .await
    .map_err(|e| anyhow::anyhow!("Failed to bind UDP responder: {e}"))?;

    info!(
        "authdns ready on {} (answer: {}, ttl: {}s)",
        server.local_addr(),
        config.answer.address,
        config.answer.ttl_secs
    );

    // Run the loop with signal handling
    let run_result = tokio::select! {
        result = server.run() => result,
        _ = signal::ctrl_c() => {
            info!("Received SIGINT, initiating shutdown...");
            Ok(())
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM, initiating shutdown...");
            Ok(())
        }
    };

    server.shutdown();

    let stats = server.stats().snapshot();
    info!(
        "Final stats: {} received, {} answered, {} malformed, {} send failures",
        stats.packets_received, stats.packets_sent, stats.parse_errors, stats.packets_dropped
    );
    info!("Shutdown complete");

    run_result.map_err(|e| anyhow::anyhow!("UDP responder error: {e}"))
}

/// Wait for SIGTERM signal
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    sigterm.recv().await;
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    // On non-Unix platforms, just wait forever
    std::future::pending::<()>().await;
}
