pub mod cli;

use cli::commands::CliArgs;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub const LOG_LEVEL_ENV: &str = "FSVISIT_LOG_LEVEL";

/// Installs the global subscriber once.
///
/// `RUST_LOG` wins when set. Otherwise the level comes from `--log-level`, then `-q`,
/// then `FSVISIT_LOG_LEVEL`, defaulting to info.
pub fn init_logging(args: &CliArgs) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = resolve_level(args);
        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            if let Ok(directive) = format!("fsvisit={}", level).parse() {
                filter = filter.add_directive(directive);
            }
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

fn resolve_level(args: &CliArgs) -> Level {
    if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    }
}

pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
