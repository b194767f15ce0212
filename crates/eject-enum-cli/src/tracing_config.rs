//! Diagnostic tracing for the CLI.
//!
//! The subscriber is only installed when `EJECT_ENUM_LOG` (or `RUST_LOG`) is
//! set. `EJECT_ENUM_LOG_FORMAT` picks the output:
//!
//! ```bash
//! EJECT_ENUM_LOG=debug eject-enum src
//! EJECT_ENUM_LOG=eject_enum_core=trace EJECT_ENUM_LOG_FORMAT=tree eject-enum src
//! EJECT_ENUM_LOG=info EJECT_ENUM_LOG_FORMAT=json eject-enum -p tsconfig.json
//! ```
//!
//! Everything goes to stderr so it never mixes with the log lines on stdout.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_ENV: &str = "EJECT_ENUM_LOG";
const LOG_FORMAT_ENV: &str = "EJECT_ENUM_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    /// Indented span tree via `tracing-tree`.
    Tree,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => LogFormat::Tree,
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default()
    }
}

fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

pub fn init_tracing() {
    if std::env::var_os(LOG_ENV).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
