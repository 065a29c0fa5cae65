//! Command-line interface.

pub mod commands;
pub mod manifest;
pub mod output;
pub mod types;

pub use manifest::Manifest;
pub use types::{Cli, Commands};

/// Report a fatal error and exit nonzero.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": format!("{err:#}") }));
    } else {
        eprintln!("error: {err:#}");
    }
    std::process::exit(1);
}
