//! Full-screen TUI for agrent.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use agrent_core::api::ApiClient;
use anyhow::Result;
pub use runtime::TuiRuntime;

/// Runs the interactive marketplace UI until the user quits.
///
/// # Errors
/// Returns an error if no terminal is attached or the UI fails to start.
pub async fn run(client: Arc<ApiClient>) -> Result<()> {
    // The UI requires a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive UI requires a terminal.\n\
             Use `agrent --help` to see the non-interactive commands."
        );
    }

    let mut runtime = TuiRuntime::new(client)?;
    runtime.run()
}
