//! # aide CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/aide/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - context wiring, dispatch, flushing (commands.rs)         │
//! │  - terminal and JSON rendering (render.rs)                  │
//! │  - shell completion scripts (complete.rs)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  aideapp: Assistant → features → commands → stores          │
//! │  - no knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! Business logic is unit tested inside `aideapp`. This crate is covered by
//! end-to-end tests (`tests/`) that run the real binary against a temporary
//! data directory passed with `--data`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
