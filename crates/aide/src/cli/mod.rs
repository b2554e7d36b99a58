//! # CLI Behavior
//!
//! This is **one possible UI client** for aideapp, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Command Shape
//!
//! ```text
//! aide [--data DIR] [--json] [-v] contacts <keyword> [args...]
//! aide [--data DIR] [--json] [-v] notes <keyword> [args...]
//! aide commands | config [template] | completions <shell>
//! ```
//!
//! Keywords and their argument shapes are owned by the library's command
//! tables; `aide commands` lists them. Multi-word values (names, titles, note
//! text) are passed as single quoted arguments, except where a usage line ends
//! in `...`.
//!
//! ## Saving
//!
//! Each invocation runs one command and then saves every store it changed. A
//! failed save is reported on stderr as a data-loss warning and the process exits
//! with status 1.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap, version string
//! - `commands`: context setup, dispatch and flushing
//! - `render`: colored messages, aligned tables, JSON
//! - `complete`: shell completion scripts

mod commands;
mod complete;
mod render;
pub mod setup;

pub use commands::run;
