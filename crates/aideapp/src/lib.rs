//! # aideapp
//!
//! The library behind the `aide` personal assistant: an address book (names,
//! phones, email, birthday, address) and a notebook (titled notes with text and
//! tags), each persisted as one JSON file.
//!
//! ## Architecture
//!
//! ```text
//! CLI (aide binary)       clap parsing, rendering, completions
//!   │
//!   ▼
//! API  (api.rs)           Assistant: routes (feature, keyword, args), flushes
//!   │
//!   ▼
//! Features (features/)    a store + its command table, by name
//!   │
//!   ▼
//! Dispatch (dispatch.rs)  exact keyword/alias match, argument shapes
//!   │
//!   ▼
//! Commands (commands/)    business operations, return CmdResult
//!   │
//!   ▼
//! Store (store/)          keyed records, whole-image load/save
//!   │
//!   ▼
//! Model, Fields           records and self-validating values
//! ```
//!
//! Everything below the CLI is UI-agnostic: it never prints and never exits.
//! Errors are [`error::AideError`]; diagnostics go to the [`logging`] files.
//!
//! ## Example
//!
//! ```no_run
//! use aideapp::api::Assistant;
//! use aideapp::store::{ContactStore, NoteStore};
//!
//! let mut assistant = Assistant::from_stores(ContactStore::in_memory(), NoteStore::in_memory());
//! let args: Vec<String> = vec!["contact".into(), "Ann Lee".into(), "0501234567".into()];
//! let result = assistant.dispatch("contacts", "add", &args).unwrap();
//! assert_eq!(result.contacts.len(), 1);
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod features;
pub mod fields;
pub mod init;
pub mod logging;
pub mod model;
pub mod store;
