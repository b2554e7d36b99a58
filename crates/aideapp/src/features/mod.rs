//! # Features
//!
//! A feature is a store plus the command table that drives it, reachable by
//! name. aide ships two:
//!
//! - [`AddressBook`] (`contacts`, alias `contact`)
//! - [`Notebook`] (`notes`, alias `note`)
//!
//! The [`Assistant`](crate::api::Assistant) holds features as trait objects and
//! routes `(feature, keyword, args)` to them.

use crate::commands::CmdResult;
use crate::dispatch::RouteInfo;
use crate::error::Result;
use std::path::PathBuf;

pub mod contacts;
pub mod notes;

pub use contacts::AddressBook;
pub use notes::Notebook;

pub trait Feature {
    fn name(&self) -> &'static str;

    fn aliases(&self) -> &'static [&'static str];

    fn answers_to(&self, word: &str) -> bool {
        self.name() == word || self.aliases().contains(&word)
    }

    fn dispatch(&mut self, keyword: &str, args: &[String]) -> Result<CmdResult>;

    fn catalog(&self) -> Vec<RouteInfo>;

    fn is_dirty(&self) -> bool;

    /// Saves the backing store if it has unsaved changes. Returns whether it wrote.
    fn flush(&mut self) -> Result<bool>;

    fn location(&self) -> PathBuf;
}
