//! # Records
//!
//! The two record types kept by aide, and the [`Record`] contract the generic
//! [`Store`](crate::store::Store) relies on.
//!
//! - [`Contact`]: keyed by name; phones, email, birthday, address.
//! - [`Note`]: keyed by title; body text, tags, created/modified timestamps.
//!
//! Record fields are private. Values get in through validating methods only, so a
//! record that exists is a record whose every field passed its [`FieldKind`]
//! check.
//!
//! [`FieldKind`]: crate::fields::FieldKind

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

mod contact;
mod note;

pub use contact::{next_anniversary, Contact, UpcomingBirthday};
pub use note::Note;

/// What a keyed store needs from the records it holds.
pub trait Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned {
    /// Singular display name used in messages ("Contact", "Note").
    const KIND: &'static str;

    /// Name of the collection, written into the storage image ("contacts").
    const COLLECTION: &'static str;

    fn key(&self) -> &str;

    /// Validates and applies a new key. Leaves the record untouched on error.
    fn rekey(&mut self, new_key: &str) -> Result<()>;

    /// Flat text used by substring search: key, field values and tags.
    fn search_text(&self) -> String;
}
