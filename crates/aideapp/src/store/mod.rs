//! # Storage Layer
//!
//! A [`Store`] is an ordered, keyed collection of [`Record`]s plus the
//! [`StorageBackend`] it persists to. Every store owns exactly one image (one
//! file on disk); the image is always read and written whole.
//!
//! ## Lifecycle
//!
//! 1. [`Store::load`] replaces the in-memory records with what the backend holds.
//!    A missing image is an empty store. An image that can't be decoded is moved
//!    aside with [`StorageBackend::quarantine_image`] and the store starts empty.
//!    An image that can't be read at all (or moved aside) leaves the store empty
//!    and unavailable: every mutation and every save is refused, so the file it
//!    never saw is not overwritten.
//! 2. Mutations (`add`, `remove`, `update`, `rename`) work in memory and mark the
//!    store dirty.
//! 3. [`Store::save`] writes the full image and clears the dirty flag. The CLI
//!    saves every dirty store once, at the end of a command.
//!
//! ## Keys
//!
//! Keys are case-sensitive and stored as entered. Records keep insertion order;
//! a rename keeps the record's position.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per store, atomic replace.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.

use crate::error::{AideError, Result};
use crate::model::{Contact, Record, UpcomingBirthday};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::path::PathBuf;

pub mod backend;
pub mod fs_backend;
pub mod image;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;

/// What [`Store::load`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet; the store is empty.
    Missing,
    /// The image could not be read back. The store is empty and the bad image was
    /// moved to `moved_to` (when the backend had something to move).
    Corrupt {
        reason: String,
        moved_to: Option<PathBuf>,
    },
    Loaded(usize),
    /// The image exists but could not be read or moved aside. The store is empty
    /// and refuses writes until a later load succeeds.
    Unreadable { reason: String },
}

pub struct Store<R: Record, B: StorageBackend> {
    records: Vec<R>,
    backend: B,
    dirty: bool,
    unavailable: Option<String>,
}

pub type ContactStore<B> = Store<Contact, B>;
pub type NoteStore<B> = Store<crate::model::Note, B>;

impl<R: Record, B: StorageBackend> Store<R, B> {
    /// An empty store bound to `backend`. Nothing is read until [`Store::load`].
    pub fn with_backend(backend: B) -> Self {
        Self {
            records: Vec::new(),
            backend,
            dirty: false,
            unavailable: None,
        }
    }

    /// Binds to `backend` and loads whatever it holds.
    pub fn open(backend: B) -> (Self, LoadOutcome) {
        let mut store = Self::with_backend(backend);
        let outcome = store.load();
        (store, outcome)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// False after a load that could not read the image.
    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn add(&mut self, record: R) -> Result<&R> {
        self.ensure_available()?;
        if self.contains(record.key()) {
            return Err(AideError::duplicate(R::KIND, record.key()));
        }
        debug!(
            "event=record_add kind={} key={:?}",
            R::COLLECTION,
            record.key()
        );
        self.records.push(record);
        self.dirty = true;
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn remove(&mut self, key: &str) -> Result<R> {
        self.ensure_available()?;
        let pos = self.require(key)?;
        debug!("event=record_remove kind={} key={:?}", R::COLLECTION, key);
        self.dirty = true;
        Ok(self.records.remove(pos))
    }

    pub fn get(&self, key: &str) -> Result<&R> {
        let pos = self.require(key)?;
        Ok(&self.records[pos])
    }

    /// Applies `f` to a working copy of the record and commits the copy only if
    /// `f` succeeds. If the copy comes back under a different key, that key must
    /// be free.
    pub fn update<T, F>(&mut self, key: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut R) -> Result<T>,
    {
        self.ensure_available()?;
        let pos = self.require(key)?;
        let mut working = self.records[pos].clone();
        let out = f(&mut working)?;

        if working.key() != key && self.contains(working.key()) {
            return Err(AideError::duplicate(R::KIND, working.key()));
        }

        debug!("event=record_update kind={} key={:?}", R::COLLECTION, key);
        self.records[pos] = working;
        self.dirty = true;
        Ok(out)
    }

    /// Re-keys a record in place. Returns the record under its new key.
    pub fn rename(&mut self, old_key: &str, new_key: &str) -> Result<&R> {
        self.update(old_key, |record| record.rekey(new_key))?;
        let pos = self.require(new_key)?;
        Ok(&self.records[pos])
    }

    /// Every record in insertion order. Each call is an independent copy.
    pub fn list(&self) -> Vec<R> {
        self.records.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    /// Records whose text form contains `needle`. Case-sensitive.
    pub fn search(&self, needle: &str) -> Vec<R> {
        self.filter(|r| r.search_text().contains(needle))
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<R>
    where
        P: Fn(&R) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Writes the whole collection, replacing the previous image.
    pub fn save(&mut self) -> Result<()> {
        self.ensure_available()?;
        let bytes = image::encode(&self.records)?;
        self.backend.write_image(&bytes)?;
        self.dirty = false;
        info!(
            "event=store_save kind={} records={} location={}",
            R::COLLECTION,
            self.records.len(),
            self.backend.location().display()
        );
        Ok(())
    }

    /// Replaces the in-memory records with the stored image.
    ///
    /// Never fails: the store always ends up usable for reading, and the outcome
    /// says what was found. See [`LoadOutcome`].
    pub fn load(&mut self) -> LoadOutcome {
        self.dirty = false;
        self.records.clear();
        self.unavailable = None;

        let bytes = match self.backend.read_image() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                info!(
                    "event=store_load kind={} status=missing location={}",
                    R::COLLECTION,
                    self.backend.location().display()
                );
                return LoadOutcome::Missing;
            }
            Err(e) => return self.mark_unreadable(e.to_string()),
        };

        match image::decode::<R>(&bytes) {
            Ok(records) => {
                self.records = records;
                info!(
                    "event=store_load kind={} status=ok records={}",
                    R::COLLECTION,
                    self.records.len()
                );
                LoadOutcome::Loaded(self.records.len())
            }
            Err(reason) => {
                let moved_to = match self.backend.quarantine_image() {
                    Ok(moved) => moved,
                    Err(e) => {
                        return self.mark_unreadable(format!(
                            "{}; could not move it aside: {}",
                            reason, e
                        ))
                    }
                };
                warn!(
                    "event=store_load kind={} status=corrupt reason={:?} moved_to={:?}",
                    R::COLLECTION,
                    reason,
                    moved_to
                );
                LoadOutcome::Corrupt { reason, moved_to }
            }
        }
    }

    fn mark_unreadable(&mut self, reason: String) -> LoadOutcome {
        warn!(
            "event=store_load kind={} status=unreadable reason={:?} location={}",
            R::COLLECTION,
            reason,
            self.backend.location().display()
        );
        self.unavailable = Some(reason.clone());
        LoadOutcome::Unreadable { reason }
    }

    fn ensure_available(&self) -> Result<()> {
        match &self.unavailable {
            Some(reason) => Err(AideError::Unavailable {
                kind: R::COLLECTION,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key() == key)
    }

    fn require(&self, key: &str) -> Result<usize> {
        self.position(key)
            .ok_or_else(|| AideError::not_found(R::KIND, key))
    }
}

impl<R: Record> Store<R, MemBackend> {
    pub fn in_memory() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl<B: StorageBackend> Store<Contact, B> {
    /// Contacts whose next birthday falls within `[today, today + days]`,
    /// ordered by date, then name.
    pub fn birthdays_within(&self, days: u32, today: NaiveDate) -> Vec<UpcomingBirthday> {
        let mut upcoming: Vec<UpcomingBirthday> = self
            .records
            .iter()
            .filter_map(|c| c.birthday_within(days, today))
            .collect();
        upcoming.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        upcoming
    }
}
