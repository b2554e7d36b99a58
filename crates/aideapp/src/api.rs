//! # API Facade
//!
//! [`Assistant`] is the single entry point for clients. It owns the features,
//! routes `(feature, keyword, args)` triples to them and flushes their stores.
//!
//! The assistant does no business logic (that lives in [`crate::commands`]) and
//! no I/O of its own beyond asking features to save. Stores are built by the
//! client (see [`crate::init`]) and moved in; there is no global state.
//!
//! ## Flushing
//!
//! Commands only change memory. A client calls [`Assistant::flush`] once after
//! each command; every feature with unsaved changes writes its store. A failing
//! store does not stop the others from saving.

use crate::commands::CmdResult;
use crate::dispatch::RouteInfo;
use crate::error::{AideError, Result};
use crate::features::{AddressBook, Feature, Notebook};
use crate::store::{ContactStore, NoteStore, StorageBackend};
use log::{error, info};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct FlushReport {
    pub saved: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, AideError)>,
}

impl FlushReport {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Default)]
pub struct Assistant {
    features: Vec<Box<dyn Feature>>,
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard assistant: an address book and a notebook.
    pub fn from_stores<B: StorageBackend + 'static>(
        contacts: ContactStore<B>,
        notes: NoteStore<B>,
    ) -> Self {
        Self::new()
            .with_feature(AddressBook::new(contacts))
            .with_feature(Notebook::new(notes))
    }

    pub fn with_feature(mut self, feature: impl Feature + 'static) -> Self {
        self.features.push(Box::new(feature));
        self
    }

    pub fn dispatch(&mut self, feature: &str, keyword: &str, args: &[String]) -> Result<CmdResult> {
        let target = self
            .features
            .iter_mut()
            .find(|f| f.answers_to(feature))
            .ok_or_else(|| AideError::UnknownFeature(feature.to_string()))?;
        target.dispatch(keyword, args)
    }

    /// Every route of every feature, in registration order.
    pub fn catalog(&self) -> Vec<RouteInfo> {
        self.features.iter().flat_map(|f| f.catalog()).collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.features.iter().any(|f| f.is_dirty())
    }

    pub fn flush(&mut self) -> FlushReport {
        let mut report = FlushReport::default();
        for feature in self.features.iter_mut() {
            match feature.flush() {
                Ok(true) => report.saved.push(feature.location()),
                Ok(false) => {}
                Err(e) => {
                    error!(
                        "event=flush feature={} status=error error={}",
                        feature.name(),
                        e
                    );
                    report.failed.push((feature.location(), e));
                }
            }
        }
        if !report.saved.is_empty() {
            info!("event=flush status=ok saved={}", report.saved.len());
        }
        report
    }
}
