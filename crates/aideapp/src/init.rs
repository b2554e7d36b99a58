//! # Context Setup
//!
//! [`initialize`] turns a resolved [`AideConfig`] (plus an optional data directory
//! override) into a ready [`Assistant`]:
//!
//! 1. Resolve the data directory: override, then `config.data_dir`, then the OS
//!    data directory for aide (via `directories`).
//! 2. Open one [`FsBackend`] per store file inside it.
//! 3. Load both stores. Missing files are empty stores; corrupt files are moved
//!    aside and reported in [`AideContext::notices`]. A file that can't be read
//!    disables its own store only; the other one keeps working.
//!
//! Nothing is written to disk here. The data directory is created on the first save.

use crate::api::Assistant;
use crate::commands::CmdMessage;
use crate::config::AideConfig;
use crate::error::{AideError, Result};
use crate::store::{ContactStore, FsBackend, LoadOutcome, NoteStore};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub struct AideContext {
    pub assistant: Assistant,
    pub config: AideConfig,
    pub data_dir: PathBuf,
    /// What loading each store found, by store file.
    pub loads: Vec<(PathBuf, LoadOutcome)>,
}

impl AideContext {
    /// Warnings the user should see about how the stores were loaded.
    pub fn notices(&self) -> Vec<CmdMessage> {
        self.loads
            .iter()
            .filter_map(|(path, outcome)| match outcome {
                LoadOutcome::Corrupt { reason, moved_to } => {
                    let kept = match moved_to {
                        Some(moved) => format!(", kept as {}", moved.display()),
                        None => String::new(),
                    };
                    Some(CmdMessage::warning(format!(
                        "Could not read {} ({}){}; starting empty",
                        path.display(),
                        reason,
                        kept
                    )))
                }
                LoadOutcome::Unreadable { reason } => Some(CmdMessage::error(format!(
                    "Could not open {} ({}); changes to it are refused until this is fixed",
                    path.display(),
                    reason
                ))),
                LoadOutcome::Missing | LoadOutcome::Loaded(_) => None,
            })
            .collect()
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "aide")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AideError::Config("could not determine a home directory".to_string()))
}

pub fn resolve_data_dir(data_override: Option<&Path>, config: &AideConfig) -> Result<PathBuf> {
    if let Some(dir) = data_override {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }
    default_data_dir()
}

pub fn initialize(data_override: Option<&Path>, config: AideConfig) -> Result<AideContext> {
    config.validate()?;
    let data_dir = resolve_data_dir(data_override, &config)?;

    let contacts_path = data_dir.join(&config.contacts_file);
    let notes_path = data_dir.join(&config.notes_file);

    let (contacts, contacts_outcome) = ContactStore::open(FsBackend::new(&contacts_path));
    let (notes, notes_outcome) = NoteStore::open(FsBackend::new(&notes_path));

    Ok(AideContext {
        assistant: Assistant::from_stores(contacts, notes),
        config,
        data_dir,
        loads: vec![
            (contacts_path, contacts_outcome),
            (notes_path, notes_outcome),
        ],
    })
}
