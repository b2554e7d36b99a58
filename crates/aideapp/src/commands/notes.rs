//! Notebook commands.

use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Note;
use crate::store::{NoteStore, StorageBackend};

pub fn add_note<B: StorageBackend>(
    store: &mut NoteStore<B>,
    title: &str,
    body: &str,
    tags: &[String],
) -> Result<CmdResult> {
    let note = Note::new(title, body, tags)?;
    let added = store.add(note)?.clone();
    Ok(CmdResult::message(CmdMessage::success(format!(
        "Note '{}' added",
        added.title()
    )))
    .with_notes(vec![added]))
}

/// Adds tags to a note. Tags it already carries are skipped; one invalid tag
/// rejects the whole call.
pub fn add_tags<B: StorageBackend>(
    store: &mut NoteStore<B>,
    title: &str,
    tags: &[String],
) -> Result<CmdResult> {
    let added = store.update(title, |note| {
        let mut added = 0;
        for tag in tags {
            if note.add_tag(tag)? {
                added += 1;
            }
        }
        Ok(added)
    })?;

    let message = if added > 0 {
        CmdMessage::success(format!("Added {} to '{}'", plural(added, "tag"), title))
    } else {
        CmdMessage::info(format!("'{}' already has those tags", title))
    };
    updated(store, title, message)
}

pub fn retitle<B: StorageBackend>(
    store: &mut NoteStore<B>,
    title: &str,
    new_title: &str,
) -> Result<CmdResult> {
    let renamed = store.rename(title, new_title)?.clone();
    Ok(CmdResult::message(CmdMessage::success(format!(
        "Note '{}' renamed to '{}'",
        title,
        renamed.title()
    )))
    .with_notes(vec![renamed]))
}

pub fn set_text<B: StorageBackend>(
    store: &mut NoteStore<B>,
    title: &str,
    text: &str,
) -> Result<CmdResult> {
    store.update(title, |note| {
        note.set_body(text);
        Ok(())
    })?;
    updated(
        store,
        title,
        CmdMessage::success(format!("Text of '{}' updated", title)),
    )
}

/// Replaces every tag on the note.
pub fn set_tags<B: StorageBackend>(
    store: &mut NoteStore<B>,
    title: &str,
    tags: &[String],
) -> Result<CmdResult> {
    store.update(title, |note| note.set_tags(tags))?;
    updated(
        store,
        title,
        CmdMessage::success(format!("Tags of '{}' replaced", title)),
    )
}

pub fn change_tag<B: StorageBackend>(
    store: &mut NoteStore<B>,
    title: &str,
    old: &str,
    new: &str,
) -> Result<CmdResult> {
    store.update(title, |note| note.change_tag(old, new))?;
    updated(
        store,
        title,
        CmdMessage::success(format!("Tag '{}' of '{}' changed to '{}'", old, title, new)),
    )
}

pub fn remove_note<B: StorageBackend>(store: &mut NoteStore<B>, title: &str) -> Result<CmdResult> {
    let removed = store.remove(title)?;
    Ok(CmdResult::message(CmdMessage::success(format!(
        "Note '{}' removed",
        removed.title()
    ))))
}

pub fn remove_tag<B: StorageBackend>(
    store: &mut NoteStore<B>,
    title: &str,
    tag: &str,
) -> Result<CmdResult> {
    store.update(title, |note| note.remove_tag(tag))?;
    updated(
        store,
        title,
        CmdMessage::success(format!("Tag '{}' removed from '{}'", tag, title)),
    )
}

pub fn show<B: StorageBackend>(store: &NoteStore<B>, title: Option<&str>) -> Result<CmdResult> {
    if let Some(title) = title {
        let note = store.get(title)?.clone();
        return Ok(CmdResult::default().with_notes(vec![note]));
    }
    if store.is_empty() {
        return Ok(empty_notebook());
    }
    Ok(CmdResult::default().with_notes(store.list()))
}

pub fn search<B: StorageBackend>(store: &NoteStore<B>, needle: &str) -> Result<CmdResult> {
    if store.is_empty() {
        return Ok(empty_notebook());
    }
    let found = store.search(needle);
    if found.is_empty() {
        return Ok(CmdResult::message(CmdMessage::info(format!(
            "No notes match '{}'",
            needle
        ))));
    }
    Ok(CmdResult::message(CmdMessage::info(format!(
        "Found {}",
        plural(found.len(), "note")
    )))
    .with_notes(found))
}

/// Notes carrying exactly `tag`.
pub fn tagged<B: StorageBackend>(store: &NoteStore<B>, tag: &str) -> Result<CmdResult> {
    if store.is_empty() {
        return Ok(empty_notebook());
    }
    let found = store.filter(|note| note.has_tag(tag));
    if found.is_empty() {
        return Ok(CmdResult::message(CmdMessage::info(format!(
            "No notes tagged '{}'",
            tag
        ))));
    }
    Ok(CmdResult::default().with_notes(found))
}

fn updated<B: StorageBackend>(
    store: &NoteStore<B>,
    title: &str,
    message: CmdMessage,
) -> Result<CmdResult> {
    let note = store.get(title)?.clone();
    Ok(CmdResult::message(message).with_notes(vec![note]))
}

fn empty_notebook() -> CmdResult {
    CmdResult::message(CmdMessage::info("No notes saved yet"))
}
