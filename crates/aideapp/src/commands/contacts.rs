//! Address-book commands.
//!
//! Every mutation goes through [`Store::update`](crate::store::Store::update) (or
//! `add`/`remove`/`rename`), so a rejected value leaves the contact untouched.

use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::{AideError, Result};
use crate::model::Contact;
use crate::store::{ContactStore, StorageBackend};
use chrono::NaiveDate;

/// Creates a contact. Every phone is validated before anything is stored.
pub fn add_contact<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    phones: &[String],
) -> Result<CmdResult> {
    let mut contact = Contact::new(name)?;
    for phone in phones {
        contact.add_phone(phone)?;
    }
    let added = store.add(contact)?.clone();
    Ok(CmdResult::message(CmdMessage::success(format!(
        "Contact '{}' added",
        added.name()
    )))
    .with_contacts(vec![added]))
}

pub fn add_phone<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    phone: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.add_phone(phone))?;
    updated(store, name, format!("Phone {} added to '{}'", phone, name))
}

/// Sets the email, replacing any previous one.
pub fn set_email<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    email: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.set_email(email))?;
    updated(store, name, format!("Email of '{}' set to {}", name, email))
}

pub fn set_birthday<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    birthday: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.set_birthday(birthday))?;
    updated(
        store,
        name,
        format!("Birthday of '{}' set to {}", name, birthday),
    )
}

pub fn set_address<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    address: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.set_address(address))?;
    updated(store, name, format!("Address of '{}' set", name))
}

pub fn change_phone<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    old: &str,
    new: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.change_phone(old, new))?;
    updated(
        store,
        name,
        format!("Phone {} of '{}' changed to {}", old, name, new),
    )
}

/// Like [`set_email`], but the contact must already have an email.
pub fn change_email<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    email: &str,
) -> Result<CmdResult> {
    store.update(name, |c| {
        if c.email().is_none() {
            return Err(AideError::not_found("Email", name));
        }
        c.set_email(email)
    })?;
    updated(
        store,
        name,
        format!("Email of '{}' changed to {}", name, email),
    )
}

pub fn change_birthday<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    birthday: &str,
) -> Result<CmdResult> {
    store.update(name, |c| {
        if c.birthday().is_none() {
            return Err(AideError::not_found("Birthday", name));
        }
        c.set_birthday(birthday)
    })?;
    updated(
        store,
        name,
        format!("Birthday of '{}' changed to {}", name, birthday),
    )
}

pub fn change_address<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    address: &str,
) -> Result<CmdResult> {
    store.update(name, |c| {
        if c.address().is_none() {
            return Err(AideError::not_found("Address", name));
        }
        c.set_address(address)
    })?;
    updated(store, name, format!("Address of '{}' changed", name))
}

pub fn rename_contact<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    new_name: &str,
) -> Result<CmdResult> {
    let renamed = store.rename(name, new_name)?.clone();
    Ok(CmdResult::message(CmdMessage::success(format!(
        "Contact '{}' renamed to '{}'",
        name,
        renamed.name()
    )))
    .with_contacts(vec![renamed]))
}

pub fn remove_contact<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
) -> Result<CmdResult> {
    let removed = store.remove(name)?;
    Ok(CmdResult::message(CmdMessage::success(format!(
        "Contact '{}' removed",
        removed.name()
    ))))
}

pub fn remove_phone<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    phone: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.remove_phone(phone))?;
    updated(
        store,
        name,
        format!("Phone {} removed from '{}'", phone, name),
    )
}

pub fn remove_email<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.remove_email())?;
    updated(store, name, format!("Email removed from '{}'", name))
}

pub fn remove_birthday<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.remove_birthday())?;
    updated(store, name, format!("Birthday removed from '{}'", name))
}

pub fn remove_address<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
) -> Result<CmdResult> {
    store.update(name, |c| c.remove_address())?;
    updated(store, name, format!("Address removed from '{}'", name))
}

/// One contact by name, or the whole book in insertion order.
pub fn show<B: StorageBackend>(store: &ContactStore<B>, name: Option<&str>) -> Result<CmdResult> {
    if let Some(name) = name {
        let contact = store.get(name)?.clone();
        return Ok(CmdResult::default().with_contacts(vec![contact]));
    }
    if store.is_empty() {
        return Ok(empty_book());
    }
    Ok(CmdResult::default().with_contacts(store.list()))
}

pub fn search<B: StorageBackend>(store: &ContactStore<B>, needle: &str) -> Result<CmdResult> {
    if store.is_empty() {
        return Ok(empty_book());
    }
    let found = store.search(needle);
    if found.is_empty() {
        return Ok(CmdResult::message(CmdMessage::info(format!(
            "No contacts match '{}'",
            needle
        ))));
    }
    Ok(CmdResult::message(CmdMessage::info(format!(
        "Found {}",
        plural(found.len(), "contact")
    )))
    .with_contacts(found))
}

/// Upcoming birthdays within `days` of `today`, inclusive.
pub fn birthdays<B: StorageBackend>(
    store: &ContactStore<B>,
    days: u32,
    today: NaiveDate,
) -> Result<CmdResult> {
    if store.is_empty() {
        return Ok(empty_book());
    }
    let upcoming = store.birthdays_within(days, today);
    if upcoming.is_empty() {
        return Ok(CmdResult::message(CmdMessage::info(format!(
            "No birthdays in the next {}",
            plural(days as usize, "day")
        ))));
    }
    Ok(CmdResult::default().with_birthdays(upcoming))
}

fn updated<B: StorageBackend>(
    store: &ContactStore<B>,
    name: &str,
    message: String,
) -> Result<CmdResult> {
    let contact = store.get(name)?.clone();
    Ok(CmdResult::message(CmdMessage::success(message)).with_contacts(vec![contact]))
}

fn empty_book() -> CmdResult {
    CmdResult::message(CmdMessage::info("No contacts saved yet"))
}
