//! # Fields
//!
//! A [`Field`] is a single self-validating scalar: a contact name, a phone number,
//! a note tag. Every way of putting a value into a field goes through the kind's
//! parser, so a `Field<K>` can never hold something its [`FieldKind`] would reject.
//!
//! ## Kinds
//!
//! Each kind is a zero-sized marker type implementing [`FieldKind`]:
//!
//! | Kind | Value | Rule |
//! |------|-------|------|
//! | [`Name`], [`Title`] | `String` | 2–30 letters, digits, punctuation or spaces |
//! | [`Phone`] | `String` | `+CCC(CC)NNN-NN-NN[N]` or 10–12 bare digits |
//! | [`Email`] | `String` | `local@domain.tld`, local part starts with a letter |
//! | [`Birthday`] | `NaiveDate` | `DD.MM.YYYY`, not in the future |
//! | [`Tag`] | `String` | 1–30 characters, no whitespace |
//! | [`Address`] | `String` | non-blank, at most 120 characters |
//!
//! ## Serialization
//!
//! Fields serialize as their display string and deserialize through the same
//! parser used on input. A stored value that no longer validates is a load error,
//! not a silently accepted value.

use crate::error::Result;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

mod kinds;

pub use kinds::{
    parse_birthday_on, Address, Birthday, Email, Name, Phone, Tag, Title, BIRTHDAY_FORMAT,
};

/// A validation rule plus the value type it produces.
pub trait FieldKind {
    /// Human-readable field name used in error messages ("phone", "email", ...).
    const LABEL: &'static str;

    type Value: Clone + PartialEq + fmt::Debug;

    fn parse(raw: &str) -> Result<Self::Value>;

    fn render(value: &Self::Value) -> String;
}

pub struct Field<K: FieldKind> {
    value: K::Value,
}

impl<K: FieldKind> Field<K> {
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self {
            value: K::parse(raw)?,
        })
    }

    /// Re-validates and replaces the value. On error the old value is kept.
    pub fn set(&mut self, raw: &str) -> Result<()> {
        self.value = K::parse(raw)?;
        Ok(())
    }

    pub fn get(&self) -> &K::Value {
        &self.value
    }

    /// Compares against raw user input using the display form.
    pub fn matches(&self, raw: &str) -> bool {
        K::render(&self.value) == raw
    }
}

impl<K: FieldKind<Value = String>> Field<K> {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<K: FieldKind> Clone for Field<K> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<K: FieldKind> PartialEq for Field<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K: FieldKind> Eq for Field<K> where K::Value: Eq {}

impl<K: FieldKind> fmt::Debug for Field<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(K::LABEL).field(&self.value).finish()
    }
}

impl<K: FieldKind> fmt::Display for Field<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&K::render(&self.value))
    }
}

impl<K: FieldKind> Serialize for Field<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&K::render(&self.value))
    }
}

impl<'de, K: FieldKind> Deserialize<'de> for Field<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Field::new(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AideError;

    #[test]
    fn set_replaces_valid_value() {
        let mut phone: Field<Phone> = Field::new("0501234567").unwrap();
        phone.set("+380(67)012-34-56").unwrap();
        assert_eq!(phone.get(), "+380(67)012-34-56");
    }

    #[test]
    fn rejected_set_keeps_previous_value() {
        let mut email: Field<Email> = Field::new("ann@example.com").unwrap();
        let err = email.set("not-an-email").unwrap_err();
        assert!(matches!(
            err,
            AideError::Validation { field: "email", ref input, .. } if input == "not-an-email"
        ));
        assert_eq!(email.get(), "ann@example.com");
    }

    #[test]
    fn serializes_as_display_string() {
        let birthday: Field<Birthday> = Field::new("15.03.1990").unwrap();
        let json = serde_json::to_string(&birthday).unwrap();
        assert_eq!(json, "\"15.03.1990\"");

        let back: Field<Birthday> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, birthday);
    }

    #[test]
    fn deserialization_revalidates() {
        let result: std::result::Result<Field<Phone>, _> = serde_json::from_str("\"12ab\"");
        assert!(result.is_err());
    }

    #[test]
    fn matches_uses_display_form() {
        let birthday: Field<Birthday> = Field::new("01.02.2000").unwrap();
        assert!(birthday.matches("01.02.2000"));
        assert!(!birthday.matches("2000-02-01"));
    }
}
