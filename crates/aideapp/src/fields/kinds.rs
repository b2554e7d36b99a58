use super::FieldKind;
use crate::error::{AideError, Result};
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 30;
const TAG_MAX_CHARS: usize = 30;
const ADDRESS_MAX_CHARS: usize = 120;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{M}\p{N}\p{P} ]+$").expect("valid name regex"));
static PHONE_INTL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+\d{3}\(\d{2}\)\d{3}-\d{1,2}-\d{2,3}$").expect("valid phone regex")
});
static PHONE_BARE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10,12}$").expect("valid bare phone regex"));
static BIRTHDAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid birthday regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_.+-]*@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("valid email regex")
});

fn validate_label(label: &'static str, raw: &str) -> Result<String> {
    let len = raw.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(AideError::validation(
            label,
            format!(
                "must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            ),
            raw,
        ));
    }
    if raw.trim() != raw {
        return Err(AideError::validation(
            label,
            "must not start or end with whitespace",
            raw,
        ));
    }
    if !NAME_RE.is_match(raw) {
        return Err(AideError::validation(
            label,
            "may only contain letters, digits, punctuation and spaces",
            raw,
        ));
    }
    Ok(raw.to_string())
}

/// Contact name, the address book key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name;

impl FieldKind for Name {
    const LABEL: &'static str = "name";
    type Value = String;

    fn parse(raw: &str) -> Result<String> {
        validate_label(Self::LABEL, raw)
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}

/// Note title, the notebook key. Same rule as [`Name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Title;

impl FieldKind for Title {
    const LABEL: &'static str = "title";
    type Value = String;

    fn parse(raw: &str) -> Result<String> {
        validate_label(Self::LABEL, raw)
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phone;

impl FieldKind for Phone {
    const LABEL: &'static str = "phone";
    type Value = String;

    fn parse(raw: &str) -> Result<String> {
        if PHONE_INTL_RE.is_match(raw) || PHONE_BARE_RE.is_match(raw) {
            Ok(raw.to_string())
        } else {
            Err(AideError::validation(
                Self::LABEL,
                "expected +380(67)012-34-56 or 10 to 12 digits",
                raw,
            ))
        }
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Email;

impl FieldKind for Email {
    const LABEL: &'static str = "email";
    type Value = String;

    fn parse(raw: &str) -> Result<String> {
        if EMAIL_RE.is_match(raw) {
            Ok(raw.to_string())
        } else {
            Err(AideError::validation(
                Self::LABEL,
                "expected name@domain.tld starting with a letter",
                raw,
            ))
        }
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday;

impl FieldKind for Birthday {
    const LABEL: &'static str = "birthday";
    type Value = NaiveDate;

    fn parse(raw: &str) -> Result<NaiveDate> {
        parse_birthday_on(raw, Local::now().date_naive())
    }

    fn render(value: &NaiveDate) -> String {
        value.format(BIRTHDAY_FORMAT).to_string()
    }
}

/// Parses a `DD.MM.YYYY` birthday, rejecting dates after `today`.
pub fn parse_birthday_on(raw: &str, today: NaiveDate) -> Result<NaiveDate> {
    // %Y alone accepts any number of year digits
    if !BIRTHDAY_RE.is_match(raw) {
        return Err(AideError::validation(
            Birthday::LABEL,
            "expected a date as DD.MM.YYYY",
            raw,
        ));
    }
    let date = NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT).map_err(|_| {
        AideError::validation(Birthday::LABEL, "expected a date as DD.MM.YYYY", raw)
    })?;
    if date > today {
        return Err(AideError::validation(
            Birthday::LABEL,
            "can't be in the future",
            raw,
        ));
    }
    Ok(date)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag;

impl FieldKind for Tag {
    const LABEL: &'static str = "tag";
    type Value = String;

    fn parse(raw: &str) -> Result<String> {
        if raw.is_empty() {
            return Err(AideError::validation(Self::LABEL, "can't be empty", raw));
        }
        if raw.chars().count() > TAG_MAX_CHARS {
            return Err(AideError::validation(
                Self::LABEL,
                format!("must be at most {} characters", TAG_MAX_CHARS),
                raw,
            ));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(AideError::validation(
                Self::LABEL,
                "must not contain whitespace",
                raw,
            ));
        }
        Ok(raw.to_string())
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address;

impl FieldKind for Address {
    const LABEL: &'static str = "address";
    type Value = String;

    fn parse(raw: &str) -> Result<String> {
        if raw.trim().is_empty() {
            return Err(AideError::validation(Self::LABEL, "can't be blank", raw));
        }
        if raw.chars().count() > ADDRESS_MAX_CHARS {
            return Err(AideError::validation(
                Self::LABEL,
                format!("must be at most {} characters", ADDRESS_MAX_CHARS),
                raw,
            ));
        }
        Ok(raw.to_string())
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}
