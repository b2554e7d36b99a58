use super::Record;
use crate::error::{AideError, Result};
use crate::fields::{Address, Birthday, Email, Field, Name, Phone};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    name: Field<Name>,
    #[serde(default)]
    phones: Vec<Field<Phone>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<Field<Email>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<Field<Birthday>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<Field<Address>>,
}

/// A contact whose next birthday falls inside a queried window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingBirthday {
    pub name: String,
    pub born: NaiveDate,
    /// The next occurrence on or after the reference day.
    pub date: NaiveDate,
    pub days_until: i64,
}

impl Contact {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: Field::new(name)?,
            phones: Vec::new(),
            email: None,
            birthday: None,
            address: None,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn phones(&self) -> &[Field<Phone>] {
        &self.phones
    }

    pub fn email(&self) -> Option<&Field<Email>> {
        self.email.as_ref()
    }

    pub fn birthday(&self) -> Option<&Field<Birthday>> {
        self.birthday.as_ref()
    }

    pub fn address(&self) -> Option<&Field<Address>> {
        self.address.as_ref()
    }

    // --- Phones ---

    /// Appends a phone. The same number may be listed twice.
    pub fn add_phone(&mut self, raw: &str) -> Result<()> {
        self.phones.push(Field::new(raw)?);
        Ok(())
    }

    pub fn find_phone<P>(&self, predicate: P) -> Option<&Field<Phone>>
    where
        P: Fn(&Field<Phone>) -> bool,
    {
        self.phones.iter().find(|p| predicate(p))
    }

    /// Removes the first phone equal to `raw`.
    pub fn remove_phone(&mut self, raw: &str) -> Result<Field<Phone>> {
        let pos = self.phone_position(raw)?;
        Ok(self.phones.remove(pos))
    }

    /// Swaps `old` for `new` in place. `new` is validated before anything is removed.
    pub fn change_phone(&mut self, old: &str, new: &str) -> Result<()> {
        let replacement = Field::new(new)?;
        let pos = self.phone_position(old)?;
        self.phones[pos] = replacement;
        Ok(())
    }

    fn phone_position(&self, raw: &str) -> Result<usize> {
        self.phones
            .iter()
            .position(|p| p.matches(raw))
            .ok_or_else(|| AideError::not_found("Phone", raw))
    }

    // --- Scalar fields ---

    pub fn set_email(&mut self, raw: &str) -> Result<()> {
        self.email = Some(Field::new(raw)?);
        Ok(())
    }

    pub fn remove_email(&mut self) -> Result<Field<Email>> {
        self.email
            .take()
            .ok_or_else(|| AideError::not_found("Email", self.name()))
    }

    pub fn set_birthday(&mut self, raw: &str) -> Result<()> {
        self.birthday = Some(Field::new(raw)?);
        Ok(())
    }

    pub fn remove_birthday(&mut self) -> Result<Field<Birthday>> {
        self.birthday
            .take()
            .ok_or_else(|| AideError::not_found("Birthday", self.name()))
    }

    pub fn set_address(&mut self, raw: &str) -> Result<()> {
        self.address = Some(Field::new(raw)?);
        Ok(())
    }

    pub fn remove_address(&mut self) -> Result<Field<Address>> {
        self.address
            .take()
            .ok_or_else(|| AideError::not_found("Address", self.name()))
    }

    // --- Birthdays ---

    /// Next birthday on or after `today`.
    pub fn next_birthday(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.birthday
            .as_ref()
            .and_then(|b| next_anniversary(*b.get(), today))
    }

    pub fn days_to_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.next_birthday(today)
            .map(|next| next.signed_duration_since(today).num_days())
    }

    /// Returns the upcoming birthday if it lands within `days` of `today`, inclusive.
    pub fn birthday_within(&self, days: u32, today: NaiveDate) -> Option<UpcomingBirthday> {
        let born = *self.birthday.as_ref()?.get();
        let date = next_anniversary(born, today)?;
        let days_until = date.signed_duration_since(today).num_days();
        (days_until <= i64::from(days)).then(|| UpcomingBirthday {
            name: self.name().to_string(),
            born,
            date,
            days_until,
        })
    }
}

/// Projects `born` onto the calendar: this year's anniversary if it hasn't
/// passed yet, otherwise next year's. Feb 29 falls on Feb 28 in common years.
pub fn next_anniversary(born: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(born, today.year())?;
    if this_year >= today {
        Some(this_year)
    } else {
        anniversary_in(born, today.year() + 1)
    }
}

fn anniversary_in(born: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, born.month(), born.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

impl Record for Contact {
    const KIND: &'static str = "Contact";
    const COLLECTION: &'static str = "contacts";

    fn key(&self) -> &str {
        self.name()
    }

    fn rekey(&mut self, new_key: &str) -> Result<()> {
        self.name.set(new_key)
    }

    fn search_text(&self) -> String {
        let mut parts = vec![self.name.to_string()];
        parts.extend(self.phones.iter().map(|p| p.to_string()));
        if let Some(email) = &self.email {
            parts.push(email.to_string());
        }
        if let Some(birthday) = &self.birthday {
            parts.push(birthday.to_string());
        }
        if let Some(address) = &self.address {
            parts.push(address.to_string());
        }
        parts.join("\n")
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones: Vec<String> = self.phones.iter().map(|p| p.to_string()).collect();
        write!(f, "Name: {}, phones: {}", self.name, phones.join(", "))?;
        if let Some(email) = &self.email {
            write!(f, ", email: {}", email)?;
        }
        if let Some(birthday) = &self.birthday {
            write!(f, ", birthday: {}", birthday)?;
        }
        if let Some(address) = &self.address {
            write!(f, ", address: {}", address)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contact_born(raw: &str) -> Contact {
        let mut c = Contact::new("Smith John").unwrap();
        c.set_birthday(raw).unwrap();
        c
    }

    #[test]
    fn phones_allow_duplicates_and_remove_first() {
        let mut c = Contact::new("Ann Lee").unwrap();
        c.add_phone("0501234567").unwrap();
        c.add_phone("0501234567").unwrap();
        assert_eq!(c.phones().len(), 2);

        c.remove_phone("0501234567").unwrap();
        assert_eq!(c.phones().len(), 1);
    }

    #[test]
    fn invalid_phone_is_rejected() {
        let mut c = Contact::new("Ann Lee").unwrap();
        assert!(c.add_phone("12").is_err());
        assert!(c.phones().is_empty());
    }

    #[test]
    fn remove_missing_phone_is_not_found() {
        let mut c = Contact::new("Ann Lee").unwrap();
        let err = c.remove_phone("0501234567").unwrap_err();
        assert!(matches!(err, AideError::NotFound { kind: "Phone", .. }));
    }

    #[test]
    fn change_phone_keeps_position() {
        let mut c = Contact::new("Ann Lee").unwrap();
        c.add_phone("0501111111").unwrap();
        c.add_phone("0502222222").unwrap();
        c.change_phone("0501111111", "0503333333").unwrap();
        let phones: Vec<&str> = c.phones().iter().map(|p| p.as_str()).collect();
        assert_eq!(phones, vec!["0503333333", "0502222222"]);
    }

    #[test]
    fn change_phone_with_invalid_new_keeps_old() {
        let mut c = Contact::new("Ann Lee").unwrap();
        c.add_phone("0501111111").unwrap();
        assert!(matches!(
            c.change_phone("0501111111", "bogus"),
            Err(AideError::Validation { .. })
        ));
        assert_eq!(c.phones()[0].as_str(), "0501111111");
    }

    #[test]
    fn change_missing_phone_is_not_found() {
        let mut c = Contact::new("Ann Lee").unwrap();
        assert!(matches!(
            c.change_phone("0501111111", "0502222222"),
            Err(AideError::NotFound { .. })
        ));
    }

    #[test]
    fn find_phone_by_predicate() {
        let mut c = Contact::new("Ann Lee").unwrap();
        c.add_phone("+380(67)012-34-56").unwrap();
        c.add_phone("0501234567").unwrap();
        let found = c.find_phone(|p| p.as_str().starts_with('+')).unwrap();
        assert_eq!(found.as_str(), "+380(67)012-34-56");
        assert!(c.find_phone(|p| p.as_str() == "0000000000").is_none());
    }

    #[test]
    fn scalar_fields_set_and_remove() {
        let mut c = Contact::new("Ann Lee").unwrap();
        c.set_email("ann@example.com").unwrap();
        c.set_address("Kyiv").unwrap();
        assert_eq!(c.email().unwrap().as_str(), "ann@example.com");

        assert!(c.set_email("broken").is_err());
        assert_eq!(c.email().unwrap().as_str(), "ann@example.com");

        c.remove_address().unwrap();
        assert!(c.address().is_none());
        assert!(matches!(
            c.remove_address(),
            Err(AideError::NotFound { kind: "Address", .. })
        ));
    }

    #[test]
    fn anniversary_later_this_year() {
        let c = contact_born("15.03.1990");
        let today = date(1, 3, 2024);
        assert_eq!(c.next_birthday(today), Some(date(15, 3, 2024)));
        assert_eq!(c.days_to_birthday(today), Some(14));
        assert!(c.birthday_within(20, today).is_some());
        assert!(c.birthday_within(10, today).is_none());
    }

    #[test]
    fn anniversary_already_passed_rolls_to_next_year() {
        let c = contact_born("28.02.1990");
        let today = date(5, 3, 2024);
        assert_eq!(c.next_birthday(today), Some(date(28, 2, 2025)));
        assert!(c.birthday_within(5, today).is_none());
        assert!(c.birthday_within(30, today).is_none());
        assert!(c.birthday_within(365, today).is_some());
    }

    #[test]
    fn anniversary_today_counts_as_zero_days() {
        let c = contact_born("01.03.1990");
        let upcoming = c.birthday_within(0, date(1, 3, 2024)).unwrap();
        assert_eq!(upcoming.days_until, 0);
        assert_eq!(upcoming.date, date(1, 3, 2024));
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        assert_eq!(
            next_anniversary(date(29, 2, 2000), date(1, 2, 2023)),
            Some(date(28, 2, 2023))
        );
        assert_eq!(
            next_anniversary(date(29, 2, 2000), date(1, 2, 2024)),
            Some(date(29, 2, 2024))
        );
    }

    #[test]
    fn search_text_has_values_without_labels() {
        let mut c = Contact::new("Smith John").unwrap();
        c.add_phone("0501234567").unwrap();
        c.set_email("john@example.com").unwrap();
        let text = c.search_text();
        assert!(text.contains("Smith John"));
        assert!(text.contains("0501234567"));
        assert!(text.contains("john@example.com"));
        assert!(!text.contains("phones"));
    }

    #[test]
    fn display_lists_present_fields() {
        let mut c = Contact::new("Ann Lee").unwrap();
        c.add_phone("0501234567").unwrap();
        c.set_birthday("05.07.1985").unwrap();
        assert_eq!(
            c.to_string(),
            "Name: Ann Lee, phones: 0501234567, birthday: 05.07.1985"
        );
    }
}
