use super::Record;
use crate::error::{AideError, Result};
use crate::fields::{Field, Tag, Title};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    title: Field<Title>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    tags: Vec<Field<Tag>>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Builds a note. All tags are validated before the note exists; repeats collapse.
    pub fn new<T: AsRef<str>>(title: &str, body: &str, tags: &[T]) -> Result<Self> {
        Ok(Self {
            title: Field::new(title)?,
            body: body.to_string(),
            tags: parse_tags(tags)?,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn tags(&self) -> &[Field<Tag>] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn has_tag(&self, raw: &str) -> bool {
        self.tags.iter().any(|t| t.matches(raw))
    }

    pub fn find_tag<P>(&self, predicate: P) -> Option<&Field<Tag>>
    where
        P: Fn(&Field<Tag>) -> bool,
    {
        self.tags.iter().find(|t| predicate(t))
    }

    pub fn set_body(&mut self, body: &str) {
        self.body = body.to_string();
        self.touch();
    }

    /// Adds a tag. Returns `false` when the note already carries it.
    pub fn add_tag(&mut self, raw: &str) -> Result<bool> {
        let tag = Field::new(raw)?;
        if self.tags.contains(&tag) {
            return Ok(false);
        }
        self.tags.push(tag);
        self.touch();
        Ok(true)
    }

    pub fn remove_tag(&mut self, raw: &str) -> Result<Field<Tag>> {
        let pos = self.tag_position(raw)?;
        let removed = self.tags.remove(pos);
        self.touch();
        Ok(removed)
    }

    /// Replaces `old` with `new` in place. If `new` is already on the note, `old` is dropped.
    pub fn change_tag(&mut self, old: &str, new: &str) -> Result<()> {
        let replacement = Field::new(new)?;
        let pos = self.tag_position(old)?;
        if self.tags.iter().enumerate().any(|(i, t)| i != pos && *t == replacement) {
            self.tags.remove(pos);
        } else {
            self.tags[pos] = replacement;
        }
        self.touch();
        Ok(())
    }

    /// Replaces every tag. Nothing changes unless all new tags are valid.
    pub fn set_tags<T: AsRef<str>>(&mut self, tags: &[T]) -> Result<()> {
        self.tags = parse_tags(tags)?;
        self.touch();
        Ok(())
    }

    fn tag_position(&self, raw: &str) -> Result<usize> {
        self.tags
            .iter()
            .position(|t| t.matches(raw))
            .ok_or_else(|| AideError::not_found("Tag", raw))
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

fn parse_tags<T: AsRef<str>>(raw: &[T]) -> Result<Vec<Field<Tag>>> {
    let mut tags: Vec<Field<Tag>> = Vec::with_capacity(raw.len());
    for item in raw {
        let tag = Field::new(item.as_ref())?;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    Ok(tags)
}

impl Record for Note {
    const KIND: &'static str = "Note";
    const COLLECTION: &'static str = "notes";

    fn key(&self) -> &str {
        self.title()
    }

    fn rekey(&mut self, new_key: &str) -> Result<()> {
        self.title.set(new_key)?;
        self.touch();
        Ok(())
    }

    fn search_text(&self) -> String {
        let mut parts = vec![self.title.to_string(), self.body.clone()];
        parts.extend(self.tags.iter().map(|t| t.to_string()));
        parts.join("\n")
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.tags.iter().map(|t| t.to_string()).collect();
        write!(
            f,
            "{} # {} # {} # {}",
            self.title,
            self.body,
            tags.join(", "),
            self.created_at.format("%d.%m.%Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> Note {
        Note::new("Groceries", "milk, eggs", &["home", "weekly"]).unwrap()
    }

    #[test]
    fn new_note_has_no_modification_date() {
        let n = note();
        assert!(n.updated_at().is_none());
        assert_eq!(n.tags().len(), 2);
    }

    #[test]
    fn new_note_collapses_repeated_tags() {
        let n = Note::new("Groceries", "", &["home", "home"]).unwrap();
        assert_eq!(n.tags().len(), 1);
    }

    #[test]
    fn new_note_rejects_invalid_tag() {
        assert!(Note::new("Groceries", "", &["ok", "not ok"]).is_err());
    }

    #[test]
    fn mutations_touch_modified_but_not_created() {
        let mut n = note();
        let created = n.created_at();
        n.set_body("bread");
        assert!(n.updated_at().is_some());
        assert_eq!(n.created_at(), created);
        assert_eq!(n.body(), "bread");
    }

    #[test]
    fn add_existing_tag_is_noop() {
        let mut n = note();
        assert!(!n.add_tag("home").unwrap());
        assert!(n.updated_at().is_none());
        assert!(n.add_tag("urgent").unwrap());
        assert!(n.has_tag("urgent"));
    }

    #[test]
    fn remove_missing_tag_is_not_found() {
        let mut n = note();
        assert!(matches!(
            n.remove_tag("nope"),
            Err(AideError::NotFound { kind: "Tag", .. })
        ));
        n.remove_tag("home").unwrap();
        assert!(!n.has_tag("home"));
    }

    #[test]
    fn find_tag_by_predicate() {
        let n = note();
        let found = n.find_tag(|t| t.as_str().starts_with("we")).unwrap();
        assert_eq!(found.as_str(), "weekly");
        assert!(n.find_tag(|t| t.as_str() == "Home").is_none());
    }

    #[test]
    fn change_tag_is_atomic() {
        let mut n = note();
        assert!(n.change_tag("home", "has space").is_err());
        assert!(n.has_tag("home"));

        n.change_tag("home", "house").unwrap();
        let tags: Vec<&str> = n.tags().iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, vec!["house", "weekly"]);
    }

    #[test]
    fn change_tag_onto_existing_tag_merges() {
        let mut n = note();
        n.change_tag("home", "weekly").unwrap();
        let tags: Vec<&str> = n.tags().iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, vec!["weekly"]);
    }

    #[test]
    fn set_tags_all_or_nothing() {
        let mut n = note();
        assert!(n.set_tags(&["a", "b c"]).is_err());
        assert_eq!(n.tags().len(), 2);
        n.set_tags(&["solo"]).unwrap();
        assert!(n.has_tag("solo"));
        assert_eq!(n.tags().len(), 1);
    }

    #[test]
    fn rekey_validates_title() {
        let mut n = note();
        assert!(n.rekey("x").is_err());
        assert_eq!(n.title(), "Groceries");
        n.rekey("Shopping").unwrap();
        assert_eq!(n.key(), "Shopping");
    }

    #[test]
    fn search_text_contains_title_body_and_tags() {
        let text = note().search_text();
        assert!(text.contains("Groceries"));
        assert!(text.contains("milk"));
        assert!(text.contains("weekly"));
    }
}
