//! Terminal output: colored messages, aligned tables, JSON.
//!
//! Every `format_*` function returns a string so it can be tested without a
//! terminal; the `print_*` wrappers only write them out.
//!
//! Stdout goes through [`write_stdout`]: a reader that hangs up early (`aide ... |
//! head`) ends the output quietly instead of failing the command.

use aideapp::commands::{CmdMessage, CmdResult, MessageLevel};
use aideapp::dispatch::RouteInfo;
use aideapp::model::{Contact, Note, UpcomingBirthday};
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use std::io::{self, ErrorKind, Write};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const MAX_CELL_WIDTH: usize = 40;
const COLUMN_GAP: &str = "  ";

/// Runs `write` against a locked stdout. A closed pipe counts as success.
pub fn write_stdout<F>(write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match write(&mut out).and_then(|()| out.flush()) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

pub fn print_text(text: &str) -> io::Result<()> {
    write_stdout(|out| out.write_all(text.as_bytes()))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> io::Result<()> {
    write_stdout(|out| {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)
    })
}

/// Warnings about the environment go to stderr so `--json` output stays clean.
pub fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", paint(message));
    }
}

fn paint(message: &CmdMessage) -> colored::ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
        MessageLevel::Warning => message.content.yellow(),
        MessageLevel::Error => message.content.red(),
    }
}

pub fn print_result(result: &CmdResult, json: bool, today: NaiveDate) -> io::Result<()> {
    if json {
        return print_json(result);
    }
    print_text(&format_result(result, today, Utc::now()))
}

pub fn format_result(result: &CmdResult, today: NaiveDate, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for message in &result.messages {
        out.push_str(&format!("{}\n", paint(message)));
    }
    if !result.contacts.is_empty() {
        out.push_str(&format_contacts(&result.contacts, today));
    }
    if !result.birthdays.is_empty() {
        out.push_str(&format_birthdays(&result.birthdays));
    }
    if !result.notes.is_empty() {
        out.push_str(&format_notes(&result.notes, now));
    }
    out
}

pub fn format_contacts(contacts: &[Contact], today: NaiveDate) -> String {
    let header = ["Name", "Phones", "Email", "Birthday", "Address"];
    let rows: Vec<Vec<String>> = contacts
        .iter()
        .map(|c| {
            let phones: Vec<String> = c.phones().iter().map(|p| p.to_string()).collect();
            let birthday = match (c.birthday(), c.days_to_birthday(today)) {
                (Some(b), Some(0)) => format!("{} (today!)", b),
                (Some(b), Some(days)) => format!("{} (in {} d)", b, days),
                (Some(b), None) => b.to_string(),
                (None, _) => String::new(),
            };
            vec![
                c.name().to_string(),
                phones.join(", "),
                c.email().map(|e| e.to_string()).unwrap_or_default(),
                birthday,
                c.address().map(|a| a.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    format_table(&header, &rows)
}

pub fn format_birthdays(birthdays: &[UpcomingBirthday]) -> String {
    let header = ["Name", "Date", "Day", "When"];
    let rows: Vec<Vec<String>> = birthdays
        .iter()
        .map(|b| {
            let when = match b.days_until {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                n => format!("in {} days", n),
            };
            vec![
                b.name.clone(),
                b.date.format("%d.%m.%Y").to_string(),
                b.date.format("%a").to_string(),
                when,
            ]
        })
        .collect();
    format_table(&header, &rows)
}

pub fn format_notes(notes: &[Note], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let tags: Vec<String> = note.tags().iter().map(|t| format!("#{}", t)).collect();
        let stamp = match note.updated_at() {
            Some(updated) => format!("edited {}", time_ago(updated, now)),
            None => format!("created {}", time_ago(note.created_at(), now)),
        };
        out.push_str(&format!(
            "{}  {}  {}\n",
            note.title().bold(),
            tags.join(" ").yellow(),
            stamp.dimmed()
        ));
        for line in note.body().lines() {
            out.push_str(&format!("    {}\n", truncate_to_width(line, LINE_WIDTH - 4)));
        }
    }
    out
}

pub fn format_catalog(routes: &[RouteInfo]) -> String {
    let mut out = String::new();
    let mut current = "";
    for route in routes {
        if route.feature != current {
            if !current.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", route.feature.bold()));
            current = route.feature;
        }
        let names = if route.aliases.is_empty() {
            route.keyword.to_string()
        } else {
            format!("{} ({})", route.keyword, route.aliases.join(", "))
        };
        out.push_str(&format!("  {}  {}\n", pad(&names, 28), route.summary));
        for usage in &route.usage {
            out.push_str(&format!(
                "      {}\n",
                format!("aide {} {}", route.feature, usage).dimmed()
            ));
        }
    }
    out
}

/// Left-aligned columns; empty columns are dropped.
fn format_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let keep: Vec<usize> = (0..header.len())
        .filter(|&col| col == 0 || rows.iter().any(|row| !row[col].is_empty()))
        .collect();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            keep.iter()
                .map(|&col| truncate_to_width(&row[col], MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = keep
        .iter()
        .enumerate()
        .map(|(i, &col)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header[col].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let heading: Vec<String> = keep
        .iter()
        .zip(&widths)
        .map(|(&col, &w)| pad(header[col], w))
        .collect();
    out.push_str(&format!("{}\n", heading.join(COLUMN_GAP).trim_end().bold()));

    for row in &cells {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, &w)| pad(c, w)).collect();
        out.push_str(line.join(COLUMN_GAP).trim_end());
        out.push('\n');
    }
    out
}

fn pad(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let limit = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
