//! # Command Dispatch
//!
//! A [`CommandTable`] maps a keyword to a handler bound to some target (usually a
//! store). Matching is exact: a keyword or one of its listed aliases, nothing else.
//!
//! Handlers get the remaining words as [`Args`], whose accessors turn a missing
//! or malformed argument into [`AideError::InvalidArguments`] carrying the route's
//! usage lines.

use crate::commands::CmdResult;
use crate::error::{AideError, Result};
use log::debug;
use serde::Serialize;
use std::str::FromStr;

pub type Handler<T> = fn(&mut T, &Args) -> Result<CmdResult>;

pub struct Route<T> {
    pub keyword: &'static str,
    pub aliases: &'static [&'static str],
    /// One line per accepted argument shape, keyword included.
    pub usage: &'static [&'static str],
    pub summary: &'static str,
    pub handler: Handler<T>,
}

impl<T> Route<T> {
    pub fn answers_to(&self, word: &str) -> bool {
        self.keyword == word || self.aliases.contains(&word)
    }
}

/// A route as shown to users, see [`CommandTable::catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub feature: &'static str,
    pub keyword: &'static str,
    pub aliases: Vec<&'static str>,
    pub usage: Vec<&'static str>,
    pub summary: &'static str,
}

pub struct CommandTable<T> {
    feature: &'static str,
    routes: Vec<Route<T>>,
}

impl<T> CommandTable<T> {
    pub fn new(feature: &'static str) -> Self {
        Self {
            feature,
            routes: Vec::new(),
        }
    }

    pub fn route(mut self, route: Route<T>) -> Self {
        self.routes.push(route);
        self
    }

    pub fn feature(&self) -> &'static str {
        self.feature
    }

    pub fn find(&self, word: &str) -> Option<&Route<T>> {
        self.routes.iter().find(|r| r.answers_to(word))
    }

    pub fn dispatch(&self, target: &mut T, word: &str, words: &[String]) -> Result<CmdResult> {
        let route = self.find(word).ok_or_else(|| AideError::UnknownCommand {
            feature: self.feature.to_string(),
            keyword: word.to_string(),
        })?;
        debug!(
            "event=dispatch feature={} word={} route={} args={}",
            self.feature,
            word,
            route.keyword,
            words.len()
        );
        (route.handler)(target, &Args::new(words, route.usage))
    }

    pub fn catalog(&self) -> Vec<RouteInfo> {
        self.routes
            .iter()
            .map(|r| RouteInfo {
                feature: self.feature,
                keyword: r.keyword,
                aliases: r.aliases.to_vec(),
                usage: r.usage.to_vec(),
                summary: r.summary,
            })
            .collect()
    }
}

/// Positional arguments of one routed command.
pub struct Args<'a> {
    words: &'a [String],
    usage: &'static [&'static str],
}

impl<'a> Args<'a> {
    pub fn new(words: &'a [String], usage: &'static [&'static str]) -> Self {
        Self { words, usage }
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.words
            .get(index)
            .map(String::as_str)
            .filter(|w| !w.trim().is_empty())
    }

    pub fn required(&self, index: usize) -> Result<&'a str> {
        self.get(index).ok_or_else(|| self.invalid())
    }

    /// Parses the word at `index`, e.g. a day count.
    pub fn parsed<N: FromStr>(&self, index: usize) -> Result<N> {
        self.required(index)?
            .parse()
            .map_err(|_| self.invalid())
    }

    /// Everything from `index` on.
    pub fn rest(&self, index: usize) -> &'a [String] {
        self.words.get(index..).unwrap_or(&[])
    }

    /// Everything from `index` on as one space-joined string. At least one word.
    pub fn joined(&self, index: usize) -> Result<String> {
        self.required(index)?;
        Ok(self.rest(index).join(" "))
    }

    /// Rejects trailing words beyond the first `count`.
    pub fn at_most(&self, count: usize) -> Result<()> {
        if self.words.len() > count {
            return Err(self.invalid());
        }
        Ok(())
    }

    pub fn invalid(&self) -> AideError {
        AideError::InvalidArguments {
            usage: self.usage.join(" | "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CmdMessage;

    #[derive(Default)]
    struct Counter {
        hits: Vec<String>,
    }

    fn bump(target: &mut Counter, args: &Args) -> Result<CmdResult> {
        let name = args.required(0)?;
        target.hits.push(name.to_string());
        Ok(CmdResult::message(CmdMessage::info(name)))
    }

    fn table() -> CommandTable<Counter> {
        CommandTable::new("counter").route(Route {
            keyword: "bump",
            aliases: &["b", "inc"],
            usage: &["bump <name>"],
            summary: "Bump a name",
            handler: bump,
        })
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dispatch_by_keyword_and_alias() {
        let table = table();
        let mut counter = Counter::default();
        table.dispatch(&mut counter, "bump", &words(&["a"])).unwrap();
        table.dispatch(&mut counter, "inc", &words(&["b"])).unwrap();
        assert_eq!(counter.hits, vec!["a", "b"]);
    }

    #[test]
    fn no_prefix_matching() {
        let table = table();
        let mut counter = Counter::default();
        let err = table
            .dispatch(&mut counter, "bum", &words(&["a"]))
            .unwrap_err();
        assert!(matches!(err, AideError::UnknownCommand { .. }));
        assert!(table.find("BUMP").is_none());
    }

    #[test]
    fn missing_argument_carries_usage() {
        let table = table();
        let mut counter = Counter::default();
        match table.dispatch(&mut counter, "bump", &[]) {
            Err(AideError::InvalidArguments { usage }) => assert_eq!(usage, "bump <name>"),
            other => panic!("unexpected: {:?}", other.map(|r| r.messages)),
        }
    }

    #[test]
    fn args_helpers() {
        let w = words(&["Ann Lee", "12", "Main", "St"]);
        let args = Args::new(&w, &["x"]);
        assert_eq!(args.required(0).unwrap(), "Ann Lee");
        assert_eq!(args.parsed::<u32>(1).unwrap(), 12);
        assert!(args.parsed::<u32>(0).is_err());
        assert_eq!(args.joined(2).unwrap(), "Main St");
        assert!(args.joined(4).is_err());
        assert!(args.rest(9).is_empty());
        assert!(args.at_most(3).is_err());
        assert!(args.at_most(4).is_ok());
    }

    #[test]
    fn blank_words_count_as_missing() {
        let w = words(&["  "]);
        assert!(Args::new(&w, &["x"]).required(0).is_err());
    }

    #[test]
    fn catalog_lists_routes() {
        let catalog = table().catalog();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].feature, "counter");
        assert_eq!(catalog[0].aliases, vec!["b", "inc"]);
    }
}
