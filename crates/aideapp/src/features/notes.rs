use super::Feature;
use crate::commands::{notes, CmdResult};
use crate::dispatch::{Args, CommandTable, Route, RouteInfo};
use crate::error::Result;
use crate::store::{NoteStore, StorageBackend};
use std::path::PathBuf;

pub struct Notebook<B: StorageBackend> {
    store: NoteStore<B>,
    table: CommandTable<NoteStore<B>>,
}

impl<B: StorageBackend> Notebook<B> {
    pub fn new(store: NoteStore<B>) -> Self {
        Self {
            store,
            table: routes(),
        }
    }

    pub fn store(&self) -> &NoteStore<B> {
        &self.store
    }
}

impl<B: StorageBackend> Feature for Notebook<B> {
    fn name(&self) -> &'static str {
        "notes"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["note"]
    }

    fn dispatch(&mut self, keyword: &str, args: &[String]) -> Result<CmdResult> {
        self.table.dispatch(&mut self.store, keyword, args)
    }

    fn catalog(&self) -> Vec<RouteInfo> {
        self.table.catalog()
    }

    fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    fn flush(&mut self) -> Result<bool> {
        if !self.store.is_dirty() {
            return Ok(false);
        }
        self.store.save()?;
        Ok(true)
    }

    fn location(&self) -> PathBuf {
        self.store.location()
    }
}

fn routes<B: StorageBackend>() -> CommandTable<NoteStore<B>> {
    CommandTable::new("notes")
        .route(Route {
            keyword: "add",
            aliases: &["make", "new"],
            usage: &["add note <title> [text] [tags...]", "add tag <title> <tags...>"],
            summary: "Add a note, or tags to a note",
            handler: add::<B>,
        })
        .route(Route {
            keyword: "change",
            aliases: &["edit"],
            usage: &[
                "change title <title> <new title...>",
                "change text <title> <text...>",
                "change tags <title> <tags...>",
                "change tag <title> <old> <new>",
            ],
            summary: "Retitle a note, rewrite its text or retag it",
            handler: change::<B>,
        })
        .route(Route {
            keyword: "remove",
            aliases: &["delete", "rm"],
            usage: &["remove note <title>", "remove tag <title> <tag>"],
            summary: "Remove a note or one of its tags",
            handler: remove::<B>,
        })
        .route(Route {
            keyword: "show",
            aliases: &["list", "ls"],
            usage: &["show [title]"],
            summary: "Show one note, or all of them",
            handler: show::<B>,
        })
        .route(Route {
            keyword: "search",
            aliases: &["find"],
            usage: &["search <text...>"],
            summary: "Find notes containing some text (case-sensitive)",
            handler: search::<B>,
        })
        .route(Route {
            keyword: "tagged",
            aliases: &[],
            usage: &["tagged <tag>"],
            summary: "List notes carrying a tag",
            handler: tagged::<B>,
        })
}

fn add<B: StorageBackend>(store: &mut NoteStore<B>, args: &Args) -> Result<CmdResult> {
    let title = args.required(1)?;
    match args.required(0)? {
        "note" => {
            let body = args.get(2).unwrap_or("");
            notes::add_note(store, title, body, args.rest(3))
        }
        "tag" => {
            args.required(2)?;
            notes::add_tags(store, title, args.rest(2))
        }
        _ => Err(args.invalid()),
    }
}

fn change<B: StorageBackend>(store: &mut NoteStore<B>, args: &Args) -> Result<CmdResult> {
    let title = args.required(1)?;
    match args.required(0)? {
        "title" => notes::retitle(store, title, &args.joined(2)?),
        "text" => notes::set_text(store, title, &args.joined(2)?),
        "tags" => {
            args.required(2)?;
            notes::set_tags(store, title, args.rest(2))
        }
        "tag" => {
            args.at_most(4)?;
            notes::change_tag(store, title, args.required(2)?, args.required(3)?)
        }
        _ => Err(args.invalid()),
    }
}

fn remove<B: StorageBackend>(store: &mut NoteStore<B>, args: &Args) -> Result<CmdResult> {
    let title = args.required(1)?;
    match args.required(0)? {
        "note" => {
            args.at_most(2)?;
            notes::remove_note(store, title)
        }
        "tag" => {
            args.at_most(3)?;
            notes::remove_tag(store, title, args.required(2)?)
        }
        _ => Err(args.invalid()),
    }
}

fn show<B: StorageBackend>(store: &mut NoteStore<B>, args: &Args) -> Result<CmdResult> {
    args.at_most(1)?;
    notes::show(store, args.get(0))
}

fn search<B: StorageBackend>(store: &mut NoteStore<B>, args: &Args) -> Result<CmdResult> {
    notes::search(store, &args.joined(0)?)
}

fn tagged<B: StorageBackend>(store: &mut NoteStore<B>, args: &Args) -> Result<CmdResult> {
    args.at_most(1)?;
    notes::tagged(store, args.required(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AideError;
    use crate::store::MemBackend;

    fn notebook() -> Notebook<MemBackend> {
        Notebook::new(NoteStore::in_memory())
    }

    fn run(book: &mut Notebook<MemBackend>, keyword: &str, words: &[&str]) -> Result<CmdResult> {
        let args: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        book.dispatch(keyword, &args)
    }

    #[test]
    fn add_note_with_text_and_tags() {
        let mut book = notebook();
        run(
            &mut book,
            "make",
            &["note", "Groceries", "milk, eggs", "home", "weekly"],
        )
        .unwrap();
        let note = book.store().get("Groceries").unwrap();
        assert_eq!(note.body(), "milk, eggs");
        assert_eq!(note.tags().len(), 2);
    }

    #[test]
    fn add_note_title_only() {
        let mut book = notebook();
        run(&mut book, "add", &["note", "Groceries"]).unwrap();
        assert_eq!(book.store().get("Groceries").unwrap().body(), "");
    }

    #[test]
    fn change_forms() {
        let mut book = notebook();
        run(&mut book, "add", &["note", "Groceries", "milk", "home"]).unwrap();
        run(&mut book, "edit", &["text", "Groceries", "bread", "and", "jam"]).unwrap();
        run(&mut book, "change", &["tag", "Groceries", "home", "kitchen"]).unwrap();
        run(&mut book, "change", &["title", "Groceries", "Shopping", "list"]).unwrap();

        let note = book.store().get("Shopping list").unwrap();
        assert_eq!(note.body(), "bread and jam");
        assert!(note.has_tag("kitchen"));
        assert!(!note.has_tag("home"));

        run(&mut book, "change", &["tags", "Shopping list", "a", "b"]).unwrap();
        assert_eq!(book.store().get("Shopping list").unwrap().tags().len(), 2);
    }

    #[test]
    fn tag_and_tagged() {
        let mut book = notebook();
        run(&mut book, "add", &["note", "Groceries"]).unwrap();
        run(&mut book, "add", &["note", "Chores"]).unwrap();
        run(&mut book, "add", &["tag", "Chores", "home", "weekly"]).unwrap();

        let result = run(&mut book, "tagged", &["home"]).unwrap();
        assert_eq!(result.notes.len(), 1);
        assert_eq!(result.notes[0].title(), "Chores");

        run(&mut book, "rm", &["tag", "Chores", "home"]).unwrap();
        assert!(run(&mut book, "tagged", &["home"]).unwrap().notes.is_empty());
    }

    #[test]
    fn bad_shapes_return_usage() {
        let mut book = notebook();
        for words in [
            &["note"][..],
            &["tag", "Groceries"][..],
            &["memo", "Groceries"][..],
        ] {
            assert!(matches!(
                run(&mut book, "add", words),
                Err(AideError::InvalidArguments { .. })
            ));
        }
        assert!(matches!(
            run(&mut book, "tagged", &[]),
            Err(AideError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn remove_note() {
        let mut book = notebook();
        run(&mut book, "add", &["note", "Groceries"]).unwrap();
        run(&mut book, "delete", &["note", "Groceries"]).unwrap();
        assert!(book.store().is_empty());
        assert!(matches!(
            run(&mut book, "delete", &["note", "Groceries"]),
            Err(AideError::NotFound { kind: "Note", .. })
        ));
    }
}
