use super::Feature;
use crate::commands::{contacts, CmdResult};
use crate::dispatch::{Args, CommandTable, Route, RouteInfo};
use crate::error::Result;
use crate::store::{ContactStore, StorageBackend};
use chrono::Local;
use std::path::PathBuf;

pub struct AddressBook<B: StorageBackend> {
    store: ContactStore<B>,
    table: CommandTable<ContactStore<B>>,
}

impl<B: StorageBackend> AddressBook<B> {
    pub fn new(store: ContactStore<B>) -> Self {
        Self {
            store,
            table: routes(),
        }
    }

    pub fn store(&self) -> &ContactStore<B> {
        &self.store
    }
}

impl<B: StorageBackend> Feature for AddressBook<B> {
    fn name(&self) -> &'static str {
        "contacts"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["contact"]
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

fn routes<B: StorageBackend>() -> CommandTable<ContactStore<B>> {
    CommandTable::new("contacts")
        .route(Route {
            keyword: "add",
            aliases: &["new"],
            usage: &[
                "add contact <name> [phones...]",
                "add phone <name> <phone>",
                "add email <name> <email>",
                "add birthday <name> <DD.MM.YYYY>",
                "add address <name> <text...>",
            ],
            summary: "Add a contact or one of its fields",
            handler: add::<B>,
        })
        .route(Route {
            keyword: "change",
            aliases: &["edit"],
            usage: &[
                "change phone <name> <old> <new>",
                "change email <name> <email>",
                "change birthday <name> <DD.MM.YYYY>",
                "change address <name> <text...>",
                "change name <name> <new name...>",
            ],
            summary: "Change a field of a contact, or rename it",
            handler: change::<B>,
        })
        .route(Route {
            keyword: "remove",
            aliases: &["delete", "rm"],
            usage: &[
                "remove contact <name>",
                "remove phone <name> <phone>",
                "remove email <name>",
                "remove birthday <name>",
                "remove address <name>",
            ],
            summary: "Remove a contact or one of its fields",
            handler: remove::<B>,
        })
        .route(Route {
            keyword: "show",
            aliases: &["list", "ls"],
            usage: &["show [name]"],
            summary: "Show one contact, or all of them",
            handler: show::<B>,
        })
        .route(Route {
            keyword: "search",
            aliases: &["find"],
            usage: &["search <text...>"],
            summary: "Find contacts containing some text (case-sensitive)",
            handler: search::<B>,
        })
        .route(Route {
            keyword: "birthdays",
            aliases: &["bd"],
            usage: &["birthdays <days>"],
            summary: "List birthdays coming up within a number of days",
            handler: birthdays::<B>,
        })
}

fn add<B: StorageBackend>(store: &mut ContactStore<B>, args: &Args) -> Result<CmdResult> {
    let name = args.required(1)?;
    match args.required(0)? {
        "contact" => contacts::add_contact(store, name, args.rest(2)),
        "phone" => {
            args.at_most(3)?;
            contacts::add_phone(store, name, args.required(2)?)
        }
        "email" => {
            args.at_most(3)?;
            contacts::set_email(store, name, args.required(2)?)
        }
        "birthday" => {
            args.at_most(3)?;
            contacts::set_birthday(store, name, args.required(2)?)
        }
        "address" => contacts::set_address(store, name, &args.joined(2)?),
        _ => Err(args.invalid()),
    }
}

fn change<B: StorageBackend>(store: &mut ContactStore<B>, args: &Args) -> Result<CmdResult> {
    let name = args.required(1)?;
    match args.required(0)? {
        "phone" => {
            args.at_most(4)?;
            contacts::change_phone(store, name, args.required(2)?, args.required(3)?)
        }
        "email" => {
            args.at_most(3)?;
            contacts::change_email(store, name, args.required(2)?)
        }
        "birthday" => {
            args.at_most(3)?;
            contacts::change_birthday(store, name, args.required(2)?)
        }
        "address" => contacts::change_address(store, name, &args.joined(2)?),
        "name" => contacts::rename_contact(store, name, &args.joined(2)?),
        _ => Err(args.invalid()),
    }
}

fn remove<B: StorageBackend>(store: &mut ContactStore<B>, args: &Args) -> Result<CmdResult> {
    let name = args.required(1)?;
    let what = args.required(0)?;
    if what == "phone" {
        args.at_most(3)?;
        return contacts::remove_phone(store, name, args.required(2)?);
    }
    args.at_most(2)?;
    match what {
        "contact" => contacts::remove_contact(store, name),
        "email" => contacts::remove_email(store, name),
        "birthday" => contacts::remove_birthday(store, name),
        "address" => contacts::remove_address(store, name),
        _ => Err(args.invalid()),
    }
}

fn show<B: StorageBackend>(store: &mut ContactStore<B>, args: &Args) -> Result<CmdResult> {
    args.at_most(1)?;
    contacts::show(store, args.get(0))
}

fn search<B: StorageBackend>(store: &mut ContactStore<B>, args: &Args) -> Result<CmdResult> {
    contacts::search(store, &args.joined(0)?)
}

fn birthdays<B: StorageBackend>(store: &mut ContactStore<B>, args: &Args) -> Result<CmdResult> {
    args.at_most(1)?;
    let days: u32 = args.parsed(0)?;
    contacts::birthdays(store, days, Local::now().date_naive())
}
