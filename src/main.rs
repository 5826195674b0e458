//! Line-oriented terminal front end for the catalog.
//!
//! A thin presentation adapter: it reads commands from stdin, turns them into
//! [`Event`]s and prints the view model whenever the derived view or the load
//! status changes.
//!
//! # Usage
//!
//! ```text
//! catalog-view [CONFIG_PATH] [key=value ...]
//! ```
//!
//! Without `CONFIG_PATH` the default config file is used if it exists.
//! `key=value` pairs override config values (see `Config::from_map`).
//!
//! # Commands
//!
//! - `load`: start a load
//! - `deactivate <id>`: deactivate an item
//! - `search <text>`: set search text (`search` alone clears it)
//! - `category <name>`: set category (`category all` clears it)
//! - `sort <key>`: `title-asc`, `title-desc`, `price-asc`, `price-desc`
//! - `categories`: list category options
//! - `quit`

#![allow(clippy::multiple_crate_versions)]

use catalog_view::app::{handle_event, Catalog, Event};
use catalog_view::ui::{CatalogViewModel, StatusBanner};
use catalog_view::{infrastructure, observability, Config};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

enum Command {
    Dispatch(Event),
    ListCategories,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

    match verb {
        "load" => Some(Command::Dispatch(Event::Load)),
        "deactivate" => rest.trim().parse().ok().map(|id| Command::Dispatch(Event::Deactivate(id))),
        "search" => Some(Command::Dispatch(Event::SetSearch(rest.to_string()))),
        "category" => Some(Command::Dispatch(Event::SetCategory(rest.to_string()))),
        "sort" => Some(Command::Dispatch(Event::SetSort(rest.trim().to_string()))),
        "categories" => Some(Command::ListCategories),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn load_config(args: &[String]) -> catalog_view::Result<Config> {
    let (overrides, paths): (Vec<&String>, Vec<&String>) = args.iter().partition(|arg| arg.contains('='));

    let overrides: BTreeMap<String, String> = overrides
        .into_iter()
        .filter_map(|arg| arg.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let path: Option<PathBuf> = match paths.first() {
        Some(path) => Some(infrastructure::expand_tilde(path)),
        None => infrastructure::default_config_path().filter(|path| path.exists()),
    };

    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .merge_map(&overrides);

    config.validate()?;
    Ok(config)
}

fn render(vm: &CatalogViewModel) {
    println!("{}", vm.header.title);
    if let Some(subtitle) = &vm.header.subtitle {
        println!("  {subtitle}");
    }
    match &vm.status {
        Some(StatusBanner::Loading) => println!("  loading..."),
        Some(StatusBanner::Error(message)) => println!("  ! {message}"),
        None => {}
    }
    for row in &vm.rows {
        println!("  [{}] {:<24} {:>9}  {}", row.id, row.title, row.price, row.category);
    }
    if let Some(empty) = &vm.empty_state {
        println!("  {} ({})", empty.message, empty.subtitle);
    }
}

fn render_current(catalog: &Catalog) {
    let items = catalog.current_view().unwrap_or_default();
    render(&catalog.compute_viewmodel(&items));
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("catalog-view: {e}");
            std::process::exit(2);
        }
    };
    observability::init_tracing(&config);

    let catalog = match catalog_view::initialize(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("catalog-view: {e}");
            std::process::exit(1);
        }
    };

    let mut view = catalog.view();
    let mut loading = catalog.loading();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    handle_event(&catalog, &Event::Load);

    loop {
        tokio::select! {
            Some(_) = view.next() => render_current(&catalog),
            Ok(()) = loading.changed() => {
                loading.borrow_and_update();
                render_current(&catalog);
            }
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                match parse_command(&line) {
                    Some(Command::Dispatch(event)) => {
                        if !handle_event(&catalog, &event) {
                            println!("  (no change)");
                        }
                    }
                    Some(Command::ListCategories) => println!("  {}", catalog.categories().join(", ")),
                    Some(Command::Quit) => break,
                    None => println!("  unknown command: {line}"),
                }
            }
        }
    }

    tracing::debug!("exiting");
}
