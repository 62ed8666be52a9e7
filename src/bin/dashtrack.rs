use anyhow::Result;
use dashtrack::config::Config;
use dashtrack::context::StandardContext;
use dashtrack::model::display::{format_relative_date, short_id};
use dashtrack::store::{FilterOptions, ItemStore};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;

fn main() -> Result<()> {
    let _ = TermLogger::init(
        LevelFilter::Warn,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() || args[0] == "--help" || args[0] == "-h" || args[0] == "help" {
        print_help();
        return Ok(());
    }

    let ctx = StandardContext::new(None);
    let config = Config::load(&ctx)?;
    let mut store = ItemStore::load(&ctx, &config)?;

    match args[0].as_str() {
        "add" => {
            if args.len() < 2 {
                anyhow::bail!("Usage: dashtrack add <text>");
            }
            let text = args[1..].join(" ");
            let id = store.quick_add(&ctx, &text)?;
            if let Some(item) = store.get(&id) {
                println!("Added: {}", item.title);
                if let Some(due) = item.due_date {
                    println!("  due {}", format_relative_date(due, chrono::Utc::now()));
                }
                if let Some(rule) = item.recurrence_rule {
                    println!("  repeats {} (10 occurrences created)", rule);
                }
            }
        }
        "list" => {
            let show_completed = config.show_completed || args.iter().any(|a| a == "--all");
            let opts = FilterOptions {
                search_term: "",
                show_completed,
                kind: None,
            };
            let now = chrono::Utc::now();
            for item in store.filtered(&opts) {
                let check = if item.is_completed { "x" } else { " " };
                let due = item
                    .relevant_date()
                    .map(|d| format!("  ({})", format_relative_date(d, now)))
                    .unwrap_or_default();
                let prio = match item.priority {
                    dashtrack::model::Priority::None => String::new(),
                    p => format!("  [{}]", p),
                };
                println!(
                    "[{}] {}  {}{}{}",
                    check,
                    short_id(&item.id),
                    item.title,
                    due,
                    prio
                );
            }
        }
        "done" => {
            let id = resolve_id(&store, args.get(1).map(String::as_str))?;
            let completed = store.toggle_completed(&ctx, &id)?;
            println!(
                "{} {}",
                if completed { "Completed" } else { "Reopened" },
                id
            );
        }
        "rm" => {
            let id = resolve_id(&store, args.get(1).map(String::as_str))?;
            store.delete_item(&ctx, &id)?;
            println!("Deleted {}", id);
        }
        other => {
            anyhow::bail!("Unknown command: {} (try --help)", other);
        }
    }

    Ok(())
}

/// Accepts a full item id or a unique prefix of one.
fn resolve_id(store: &ItemStore, arg: Option<&str>) -> Result<String> {
    let Some(prefix) = arg else {
        anyhow::bail!("Missing item id");
    };
    let matches: Vec<&str> = store
        .items
        .iter()
        .map(|i| i.id.as_str())
        .filter(|id| id.starts_with(prefix))
        .collect();
    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => anyhow::bail!("No item matching id '{}'", prefix),
        _ => anyhow::bail!("Ambiguous id '{}' ({} matches)", prefix, matches.len()),
    }
}

fn print_help() {
    println!("Dashtrack v{} - personal task & event tracker", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    dashtrack add <text>     Quick-add an item from natural language");
    println!("    dashtrack list [--all]   List items (--all includes completed)");
    println!("    dashtrack done <id>      Toggle completion (id prefix accepted)");
    println!("    dashtrack rm <id>        Delete an item");
    println!("    dashtrack --help         Show this help message");
    println!();
    println!("QUICK-ADD EXAMPLES:");
    println!("    dashtrack add \"Team standup tomorrow high priority daily\"");
    println!("    dashtrack add \"Pay rent monthly Jan 31\"");
    println!("    dashtrack add \"Follow up in 3 days\"");
}
