mod cli;

use todoit::app::TodoSession;
use todoit::auth::{self, NewUser};
use todoit::config::Config;
use todoit::storage::FileStore;
use todoit::todo::{PaletteColor, Task};
use todoit::utils::paths::{get_crash_log_path, get_logs_dir};
use todoit::view::{PeriodTab, SearchQuery, StatusFilter, TagFilter, TaskGroup};
use todoit::TodoError;

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Commands, TagCommand};
use std::fs;
use std::io::Write;
use std::panic;

/// Install a panic hook that writes crash information to a log file
fn install_crash_handler() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if let Ok(crash_log_path) = get_crash_log_path() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut crash_report = format!("=== CRASH at {} ===\n", timestamp);

            if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            }

            if let Some(location) = panic_info.location() {
                crash_report.push_str(&format!(
                    "Location: {}:{}:{}\n",
                    location.file(),
                    location.line(),
                    location.column()
                ));
            }
            crash_report.push('\n');

            if let Some(parent) = crash_log_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(mut file) = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log_path)
            {
                let _ = file.write_all(crash_report.as_bytes());
                eprintln!("\nCrash logged to: {}", crash_log_path.display());
            }
        }

        default_hook(panic_info);
    }));
}

/// Initialize file-based logging.
///
/// Logs are written to ~/.todoit/logs/todoit.log, rolled daily.
/// Log level can be controlled with RUST_LOG env var (default: info).
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = get_logs_dir().ok()?;

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "todoit.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    install_crash_handler();

    let cli = Cli::parse();
    let _log_guard = init_file_logging();
    let config = Config::load()?;
    let mut store = FileStore::open(config.store_path()?)?;
    let today = Local::now().date_naive();

    tracing::debug!(command = ?cli.command, store = %store.path().display(), "todoit starting");

    match cli.command {
        Some(Commands::Signup {
            email,
            password,
            name,
            nickname,
            thumbnail,
        }) => {
            let new_user = NewUser {
                email,
                password,
                name,
                nickname,
                thumbnail,
            };
            let id = auth::signup(&mut store, new_user)?;
            println!("✓ Welcome, {}! You are logged in.", id);
        }
        Some(Commands::Login { email, password }) => {
            let id = auth::login(&mut store, &email, &password)?;
            println!("✓ Logged in as {}", id);
        }
        Some(Commands::Logout) => {
            auth::logout(&mut store)?;
            println!("✓ Logged out");
        }
        Some(Commands::Whoami) => handle_whoami(&store)?,
        Some(Commands::Add {
            text,
            due,
            no_due,
            tag,
        }) => {
            let due_date = if no_due {
                None
            } else {
                Some(due.as_deref().map(parse_date).transpose()?.unwrap_or(today))
            };
            let mut session = open_session(store, today)?;
            match session.add_task(&text, due_date, tag.as_deref())? {
                Some(id) => println!("✓ Todo added ({})", id),
                None => println!("Nothing added: the text is empty"),
            }
        }
        Some(Commands::Edit {
            id,
            text,
            due,
            no_due,
            tag,
        }) => handle_edit(open_session(store, today)?, id, text, due, no_due, tag)?,
        Some(Commands::Toggle { id }) => {
            let mut session = open_session(store, today)?;
            if session.toggle_completed(id)? {
                let done = session.task(id).is_some_and(|t| t.completed);
                println!("✓ {}", if done { "Marked done" } else { "Reopened" });
            } else {
                println!("No task with id {}", id);
            }
        }
        Some(Commands::Fav { id }) => {
            let mut session = open_session(store, today)?;
            if session.toggle_favorite(id)? {
                let fav = session.task(id).is_some_and(|t| t.is_favorite);
                println!("{}", if fav { "★ Added to favorites" } else { "☆ Removed from favorites" });
            } else {
                println!("No task with id {}", id);
            }
        }
        Some(Commands::Delete { id, yes }) => handle_delete(open_session(store, today)?, id, yes)?,
        Some(Commands::Move { id, target }) => {
            let mut session = open_session(store, today)?;
            if session.reorder(id, target)? {
                println!("✓ Moved");
            } else {
                println!("Can only move an open task onto another open task with the same tag");
            }
        }
        Some(Commands::Show {
            period,
            date,
            status,
            shift,
        }) => {
            let anchor = date.as_deref().map(parse_date).transpose()?;
            let mut session = open_session(store, today)?;
            if let Some(anchor) = anchor {
                session.view_state.anchors.jump_to(anchor);
            }
            session.view_state.tab = period.unwrap_or(config.default_period);
            session.view_state.status = status.unwrap_or(config.default_status);
            session.view_state.anchors.shift(session.view_state.tab, shift);
            print_view(&session);
        }
        Some(Commands::Search { keyword, tag }) => {
            let session = open_session(store, today)?;
            print_search(&session, &SearchQuery::new(tag, keyword));
        }
        Some(Commands::Favorites) => {
            let session = open_session(store, today)?;
            let groups = session.favorites();
            if groups.is_empty() {
                println!("No favorites yet");
            } else {
                println!("\n★ Favorites\n");
                print_groups(&groups);
            }
        }
        Some(Commands::Tags) => {
            let session = open_session(store, today)?;
            let tags = session.tags();
            if tags.is_empty() {
                println!("No tags yet");
            }
            for summary in tags {
                println!(
                    "{} {} ({}, {} task{})",
                    swatch(summary.color),
                    summary.tag,
                    summary.color.name,
                    summary.count,
                    if summary.count == 1 { "" } else { "s" }
                );
            }
        }
        Some(Commands::Tag { command }) => handle_tag_command(open_session(store, today)?, command)?,
        None => {
            let mut session = open_session(store, today)?;
            session.view_state.tab = config.default_period;
            session.view_state.status = config.default_status;
            print_view(&session);
        }
    }

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format. Use YYYY-MM-DD"))
}

fn open_session(store: FileStore, today: NaiveDate) -> Result<TodoSession<FileStore>> {
    let user = auth::require_user(&store)?;
    TodoSession::open(store, user, today)
}

fn handle_whoami(store: &FileStore) -> Result<()> {
    match auth::current_profile(store)? {
        Some(user) => {
            println!("{} <{}>", user.display_name(), user.email);
            if !user.name.is_empty() {
                println!("Name: {}", user.name);
            }
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

fn handle_edit(
    mut session: TodoSession<FileStore>,
    id: i64,
    text: Option<String>,
    due: Option<String>,
    no_due: bool,
    tag: Option<String>,
) -> Result<()> {
    let Some(task) = session.task(id).cloned() else {
        println!("No task with id {}", id);
        return Ok(());
    };

    let text = text.unwrap_or(task.text);
    let due_date = match (no_due, due) {
        (true, _) => None,
        (false, Some(d)) => Some(parse_date(&d)?),
        (false, None) => task.due_date,
    };
    let tag = tag.or(task.tag);

    if session.edit_task(id, &text, due_date, tag.as_deref())? {
        println!("✓ Todo updated");
    } else {
        println!("Nothing changed: the text is empty");
    }
    Ok(())
}

fn handle_delete(mut session: TodoSession<FileStore>, id: i64, yes: bool) -> Result<()> {
    use dialoguer::Confirm;

    if !session.request_delete(id) {
        println!("No task with id {}", id);
        return Ok(());
    }

    let confirmed = yes || {
        let text = session.pending_delete().map(|t| t.text.clone()).unwrap_or_default();
        Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", text))
            .default(false)
            .interact()?
    };

    if confirmed {
        session.confirm_delete()?;
        println!("✓ Todo deleted");
    } else {
        session.cancel_delete();
        println!("Cancelled");
    }
    Ok(())
}

fn handle_tag_command(mut session: TodoSession<FileStore>, command: TagCommand) -> Result<()> {
    match command {
        TagCommand::Rename { old, new } => match session.rename_tag(&old, &new) {
            Ok(true) => println!("✓ Renamed '{}' to '{}'", old, new.trim()),
            Ok(false) => println!("Nothing changed"),
            Err(e) => match e.downcast_ref::<TodoError>() {
                Some(rejection) => eprintln!("Warning: {}", rejection),
                None => return Err(e),
            },
        },
        TagCommand::Color { tag, color } => {
            let color = session.set_tag_color(&tag, &color)?;
            println!("{} {} is now {}", swatch(color), tag.trim(), color.name);
        }
    }
    Ok(())
}

fn swatch(color: &PaletteColor) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1b[38;2;{};{};{}m●\x1b[0m", r, g, b)
}

fn task_line(task: &Task) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let star = if task.is_favorite { " ★" } else { "" };
    let due = task
        .due_date
        .map(|d| format!("  ({})", d.format("%Y.%m.%d")))
        .unwrap_or_default();
    format!("{} {}{}{}  #{}", check, task.text, due, star, task.id)
}

fn print_groups(groups: &[TaskGroup<'_>]) {
    for group in groups {
        println!("{} {}", swatch(group.color), group.key);
        for task in &group.tasks {
            println!("    {}", task_line(task));
        }
        println!();
    }
}

fn print_view(session: &TodoSession<FileStore>) {
    let view = session.current_view();
    let title = match view.tab {
        PeriodTab::Daily => "Daily",
        PeriodTab::Weekly => "Weekly",
        PeriodTab::Monthly => "Monthly",
    };
    let status = match view.status {
        StatusFilter::All => String::new(),
        other => format!(" [{}]", other),
    };
    println!("\n📋 {} - {}{}\n", title, view.period_label, status);

    if view.is_empty() {
        println!("No todos for this period!");
        return;
    }
    print_groups(&view.groups);
}

fn print_search(session: &TodoSession<FileStore>, query: &SearchQuery) {
    let hits = session.search(query);
    let scope = match &query.tag {
        TagFilter::All => String::new(),
        tag => format!(" in {}", tag),
    };
    println!("\n🔍 {} result(s){}\n", hits.len(), scope);

    for hit in hits {
        let check = if hit.completed { "[x]" } else { "[ ]" };
        let due = hit.due_label.map(|d| format!("  ({})", d)).unwrap_or_default();
        let tag = hit
            .task
            .tag
            .as_deref()
            .map(|t| format!("{} {}  ", swatch(hit.color), t))
            .unwrap_or_default();
        println!("  {}{} {}{}  #{}", tag, check, hit.task.text, due, hit.task.id);
    }
}
