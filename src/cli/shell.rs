//! Line-oriented shell over the drawer, for poking at a live backend.
//!
//! Slash commands drive the drawer; any other line is sent to the open
//! conversation. Task results are applied as they arrive, between lines.

use chrono::Local;
use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::conversation::LoadStatus;
use crate::drawer::Drawer;
use crate::filter::Tab;
use crate::models::{Message, Thread};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Open(String),
    Close,
    Tab(Tab),
    Search(String),
    Threads,
    Messages,
    Refresh,
    Dismiss,
    Send(String),
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
/threads           list visible conversations
/open <id>         open a conversation
/close             close the open conversation
/messages          show the open conversation
/tab <name>        all | unread | groups | communities
/search [text]     filter by name or subtitle (empty clears)
/refresh           reload the conversation list
/dismiss           hide the current error notice
/quit              exit
<text>             send to the open conversation";

/// Parse one line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<ShellCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    if !line.starts_with('/') {
        return Some(ShellCommand::Send(line.to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let parsed = match command {
        "/open" if !rest.is_empty() => ShellCommand::Open(rest.to_string()),
        "/open" => ShellCommand::Invalid("usage: /open <id>".to_string()),
        "/close" => ShellCommand::Close,
        "/tab" => match rest.parse::<Tab>() {
            Ok(tab) => ShellCommand::Tab(tab),
            Err(e) => ShellCommand::Invalid(e),
        },
        "/search" => ShellCommand::Search(rest.to_string()),
        "/threads" | "/ls" => ShellCommand::Threads,
        "/messages" | "/m" => ShellCommand::Messages,
        "/refresh" => ShellCommand::Refresh,
        "/dismiss" => ShellCommand::Dismiss,
        "/help" | "/?" => ShellCommand::Help,
        "/quit" | "/q" | "/exit" => ShellCommand::Quit,
        other => ShellCommand::Invalid(format!("unknown command: {}", other)),
    };
    Some(parsed)
}

pub fn render_thread(thread: &Thread, active: bool) -> String {
    let marker = if active { '>' } else { ' ' };
    let unread = if thread.unread_count > 0 {
        format!(" ({})", thread.unread_count)
    } else {
        String::new()
    };
    let subtitle = if thread.subtitle.is_empty() {
        String::new()
    } else {
        format!(" - {}", thread.subtitle)
    };
    format!(
        "{} [{}] {}{}{}  #{}",
        marker, thread.avatar_glyph, thread.display_name, unread, subtitle, thread.id
    )
}

pub fn render_message(message: &Message) -> String {
    let who = if message.is_mine() { "me" } else { "them" };
    format!(
        "[{}] {:>4}: {}",
        message.sent_at.with_timezone(&Local).format("%H:%M"),
        who,
        message.text
    )
}

fn print_threads(drawer: &Drawer) {
    if let Some(err) = drawer.store().load_error() {
        println!("(conversation list unavailable: {})", err.user_message());
        return;
    }
    let visible = drawer.visible_threads();
    println!(
        "-- {} | {} shown | {} unread --",
        drawer.tab(),
        visible.len(),
        drawer.unread_badge()
    );
    for thread in visible {
        let active = drawer.active_thread_id() == Some(thread.id.as_str());
        println!("{}", render_thread(thread, active));
    }
}

fn print_messages(drawer: &Drawer) {
    let Some(thread) = drawer.active_thread() else {
        println!("(no conversation open)");
        return;
    };
    println!("-- {} --", thread.display_name);
    match (drawer.active_status(), drawer.active_messages()) {
        (Some(LoadStatus::Failed), _) => {
            println!("(history failed to load; /open again to retry)")
        }
        (_, Some(messages)) if !messages.is_empty() => {
            for message in messages {
                println!("{}", render_message(message));
            }
        }
        (Some(LoadStatus::Pending), _) => println!("(loading...)"),
        _ => println!("(no messages yet)"),
    }
}

/// Returns `false` when the shell should exit.
fn run_command(drawer: &mut Drawer, command: ShellCommand) -> bool {
    match command {
        ShellCommand::Open(id) => {
            if drawer.active_thread_id() == Some(id.as_str()) {
                drawer.reload_active();
            } else if !drawer.select(&id) {
                println!("no conversation with id {}", id);
            }
        }
        ShellCommand::Close => drawer.close(),
        ShellCommand::Tab(tab) => {
            drawer.set_tab(tab);
            print_threads(drawer);
        }
        ShellCommand::Search(query) => {
            drawer.set_query(query);
            print_threads(drawer);
        }
        ShellCommand::Threads => print_threads(drawer),
        ShellCommand::Messages => print_messages(drawer),
        ShellCommand::Refresh => drawer.refresh(),
        ShellCommand::Dismiss => drawer.dismiss_notice(),
        ShellCommand::Send(text) => {
            drawer.set_draft(text);
            if let Err(rejection) = drawer.submit_draft() {
                println!("not sent: {}", rejection);
            }
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return false,
        ShellCommand::Invalid(reason) => println!("{}", reason),
    }
    true
}

/// Run the shell until stdin closes or `/quit`.
pub async fn run_shell(mut drawer: Drawer) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_notice = None;

    drawer.open();
    println!("{}", HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Some(command) = parse_line(&line) {
                    if !run_command(&mut drawer, command) {
                        break;
                    }
                }
            }
            _ = drawer.process_next(), if drawer.pending_tasks() > 0 => {}
        }

        if let Some(notice) = drawer.notice() {
            if last_notice != Some(notice.id) {
                println!("! {}", notice.message);
                last_notice = Some(notice.id);
            }
        }
    }

    Ok(())
}
