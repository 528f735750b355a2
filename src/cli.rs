//! Terminal front end — reads commands from stdin and renders the app.
//!
//! Wall-clock time is mapped onto the app's virtual clock: before every
//! command, and whenever the next timer is due, the app is advanced to the
//! time elapsed since start-up.
//!
//! On the StyleBot tab every line is a chat message unless it starts with
//! `/`, so `/back` leaves the chat while `back` is sent to the assistant.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::time::Instant;

use crate::app::App;
use crate::notify::{Notification, NotificationLevel, Notifier};
use crate::shell::{ExploreFilter, ShellView, Tab};
use crate::stylebot::Role;

const HELP: &str = "\
Commands:
  next | skip              onboarding: continue / I already have an account
  tab <name>               home, explore, stylebot, community, profile,
                           notifications, messages
  back                     leave a secondary screen
  filter <name>            explore: posts, users, styles
  tag <n>                  explore: select hashtag chip n (posts only)
  upload | share | close   upload sheet: open / share / dismiss
  insight                  tap the AI insight on a feed card
  prompt <n>               stylebot: fill the input with quick prompt n
  say <text>               stylebot: send a message (bare text works too)
  send                     stylebot: send the input buffer
  view | help | quit

On the stylebot tab plain lines are chat; prefix commands with `/`
(e.g. `/back`, `/tab home`). The prefix works on every screen.";

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Skip,
    Tab(Tab),
    Back,
    Upload,
    Share,
    Close,
    Insight,
    Filter(ExploreFilter),
    Tag(usize),
    Prompt(usize),
    Say(String),
    Send,
    View,
    Help,
    Quit,
    /// Anything that is not a command. Sent as chat on the assistant tab.
    Text(String),
    /// A command with a bad argument.
    Invalid(String),
}

impl Command {
    /// Parse a line typed while `tab` is showing. On the assistant tab only
    /// `/`-prefixed lines are commands.
    pub fn parse_on(line: &str, tab: Tab) -> Command {
        let trimmed = line.trim();
        if tab == Tab::StyleBot && !trimmed.starts_with('/') {
            return Command::Text(trimmed.to_string());
        }
        Command::parse(trimmed)
    }

    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };

        match (head.to_lowercase().as_str(), rest) {
            ("next" | "continue", "") => Command::Next,
            ("skip", "") => Command::Skip,
            ("back", "") => Command::Back,
            ("upload" | "+", "") => Command::Upload,
            ("share", "") => Command::Share,
            ("close", "") => Command::Close,
            ("insight", "") => Command::Insight,
            ("send", "") => Command::Send,
            ("view", "") => Command::View,
            ("help" | "?", "") => Command::Help,
            ("quit" | "exit", "") => Command::Quit,
            ("tab", name) => match name.parse::<Tab>() {
                Ok(tab) => Command::Tab(tab),
                Err(e) => Command::Invalid(e),
            },
            ("filter", name) => match name.parse::<ExploreFilter>() {
                Ok(filter) => Command::Filter(filter),
                Err(e) => Command::Invalid(e),
            },
            ("tag", n) => match one_based(n) {
                Some(index) => Command::Tag(index),
                None => Command::Invalid(format!("Invalid hashtag number: {}", n)),
            },
            ("prompt", n) => match one_based(n) {
                Some(index) => Command::Prompt(index),
                None => Command::Invalid(format!("Invalid prompt number: {}", n)),
            },
            ("say", text) => Command::Say(text.to_string()),
            _ => Command::Text(trimmed.to_string()),
        }
    }
}

fn one_based(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

/// Whether the loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the app.
pub fn handle(app: &mut App, command: Command) -> Flow {
    match command {
        Command::Next => app.onboarding_next(),
        Command::Skip => app.onboarding_skip(),
        Command::Tab(tab) => app.select_tab(tab),
        Command::Back => app.back(),
        Command::Upload => app.open_upload(),
        Command::Share => app.submit_upload(),
        Command::Close => app.close_upload(),
        Command::Insight => app.tap_insight(),
        Command::Filter(filter) => app.select_filter(filter),
        Command::Tag(index) => {
            if !app.select_hashtag(index) {
                eprintln!("No hashtag {} here", index + 1);
            }
        }
        Command::Prompt(index) => {
            if !app.use_quick_prompt(index) {
                eprintln!("No quick prompt {} here", index + 1);
            }
        }
        Command::Say(text) => app.submit(&text),
        Command::Send => app.send(),
        Command::Text(text) if app.tab() == Tab::StyleBot => app.submit(&text),
        Command::Text(text) if text.is_empty() => {}
        Command::Text(text) => eprintln!("Unknown command: {} (try `help`)", text),
        Command::Invalid(reason) => eprintln!("{}", reason),
        Command::View => {}
        Command::Help => println!("{HELP}"),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Render the visible screen as plain text.
pub fn render(app: &App) -> String {
    let catalog = app.catalog();
    let mut out = Vec::new();

    match app.view() {
        ShellView::Splash => {
            out.push(format!("  {}", catalog.brand));
            out.push(format!("  {}", catalog.tagline));
        }
        ShellView::Onboarding { step, len, is_last } => {
            if let Some(slide) = catalog.slides.get(step) {
                out.push(format!("[{}/{}] {}", step + 1, len, slide.title));
                out.push(format!("  {}", slide.description));
                if let Some(ref extra) = slide.extra {
                    out.push(format!("  ({})", extra));
                }
            }
            let label = if is_last {
                &catalog.finish_label
            } else {
                &catalog.continue_label
            };
            out.push(format!("  > next: {}   > skip: {}", label, catalog.skip_label));
        }
        ShellView::Main(main) => {
            if let Some(header) = &main.header {
                let search = if header.show_search { "  [search]" } else { "" };
                out.push(format!("== {} =={}", header.title, search));
            } else if main.show_back {
                out.push(format!("<- {}", main.tab.title()));
            }

            if main.tab == Tab::StyleBot {
                for message in app.transcript() {
                    let who = match message.role {
                        Role::User => "you",
                        Role::Assistant => "StyleBot",
                    };
                    out.push(format!("[{}] {}: {}", message.time_label(), who, message.text));
                    if message.has_suggestions {
                        for s in &catalog.suggestions {
                            out.push(format!("    * {} {} {}", s.brand, s.item, s.price));
                        }
                    }
                }
                let conversation = app.conversation();
                if conversation.pending_replies() > 0 {
                    out.push("  StyleBot is typing...".to_string());
                }
                if !conversation.input().is_empty() {
                    out.push(format!("  input: {}", conversation.input()));
                }
                let prompts: Vec<String> = conversation
                    .quick_prompts()
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("{}) {}", i + 1, p))
                    .collect();
                if !prompts.is_empty() {
                    out.push(format!("  prompts: {}", prompts.join("  ")));
                }
            } else if let Some(explore) = &main.explore {
                let filters: Vec<String> = ExploreFilter::ALL
                    .into_iter()
                    .map(|filter| {
                        if filter == explore.filter {
                            format!("*{}*", filter)
                        } else {
                            filter.to_string()
                        }
                    })
                    .collect();
                out.push(format!("  filter: {}", filters.join(" | ")));
                if explore.filter.shows_hashtags() {
                    let chips: Vec<String> = catalog
                        .hashtags
                        .iter()
                        .enumerate()
                        .map(|(i, tag)| {
                            if explore.hashtag.as_deref() == Some(tag.as_str()) {
                                format!("{}) [{}]", i + 1, tag)
                            } else {
                                format!("{}) {}", i + 1, tag)
                            }
                        })
                        .collect();
                    if !chips.is_empty() {
                        out.push(format!("  tags: {}", chips.join("  ")));
                    }
                }
            } else {
                out.push(format!("  ({} screen)", main.tab));
            }

            if main.upload_open {
                out.push("  [new post] share | close".to_string());
            }

            let nav: Vec<String> = Tab::ALL
                .into_iter()
                .filter(Tab::is_primary)
                .map(|tab| {
                    if tab == main.tab {
                        format!("*{}*", tab)
                    } else {
                        tab.to_string()
                    }
                })
                .collect();
            let bot = if main.show_bot_shortcut { "  (stylebot)" } else { "" };
            out.push(format!("-- {} --{}", nav.join(" | "), bot));
        }
    }

    out.join("\n")
}

/// Prints notifications as toasts on stdout.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let icon = match notification.level {
            NotificationLevel::Success => "✔",
            NotificationLevel::Info => "ℹ",
        };
        println!("{} {}", icon, notification.message);
        tracing::debug!(level = %notification.level, "Toast shown");
    }
}

async fn sleep_until_due(delay: Option<Duration>) {
    match delay {
        Some(delay) => tokio::time::sleep(delay).await,
        None => std::future::pending::<()>().await,
    }
}

/// Run the interactive loop on stdin until `quit` or end of input.
pub async fn run(mut app: App) -> std::io::Result<()> {
    run_with(&mut app, tokio::io::stdin()).await
}

/// Run the interactive loop on `input`. The app is shut down however the
/// loop ends; a read error is returned afterwards.
pub async fn run_with<R>(app: &mut App, input: R) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let started = Instant::now();
    let mut lines = BufReader::new(input).lines();

    app.start();
    println!("{}", render(app));
    eprintln!("Type `help` for commands.");

    let result = loop {
        let until_due = app
            .next_deadline()
            .map(|due| due.saturating_sub(started.elapsed()));

        tokio::select! {
            line = lines.next_line() => {
                app.advance_to(started.elapsed()).await;
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break Ok(()),
                    Err(e) => break Err(e),
                };
                let command = Command::parse_on(&line, app.tab());
                if handle(app, command) == Flow::Quit {
                    break Ok(());
                }
                println!("{}", render(app));
            }
            _ = sleep_until_due(until_due) => {
                app.advance_to(started.elapsed()).await;
                println!("{}", render(app));
            }
        }
    };

    app.shutdown();
    result
}
