use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use saathi_application::{ChatController, RejectReason, TurnOutcome, refresh_connectivity, spawn_probe};
use saathi_core::chat::{ChatMessage, Connectivity, MessageKind, Sender};
use saathi_core::markup::{Segment, parse_inline};
use saathi_interaction::{BackendClient, SaathiBackend};

const PROBE_PERIOD: Duration = Duration::from_secs(60);

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/clear".to_string(),
                "/health".to_string(),
                "/news".to_string(),
                "/quit".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Renders one transcript message to the terminal with inline markup.
fn print_message(message: &ChatMessage) {
    let name = match message.sender {
        Sender::User => "You".green().bold(),
        Sender::Assistant => match message.kind {
            MessageKind::Emergency => "CyberSaathi".bright_red().bold(),
            MessageKind::UrlScanResult => "CyberSaathi".bright_yellow().bold(),
            _ => "CyberSaathi".bright_blue().bold(),
        },
    };
    println!("{} {}", name, format!("[{}]", message.timestamp.format("%H:%M")).bright_black());

    for line in message.content.lines() {
        print!("  ");
        for segment in parse_inline(line) {
            match segment {
                Segment::Plain(text) => print!("{text}"),
                Segment::Bold(text) => print!("{}", text.bold()),
                Segment::Link { label, url } => {
                    print!("{} {}", label.underline().bright_cyan(), format!("({url})").bright_black())
                }
                Segment::Code(code) => print!("{}", code.on_bright_black()),
            }
        }
        println!();
    }
    println!();
}

/// Prints every transcript message appended since `from`, returning the new
/// high-water mark.
fn print_new_messages(controller: &ChatController<BackendClient>, from: usize) -> usize {
    for message in &controller.log().all()[from..] {
        print_message(message);
    }
    controller.log().len()
}

/// The main entry point for the CyberSaathi terminal client.
///
/// Sets up a rustyline-based chat loop that:
/// 1. Connects to the backend proxy (config file, env, or default URL)
/// 2. Spawns the periodic health probe
/// 3. Provides command completion for /clear, /health, /news, and /quit
/// 4. Dispatches each submitted line through the turn pipeline
/// 5. Renders the transcript with colored inline markup
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let backend = Arc::new(BackendClient::from_config());
    let mut controller = ChatController::new(Arc::clone(&backend));

    // One-shot probe before the banner, then periodic refresh in the background.
    let connectivity = controller.connectivity_handle();
    refresh_connectivity(backend.as_ref(), &connectivity).await;
    let probe = spawn_probe(Arc::clone(&backend), controller.connectivity_handle(), PROBE_PERIOD);

    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== CyberSaathi ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Backend: {}", backend.base_url()).bright_black()
    );
    match controller.connectivity().await {
        Connectivity::Connected => println!("{}", "🟢 Online".green()),
        Connectivity::Disconnected => {
            println!("{}", "🔴 Offline - limited functionality, check your connection".yellow())
        }
    }
    println!(
        "{}",
        "Type a question, '/clear' to reset, '/health' to re-check the backend, '/news' for headlines, '/quit' to exit."
            .bright_black()
    );
    println!();

    let mut rendered = print_new_messages(&controller, 0);

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "/quit" || trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye! Stay safe online.".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed == "/clear" {
                    controller.clear();
                    println!("{}", "Chat history cleared.".bright_black());
                    rendered = print_new_messages(&controller, 0);
                    continue;
                }

                if trimmed == "/health" {
                    let state =
                        refresh_connectivity(backend.as_ref(), &controller.connectivity_handle())
                            .await;
                    match state {
                        Connectivity::Connected => println!("{}", "🟢 Backend reachable".green()),
                        Connectivity::Disconnected => {
                            println!("{}", "🔴 Backend unreachable".red())
                        }
                    }
                    println!();
                    continue;
                }

                if trimmed == "/news" {
                    match backend.news().await {
                        Ok(articles) if articles.is_empty() => {
                            println!("{}", "No headlines right now.".bright_black())
                        }
                        Ok(articles) => {
                            for article in articles.iter().take(10) {
                                println!("{} {}", "•".bright_blue(), article.title.bold());
                                println!("  {}", article.url.bright_cyan().underline());
                            }
                        }
                        Err(e) => println!("{}", format!("Failed to fetch news: {e}").red()),
                    }
                    println!();
                    continue;
                }

                println!("{}", "CyberSaathi is typing...".bright_black().italic());

                match controller.submit(trimmed).await {
                    TurnOutcome::Rejected(RejectReason::TurnInFlight) => {
                        println!("{}", "Still working on the previous message...".yellow());
                    }
                    TurnOutcome::Rejected(RejectReason::EmptyInput) => {}
                    _ => {
                        rendered = print_new_messages(&controller, rendered);
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    probe.abort();

    Ok(())
}
