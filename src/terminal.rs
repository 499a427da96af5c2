//! Terminal front end — a stdin/stdout presentation layer for the wizard.
//!
//! Lines typed by the user become [`WizardEvent`]s; after each event the
//! current [`WizardView`] is rendered back.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::brief::{Availability, Field, FieldKind, Plan};
use crate::wizard::{EmbedStatus, WizardController, WizardEvent, WizardStep, WizardView};

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(WizardEvent),
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one line of terminal input.
///
/// Navigation words (`next`, `back`, `submit`, ...) are commands; anything
/// of the form `field = value` or `field: value` edits a field.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "next" | "n" | "/next" => return Command::Event(WizardEvent::Advance),
        "back" | "b" | "/back" => return Command::Event(WizardEvent::Retreat),
        "submit" | "/submit" => return Command::Event(WizardEvent::Submit),
        "ready" | "/ready" => return Command::Event(WizardEvent::SchedulerReady),
        "show" | "/show" | "" => return Command::Show,
        "help" | "/help" | "?" => return Command::Help,
        "quit" | "/quit" | "exit" | "/exit" => return Command::Quit,
        _ => {}
    }

    let Some((key, value)) = trimmed.split_once(['=', ':']) else {
        return Command::Unknown(trimmed.to_string());
    };
    match key.parse::<Field>() {
        Ok(field) => Command::Event(WizardEvent::Edit {
            field,
            value: value.trim().to_string(),
        }),
        Err(()) => Command::Unknown(trimmed.to_string()),
    }
}

/// Render a view as plain text.
pub fn render(view: &WizardView) -> String {
    let mut out = format!(
        "── Step {}/{}: {} ──\n",
        view.step_index + 1,
        view.step_count,
        view.title
    );

    for f in &view.fields {
        let marker = if f.missing { "*" } else { " " };
        let hint = match f.field.kind() {
            FieldKind::Choice => format!(" [{}]", choices(f.field)),
            FieldKind::Flag => " [yes/no]".to_string(),
            FieldKind::Text => String::new(),
        };
        out.push_str(&format!(
            "{marker} {:<16} {:<24} {}{hint}\n",
            f.field.key(),
            f.label,
            f.value
        ));
    }

    if view.step == WizardStep::Confirm {
        if let Some(mode) = view.mode {
            out.push_str(&format!("Brief received ({mode}).\n"));
        }
        if let Some(scheduling) = &view.scheduling {
            let state = match scheduling.status {
                EmbedStatus::Loading => "loading…",
                EmbedStatus::Ready => "ready",
                EmbedStatus::Hidden => "hidden",
            };
            out.push_str(&format!("Book your kickoff: {} ({state})\n", scheduling.url));
        }
    }

    if view.submitting {
        out.push_str("Submitting…\n");
    }
    if let Some(message) = &view.message {
        out.push_str(&format!("! {message}\n"));
    }

    let mut actions = Vec::new();
    if view.can_retreat {
        actions.push("back");
    }
    if view.can_advance {
        actions.push("next");
    }
    if view.can_submit {
        actions.push("submit");
    }
    if !actions.is_empty() {
        out.push_str(&format!("({})\n", actions.join(" | ")));
    }
    out
}

fn choices(field: Field) -> String {
    let values: Vec<&str> = match field {
        Field::Availability => Availability::ALL.iter().map(|a| a.as_str()).collect(),
        Field::Plan => Plan::ALL.iter().map(|p| p.as_str()).collect(),
        _ => Vec::new(),
    };
    values.join("/")
}

const HELP: &str = "\
Edit a field with `field = value` (e.g. `name = Jane Founder`).
Commands: next, back, submit, show, help, quit.
Fields marked * are required.";

/// Run the wizard against stdin/stdout until the user quits or input ends.
pub async fn run(controller: Arc<WizardController>) -> std::io::Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    println!("{HELP}\n");
    println!("{}", render(&controller.view().await));
    eprint!("> ");

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show => println!("{}", render(&controller.view().await)),
            Command::Unknown(input) => println!("Unknown input: {input:?} (type `help`)"),
            Command::Event(event) => {
                let submitted = event == WizardEvent::Submit;
                // Failures are already recorded on the view's message.
                if let Err(e) = controller.handle(event).await {
                    tracing::debug!(error = %e, "Wizard event rejected");
                }
                let view = controller.view().await;
                if submitted && view.step.is_terminal() {
                    // The link is printed right away, so it is as loaded as
                    // it will ever be in a terminal.
                    println!("{}", render(&view));
                    controller.scheduler_ready().await;
                }
                println!("{}", render(&controller.view().await));
            }
        }
        eprint!("> ");
    }
    Ok(())
}
