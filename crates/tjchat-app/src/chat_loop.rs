//! Interactive chat loop over stdin/stdout.

use std::io::Write;

use tjchat_ai::{ChatSession, CompletionClient, Message, Role};
use tjchat_common::TjchatError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

const HELP: &str = "Commands:
  - 'quit': Exit the chat
  - 'clear': Clear chat history
  - 'history': Show chat history
  - 'temperature <0.0-1.0>': Set the sampling temperature
  - 'max_tokens <n>': Set the reply length limit
  - 'help': Show this help message";

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Finished,
    Interrupted,
}

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReplCommand {
    Empty,
    Quit,
    Clear,
    History,
    Help,
    Temperature(f64),
    MaxTokens(u32),
    /// A recognised command with a bad argument; carries the usage text.
    Invalid(&'static str),
    Message(String),
}

pub(crate) fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }

    match line.to_lowercase().as_str() {
        "quit" => return ReplCommand::Quit,
        "clear" => return ReplCommand::Clear,
        "history" => return ReplCommand::History,
        "help" => return ReplCommand::Help,
        _ => {}
    }

    // Parameter commands are exactly two words; longer lines are chat text.
    let words: Vec<&str> = line.split_whitespace().collect();
    if let [keyword, value] = words.as_slice() {
        match keyword.to_lowercase().as_str() {
            "temperature" => {
                return match value.parse::<f64>() {
                    Ok(t) if (0.0..=1.0).contains(&t) => ReplCommand::Temperature(t),
                    _ => ReplCommand::Invalid("usage: temperature <0.0-1.0>"),
                };
            }
            "max_tokens" => {
                return match value.parse::<u32>() {
                    Ok(n) if n > 0 => ReplCommand::MaxTokens(n),
                    _ => ReplCommand::Invalid("usage: max_tokens <positive integer>"),
                };
            }
            _ => {}
        }
    }

    ReplCommand::Message(line.to_string())
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::System => "System",
        Role::User => "User",
        Role::Assistant => "Assistant",
        Role::Function => "Function",
    }
}

pub(crate) fn format_history(session: &ChatSession) -> String {
    let mut out = String::from("\n=== Chat History ===\n");
    for message in session.messages() {
        out.push_str(&format!(
            "\n{}: {}\n",
            role_label(message.role),
            message.content
        ));
    }
    out.push_str("\n===================");
    out
}

fn seed(session: &mut ChatSession, system_prompt: &str) {
    if !system_prompt.is_empty() {
        session.push(Message::system(system_prompt));
    }
}

/// Run the loop until `quit`, end of input, or Ctrl-C.
///
/// The session is seeded with `system_prompt` at the start and again after
/// every `clear`. A failed exchange is reported and the loop continues.
pub(crate) async fn run<R, W>(
    client: &dyn CompletionClient,
    mut session: ChatSession,
    system_prompt: &str,
    input: R,
    out: &mut W,
) -> Result<Outcome, TjchatError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    seed(&mut session, system_prompt);
    let mut lines = input.lines();

    writeln!(
        out,
        "\nWelcome to the AI Chat! Type your message and press Enter to chat."
    )?;
    writeln!(out, "{HELP}")?;

    loop {
        write!(out, "\nYou: ")?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => return interrupted(out),
        };
        let Some(line) = line else {
            writeln!(out, "\nGoodbye!")?;
            return Ok(Outcome::Finished);
        };

        match parse_command(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Quit => {
                writeln!(out, "\nGoodbye!")?;
                return Ok(Outcome::Finished);
            }
            ReplCommand::Clear => {
                session.clear();
                seed(&mut session, system_prompt);
                writeln!(out, "\nChat history cleared.")?;
            }
            ReplCommand::History => writeln!(out, "{}", format_history(&session))?,
            ReplCommand::Help => writeln!(out, "\nAvailable {HELP}")?,
            ReplCommand::Temperature(t) => {
                session.set_temperature(t);
                info!(temperature = t, "temperature changed");
                writeln!(out, "\nTemperature set to {t}.")?;
            }
            ReplCommand::MaxTokens(n) => {
                session.set_max_tokens(n);
                info!(max_tokens = n, "max_tokens changed");
                writeln!(out, "\nMax tokens set to {n}.")?;
            }
            ReplCommand::Invalid(usage) => writeln!(out, "\n{usage}")?,
            ReplCommand::Message(text) => {
                writeln!(out, "\nAssistant is thinking...")?;
                out.flush()?;

                let result = tokio::select! {
                    result = session.chat(client, text) => result,
                    _ = tokio::signal::ctrl_c() => return interrupted(out),
                };

                match result {
                    Ok(reply) => writeln!(out, "\nAssistant: {reply}")?,
                    Err(e) => {
                        writeln!(out, "\nError: {e}")?;
                        writeln!(out, "Please try again or type 'quit' to exit.")?;
                    }
                }
            }
        }
    }
}

fn interrupted<W: Write>(out: &mut W) -> Result<Outcome, TjchatError> {
    writeln!(out, "\n\nGoodbye!")?;
    Ok(Outcome::Interrupted)
}
