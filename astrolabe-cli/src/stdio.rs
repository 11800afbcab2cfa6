use crate::report::{default_result_path, render_outcome, separator};
use astrolabe_core::agent::{Agent, AgentOutcome};
use astrolabe_core::model::ModelProvider;
use chrono::Local;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Quit,
    Save(Option<PathBuf>),
    Unknown(String),
}

enum LoopControl {
    Continue,
    Exit,
}

#[derive(Default)]
struct Session {
    last_outcome: Option<AgentOutcome>,
}

pub async fn run<P: ModelProvider>(agent: &Agent<P>) -> Result<(), StdioError> {
    let mut stdout = io::stdout();
    let stdin = BufReader::new(io::stdin());
    let mut lines = stdin.lines();
    let mut session = Session::default();

    print_banner(&mut stdout).await?;
    print_help(&mut stdout).await?;

    loop {
        prompt(&mut stdout).await?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                write_line(&mut stdout, "\nInput closed. Leaving interactive mode.").await?;
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = parse_command(input) {
            match handle_command(command, &session, &mut stdout).await? {
                LoopControl::Continue => continue,
                LoopControl::Exit => break,
            }
        } else {
            handle_prompt(agent, &mut session, input, &mut stdout).await?;
        }
    }

    stdout.flush().await?;
    Ok(())
}

/// Slash commands, plus bare `quit` / `exit`.
fn parse_command(input: &str) -> Option<Command> {
    if matches!(input.to_ascii_lowercase().as_str(), "quit" | "exit") {
        return Some(Command::Quit);
    }

    let command = input.strip_prefix('/')?;
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or("").to_ascii_lowercase();
    let rest: Vec<&str> = parts.collect();

    Some(match name.as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "save" => {
            let path = rest.join(" ");
            let path = path.trim();
            Command::Save(if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(shellexpand::tilde(path).into_owned()))
            })
        }
        other => Command::Unknown(other.to_string()),
    })
}

async fn handle_command(
    command: Command,
    session: &Session,
    stdout: &mut io::Stdout,
) -> Result<LoopControl, StdioError> {
    debug!(?command, "Processing interactive command");

    match command {
        Command::Help => {
            print_help(stdout).await?;
            Ok(LoopControl::Continue)
        }
        Command::Quit => {
            write_line(stdout, "Goodbye!").await?;
            Ok(LoopControl::Exit)
        }
        Command::Save(path) => {
            let Some(outcome) = session.last_outcome.as_ref() else {
                write_line(stdout, "Nothing to save yet. Ask a question first.").await?;
                return Ok(LoopControl::Continue);
            };
            let path = path.unwrap_or_else(|| default_result_path(Local::now()));
            match outcome.save(&path) {
                Ok(()) => {
                    info!(path = %path.display(), "Saved agent result");
                    write_line(stdout, &format!("Result saved to {}", path.display())).await?;
                }
                Err(err) => {
                    warn!(error = %err, "Failed to save agent result");
                    write_line(stdout, &format!("Could not save result: {err}")).await?;
                }
            }
            Ok(LoopControl::Continue)
        }
        Command::Unknown(name) => {
            write_line(
                stdout,
                &format!("Unknown command '/{name}'. Type /help for the list of commands."),
            )
            .await?;
            Ok(LoopControl::Continue)
        }
    }
}

async fn handle_prompt<P: ModelProvider>(
    agent: &Agent<P>,
    session: &mut Session,
    input: &str,
    stdout: &mut io::Stdout,
) -> Result<(), StdioError> {
    write_line(stdout, &format!("\nProcessing: {input}\nPlease wait...")).await?;

    let interrupted = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Unable to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        outcome = agent.run(input) => {
            write_line(stdout, &render_outcome(&outcome)).await?;
            session.last_outcome = Some(outcome);
        }
        _ = interrupted => {
            info!("Agent run interrupted by user");
            write_line(stdout, "\nRun interrupted.").await?;
        }
    }

    Ok(())
}

async fn print_banner(stdout: &mut io::Stdout) -> Result<(), StdioError> {
    write_line(stdout, &separator()).await?;
    write_line(stdout, "ASTROLABE SEARCH AGENT - INTERACTIVE MODE").await?;
    write_line(stdout, &separator()).await
}

async fn print_help(stdout: &mut io::Stdout) -> Result<(), StdioError> {
    let lines = [
        "Type a question to search the web and get an answer.",
        "Commands:",
        "  /help           show this message",
        "  /save [path]    write the last result as JSON",
        "  /quit           leave interactive mode",
        "Press Ctrl-C while a question is running to cancel it.",
        "Example questions:",
        "  - Thời tiết Hà Nội hôm nay như thế nào?",
        "  - Search for recent news about artificial intelligence",
        "",
    ];
    for line in lines {
        write_line(stdout, line).await?;
    }
    Ok(())
}

async fn prompt(stdout: &mut io::Stdout) -> Result<(), StdioError> {
    stdout.write_all(b"Your question> ").await?;
    stdout.flush().await?;
    Ok(())
}

async fn write_line(stdout: &mut io::Stdout, line: &str) -> Result<(), StdioError> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_are_not_commands() {
        assert_eq!(parse_command("weather in Hanoi?"), None);
    }

    #[test]
    fn recognises_commands() {
        assert_eq!(parse_command("/help"), Some(Command::Help));
        assert_eq!(parse_command("/?"), Some(Command::Help));
        assert_eq!(parse_command("/QUIT"), Some(Command::Quit));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
        assert_eq!(parse_command("/save"), Some(Command::Save(None)));
        assert_eq!(
            parse_command("/save out/result.json"),
            Some(Command::Save(Some(PathBuf::from("out/result.json"))))
        );
        assert_eq!(
            parse_command("/reload"),
            Some(Command::Unknown("reload".into()))
        );
    }
}
