//! The `shell` module drives a `Registry` from line-oriented text commands.
//!
//! It backs the `pollsub` binary: every input line is parsed into a
//! [`Command`], applied to the registry, and answered with one [`Reply`].
//! Invalid commands and unknown subscriptions are answered with an `error:`
//! line and the session carries on.

pub mod command;

use std::fmt;
use std::io::BufRead;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::broker::Registry;
pub use command::{Command, CommandError, HELP};

/// Per-topic line of the `topics` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub name: String,
    pub subscribers: usize,
    pub retained: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Messages(Vec<String>),
    Count(usize),
    Topics(Vec<TopicSummary>),
    Help,
    Quit,
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str("ok"),
            Reply::Messages(messages) => {
                let json = serde_json::to_string(messages).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Reply::Count(count) => write!(f, "{count}"),
            Reply::Topics(topics) if topics.is_empty() => f.write_str("(none)"),
            Reply::Topics(topics) => {
                for (i, t) in topics.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "{} subscribers={} retained={}",
                        t.name, t.subscribers, t.retained
                    )?;
                }
                Ok(())
            }
            Reply::Help => f.write_str(HELP),
            Reply::Quit => f.write_str("bye"),
            Reply::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// Apply one command to `registry`.
pub fn execute(registry: &mut Registry, command: Command) -> Reply {
    match command {
        Command::Subscribe { topic, subscriber } => {
            registry.subscribe(&topic, subscriber);
            Reply::Ok
        }
        Command::Unsubscribe { topic, subscriber } => {
            registry.unsubscribe(&topic, &subscriber);
            Reply::Ok
        }
        Command::Publish { topic, payload } => {
            registry.publish(&topic, payload);
            Reply::Ok
        }
        Command::Poll { topic, subscriber } => match registry.poll(&topic, &subscriber) {
            Ok(messages) => Reply::Messages(messages),
            Err(e) => Reply::Error(e.to_string()),
        },
        Command::Pending { topic, subscriber } => match registry.pending(&topic, &subscriber) {
            Ok(count) => Reply::Count(count),
            Err(e) => Reply::Error(e.to_string()),
        },
        Command::Drop { subscriber } => Reply::Count(registry.remove_subscriber(&subscriber)),
        Command::Topics => Reply::Topics(
            registry
                .topic_names()
                .into_iter()
                .map(|name| TopicSummary {
                    name: name.to_string(),
                    subscribers: registry.subscriber_count(name),
                    retained: registry.retained_messages(name),
                })
                .collect(),
        ),
        Command::Help => Reply::Help,
        Command::Quit => Reply::Quit,
    }
}

/// Parse and apply one input line. Blank lines and `#` comments yield no
/// reply.
pub fn handle_line(registry: &mut Registry, line: &str) -> Option<Reply> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let reply = match line.parse::<Command>() {
        Ok(command) => {
            debug!(?command, "executing");
            execute(registry, command)
        }
        Err(err) => {
            warn!("Invalid command: {err} | {line}");
            Reply::Error(err.to_string())
        }
    };
    Some(reply)
}

async fn write_reply<W>(output: &mut W, reply: &Reply) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(format!("{reply}\n").as_bytes()).await?;
    output.flush().await
}

/// Read commands from `input` until EOF or `quit`, writing one reply per
/// command to `output`.
pub async fn run<R, W>(registry: &mut Registry, input: R, output: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = handle_line(registry, &line) else {
            continue;
        };
        write_reply(output, &reply).await?;
        if reply == Reply::Quit {
            break;
        }
    }

    Ok(())
}

/// Same as [`run`], but takes lines from a channel. Ends when every sender
/// is dropped or on `quit`.
pub async fn run_lines<W>(
    registry: &mut Registry,
    lines: &mut mpsc::Receiver<String>,
    output: &mut W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = lines.recv().await {
        let Some(reply) = handle_line(registry, &line) else {
            continue;
        };
        write_reply(output, &reply).await?;
        if reply == Reply::Quit {
            break;
        }
    }

    Ok(())
}

/// Read stdin line by line on a dedicated OS thread and forward each line.
///
/// A blocked read on this thread does not hold up runtime shutdown, so an
/// interactive session can end on Ctrl-C while the terminal is idle.
pub fn spawn_stdin_reader(buffer: usize) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(buffer);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read stdin: {e}");
                    break;
                }
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        debug!("stdin reader finished");
    });

    rx
}

#[cfg(test)]
mod tests;
