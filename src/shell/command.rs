//! Shell command grammar
//!
//! One command per line, arguments separated by whitespace. `publish` takes
//! the rest of the line as its payload, so payloads may contain spaces.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Subscribe { topic: String, subscriber: String },
    Unsubscribe { topic: String, subscriber: String },
    Publish { topic: String, payload: String },
    Poll { topic: String, subscriber: String },
    Pending { topic: String, subscriber: String },
    Drop { subscriber: String },
    Topics,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("{command}: missing <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("{command}: unexpected argument '{argument}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },
}

/// Split off the first whitespace-delimited word of `input`.
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

struct Args<'a> {
    command: &'static str,
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn new(command: &'static str, rest: &'a str) -> Self {
        Self { command, rest }
    }

    fn word(&mut self, argument: &'static str) -> Result<String, CommandError> {
        let (word, rest) = next_word(self.rest).ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })?;
        self.rest = rest;
        Ok(word.to_string())
    }

    /// `<topic> <subscriber>` and nothing else.
    fn topic_and_subscriber(mut self) -> Result<(String, String), CommandError> {
        let topic = self.word("topic")?;
        let subscriber = self.word("subscriber")?;
        self.finish()?;
        Ok((topic, subscriber))
    }

    fn remainder(self, argument: &'static str) -> Result<String, CommandError> {
        let rest = self.rest.trim();
        if rest.is_empty() {
            return Err(CommandError::MissingArgument {
                command: self.command,
                argument,
            });
        }
        Ok(rest.to_string())
    }

    fn finish(self) -> Result<(), CommandError> {
        match next_word(self.rest) {
            Some((extra, _)) => Err(CommandError::UnexpectedArgument {
                command: self.command,
                argument: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = next_word(line).ok_or(CommandError::Empty)?;

        match name.to_lowercase().as_str() {
            "subscribe" => {
                let (topic, subscriber) = Args::new("subscribe", rest).topic_and_subscriber()?;
                Ok(Command::Subscribe { topic, subscriber })
            }
            "unsubscribe" => {
                let (topic, subscriber) = Args::new("unsubscribe", rest).topic_and_subscriber()?;
                Ok(Command::Unsubscribe { topic, subscriber })
            }
            "poll" => {
                let (topic, subscriber) = Args::new("poll", rest).topic_and_subscriber()?;
                Ok(Command::Poll { topic, subscriber })
            }
            "pending" => {
                let (topic, subscriber) = Args::new("pending", rest).topic_and_subscriber()?;
                Ok(Command::Pending { topic, subscriber })
            }
            "publish" => {
                let mut args = Args::new("publish", rest);
                let topic = args.word("topic")?;
                let payload = args.remainder("payload")?;
                Ok(Command::Publish { topic, payload })
            }
            "drop" => {
                let mut args = Args::new("drop", rest);
                let subscriber = args.word("subscriber")?;
                args.finish()?;
                Ok(Command::Drop { subscriber })
            }
            "topics" => Args::new("topics", rest).finish().map(|()| Command::Topics),
            "help" => Args::new("help", rest).finish().map(|()| Command::Help),
            "quit" => Args::new("quit", rest).finish().map(|()| Command::Quit),
            "exit" => Args::new("exit", rest).finish().map(|()| Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

pub const HELP: &str = "\
commands:
  subscribe <topic> <subscriber>
  unsubscribe <topic> <subscriber>
  publish <topic> <payload...>
  poll <topic> <subscriber>
  pending <topic> <subscriber>
  drop <subscriber>
  topics
  help
  quit | exit";
