use tt_core::{Hashtag, HashtagValidator, TAG_MARKER};
use tt_proto::Request;

use thiserror::Error;

pub const USAGE: &str = "Available commands:
  1. tweet \"<150 char max tweet>\" <#hashtag...>
  2. subscribe <#hashtag>
  3. unsubscribe <#hashtag>
  4. timeline
  5. exit";

const QUOTE: char = '"';

/// A line of user input that was rejected before anything was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One validated REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Tweet { body: String, hashtags: Vec<Hashtag> },
    Subscribe(Hashtag),
    Unsubscribe(Hashtag),
    Timeline,
    Exit,
}

impl ClientCommand {
    /// Parse and validate one input line (trailing newline allowed).
    pub fn parse(line: &str, validator: &HashtagValidator) -> Result<Self, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (name, rest) = match line.split_once(' ') {
            Some((name, rest)) => (name, Some(rest)),
            None => (line, None),
        };

        match (name, rest) {
            ("tweet", Some(rest)) => Self::parse_tweet(rest, validator),
            ("subscribe", Some(rest)) => {
                Self::parse_target(rest, validator).map(Self::Subscribe)
            }
            ("unsubscribe", Some(rest)) => {
                Self::parse_target(rest, validator).map(Self::Unsubscribe)
            }
            ("timeline", None) => Ok(Self::Timeline),
            ("exit", None) => Ok(Self::Exit),
            ("tweet" | "subscribe" | "unsubscribe" | "timeline" | "exit", _) => Err(
                CommandError::new(format!("{name} command not formatted correctly")),
            ),
            _ => Err(CommandError::new(format!(
                "Command not recognized.\n{USAGE}"
            ))),
        }
    }

    /// Wire request for this command.
    pub fn to_request(&self) -> Request {
        match self {
            Self::Tweet { body, hashtags } => Request::Tweet {
                body: body.clone(),
                hashtags: hashtags.iter().map(|tag| String::from(tag.as_str())).collect(),
            },
            Self::Subscribe(tag) => Request::Subscribe {
                hashtag: tag.marked(),
            },
            Self::Unsubscribe(tag) => Request::Unsubscribe {
                hashtag: tag.marked(),
            },
            Self::Timeline => Request::Timeline,
            Self::Exit => Request::Exit,
        }
    }

    /// `"<message>" <#tags>`
    fn parse_tweet(rest: &str, validator: &HashtagValidator) -> Result<Self, CommandError> {
        let malformed = || CommandError::new("tweet command not formatted correctly");

        let quoted = rest.strip_prefix(QUOTE).ok_or_else(malformed)?;
        let (body, tail) = quoted.split_once(QUOTE).ok_or_else(malformed)?;

        validator
            .validate_body(body)
            .map_err(|e| CommandError::new(format!("Invalid tweet: {}", e.reason())))?;

        let raw_tags = tail.strip_prefix(' ').ok_or_else(malformed)?;
        if raw_tags.chars().any(char::is_whitespace) {
            return Err(CommandError::new(
                "Invalid hashtag(s)! Hashtags cannot contain whitespace",
            ));
        }

        let hashtags = validator
            .validate(raw_tags)
            .map_err(|e| CommandError::new(format!("Invalid hashtag(s)! {}", e.reason())))?;

        Ok(Self::Tweet {
            body: String::from(body),
            hashtags,
        })
    }

    /// A single `#tag`; `#ALL` is accepted.
    fn parse_target(rest: &str, validator: &HashtagValidator) -> Result<Hashtag, CommandError> {
        if !rest.starts_with(TAG_MARKER) {
            return Err(CommandError::new(
                "Invalid hashtag(s)! Hashtag must begin with #",
            ));
        }
        if rest.chars().any(char::is_whitespace) {
            return Err(CommandError::new(
                "Subscribe/Unsubscribe only accepts one hashtag as the argument",
            ));
        }

        validator
            .validate_subscription(rest)
            .map_err(|e| CommandError::new(format!("Invalid hashtag(s)! {}", e.reason())))
    }
}
