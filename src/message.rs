use std::fmt::{Debug, Display, Formatter, Result as FResult};
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::ParseError;

pub(crate) mod util;

/// Arguments of a message, in wire order.
pub type Args = SmallVec<[String; 4]>;

/// One IRC line.
///
/// Only `command` is required. A prefix is either a server name or a
/// `nick[!user][@host]` client; a single token prefix cannot be told apart
/// and is stored as both `server` and `nick`, leaving the choice to the
/// caller.
///
/// A trailing argument keeps its leading `:` and is written back verbatim.
/// When building a message by hand, a final argument containing spaces must
/// carry the `:` itself.
#[derive(Clone, Default)]
pub struct Message {
    pub command: String,
    pub server: Option<String>,
    pub nick: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub args: Args,
    raw: Option<String>,
}

#[inline(always)]
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl Message {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Parse a message from a raw line.
    /// Example:
    /// ```
    /// use irc_line::Message;
    ///
    /// let msg = Message::parse(":irc.example.com 001 test :Welcome to the Internet Relay Network").unwrap();
    /// assert_eq!(msg.command, "001");
    /// assert_eq!(msg.server.as_deref(), Some("irc.example.com"));
    /// assert_eq!(msg.args[..], ["test", ":Welcome to the Internet Relay Network"]);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        crate::parser::parse(raw)
    }

    pub(crate) fn with_raw(mut self, raw: &str) -> Self {
        self.raw = Some(raw.to_string());
        self
    }

    /// The trimmed line this message was parsed from, if any.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = Some(nick.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.command == other.command
            && self.server == other.server
            && self.nick == other.nick
            && self.user == other.user
            && self.host == other.host
            && self.args == other.args
    }
}

impl Eq for Message {}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Serializes the message without the line terminator. The output is not
/// guaranteed to equal the parsed input byte for byte: whitespace is
/// normalized and an ambiguous prefix is written once, as a server.
impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        if let Some(server) = non_empty(&self.server) {
            write!(f, ":{} ", server)?;
        } else if let Some(nick) = non_empty(&self.nick) {
            write!(f, ":{}", nick)?;
            if let Some(user) = non_empty(&self.user) {
                write!(f, "!{}", user)?;
            }
            if let Some(host) = non_empty(&self.host) {
                write!(f, "@{}", host)?;
            }
            f.write_str(" ")?;
        }

        f.write_str(&self.command)?;

        let mut args = self.args.iter();
        if let Some(first) = args.next() {
            write!(f, " {}", first)?;
            for arg in args {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

impl Debug for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        let mut debug_struct = f.debug_struct("Message");

        debug_struct.field("command", &self.command);

        if let Some(server) = &self.server {
            debug_struct.field("server", server);
        }

        if let Some(nick) = &self.nick {
            debug_struct.field("nick", nick);
        }

        if let Some(user) = &self.user {
            debug_struct.field("user", user);
        }

        if let Some(host) = &self.host {
            debug_struct.field("host", host);
        }

        if !self.args.is_empty() {
            debug_struct.field("args", &self.args);
        }

        debug_struct.finish()
    }
}
