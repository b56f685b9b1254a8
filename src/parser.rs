use memchr::memchr;

use crate::error::ParseError;
use crate::message::util::TokensExt;
use crate::message::{Args, Message};

#[inline(always)]
fn split_at_byte(s: &str, byte: u8) -> Option<(&str, &str)> {
    memchr(byte, s.as_bytes()).map(|i| (&s[..i], &s[i + 1..]))
}

/// Split at `byte` only when it does not start the string.
#[inline(always)]
fn split_after_start(s: &str, byte: u8) -> Option<(&str, &str)> {
    split_at_byte(s, byte).filter(|(before, _)| !before.is_empty())
}

#[inline(always)]
fn owned(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn parse_prefix(prefix: &str, msg: &mut Message) {
    if let Some((nick, userhost)) = split_after_start(prefix, b'!') {
        msg.nick = owned(nick);
        match split_after_start(userhost, b'@') {
            Some((user, host)) => {
                msg.user = owned(user);
                msg.host = owned(host);
            }
            None => msg.user = owned(userhost),
        }
    } else if let Some((nick, host)) = split_after_start(prefix, b'@') {
        msg.nick = owned(nick);
        msg.host = owned(host);
    } else {
        msg.server = owned(prefix);
        msg.nick = owned(prefix);
    }
}

/// Split the argument segment into middle arguments and an optional trailing
/// one. Everything from the token holding the first `:` onwards is kept as a
/// single argument, spaces included.
fn parse_args(segment: &str) -> Args {
    let mut args = Args::new();

    match memchr(b':', segment.as_bytes()) {
        Some(i) => {
            let before = &segment[..i];
            let mut leading = before.tokens().count();
            // A token running into the ':' belongs to the final argument.
            if before.ends_with(|c: char| !c.is_whitespace()) {
                leading -= 1;
            }
            let mut tokens = segment.tokens();
            args.extend(tokens.by_ref().take(leading).map(str::to_string));

            let trailing = tokens.remainder();
            if !trailing.is_empty() {
                args.push(trailing.to_string());
            }
        }
        None => args.extend(segment.tokens().map(str::to_string)),
    }

    args
}

/// Parse one raw line (with or without its terminator) into a [`Message`].
///
/// ```text
/// [ ':' prefix ' ' ] command [ ' ' args ]
/// prefix := server | nick [ '!' user ] [ '@' host ]
/// ```
///
/// Commands are not validated beyond being non-empty.
pub fn parse(raw: &str) -> Result<Message, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    let (prefix, rest) = match raw.strip_prefix(':') {
        Some(stripped) => match split_at_byte(stripped, b' ') {
            Some((prefix, rest)) => (Some(prefix), rest),
            None => return Err(ParseError::MissingCommand(raw.to_string())),
        },
        None => (None, raw),
    };

    let mut tokens = rest.tokens();
    let command = match tokens.next() {
        Some(command) => command,
        None => return Err(ParseError::MissingCommand(raw.to_string())),
    };
    let segment = tokens.remainder();

    let mut msg = Message::new(command).with_raw(raw);

    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        parse_prefix(prefix, &mut msg);
    }

    if !segment.is_empty() {
        msg.args = parse_args(segment);
    }

    Ok(msg)
}
