//! IRC line codec plus a small framed transport.
//!
//! ```
//! use irc_line::Message;
//!
//! let msg: Message = ":johns!John@localhost PRIVMSG #rust :hi there".parse().unwrap();
//! assert_eq!(msg.nick.as_deref(), Some("johns"));
//! assert_eq!(msg.args[..], ["#rust", ":hi there"]);
//! assert_eq!(msg.to_string(), ":johns!John@localhost PRIVMSG #rust :hi there");
//! ```

pub mod error;
pub mod message;
mod parser;
pub mod transport;

pub use error::{ConnectionError, ParseError, ReadError, WriteError};
pub use message::{Args, Message};
pub use parser::parse;
pub use transport::traits::{MessageReadWriter, MessageReader, MessageWriter};
pub use transport::{connect, LineReader, LineWriter, TcpTransport, Transport};

/// Serialize a message into a wire line, without the `\r\n` terminator.
pub fn serialize(message: &Message) -> String {
    message.to_string()
}
