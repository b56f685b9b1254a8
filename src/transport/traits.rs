use crate::error::{ReadError, WriteError};
use crate::message::Message;

/// Anything that yields messages. `Ok(None)` means the peer went away.
#[allow(async_fn_in_trait)]
pub trait MessageReader {
    async fn read_message(&mut self) -> Result<Option<Message>, ReadError>;
}

/// Anything that accepts messages.
#[allow(async_fn_in_trait)]
pub trait MessageWriter {
    async fn write_message(&mut self, message: &Message) -> Result<(), WriteError>;
}

pub trait MessageReadWriter: MessageReader + MessageWriter {}

impl<T> MessageReadWriter for T where T: MessageReader + MessageWriter {}
