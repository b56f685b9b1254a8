use futures::Stream;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf, WriteHalf,
};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, trace};

use crate::error::{ConnectionError, ReadError, WriteError};
use crate::message::Message;
use crate::parser;

pub mod traits;

use traits::{MessageReader, MessageWriter};

const READ_CAPACITY: usize = 512;

/// Reading half: frames lines on `\n` and parses them.
pub struct LineReader<R> {
    inner: BufReader<R>,
    buf: Vec<u8>,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(source: R) -> Self {
        Self {
            inner: BufReader::with_capacity(READ_CAPACITY, source),
            buf: Vec::with_capacity(READ_CAPACITY),
        }
    }

    /// Wait for the next complete line and parse it.
    ///
    /// Returns `Ok(None)` once the stream is closed. Bytes after the last
    /// newline are dropped at that point, a truncated line is never parsed.
    ///
    /// A blank line, as some peers send for keep-alive, comes back as
    /// [`ReadError::Malformed`] with [`ParseError::Empty`] and can be skipped;
    /// the reader stays usable.
    ///
    /// [`ParseError::Empty`]: crate::ParseError::Empty
    pub async fn read_message(&mut self) -> Result<Option<Message>, ReadError> {
        self.buf.clear();
        let n = self.inner.read_until(b'\n', &mut self.buf).await?;

        if n == 0 {
            debug!("connection closed");
            return Ok(None);
        }
        if self.buf.last() != Some(&b'\n') {
            debug!(bytes = n, "connection closed mid-line, discarding partial line");
            return Ok(None);
        }

        let line = std::str::from_utf8(&self.buf)?;
        trace!(line = line.trim_end(), "read");

        match parser::parse(line) {
            Ok(msg) => Ok(Some(msg)),
            Err(source) => Err(ReadError::Malformed {
                line: line.trim_end().to_string(),
                source,
            }),
        }
    }

    /// Turn the reader into a stream of messages that ends at EOF.
    ///
    /// Malformed and non UTF-8 lines are yielded as errors and reading goes
    /// on; an I/O error is yielded once and ends the stream.
    pub fn messages(self) -> impl Stream<Item = Result<Message, ReadError>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut reader = match state {
                Some(reader) => reader,
                None => return None,
            };
            match reader.read_message().await {
                Ok(Some(msg)) => Some((Ok(msg), Some(reader))),
                Ok(None) => None,
                Err(e @ ReadError::Io(_)) => Some((Err(e), None)),
                Err(e) => Some((Err(e), Some(reader))),
            }
        })
    }
}

/// Writing half: serializes, terminates with `\r\n` and flushes every message.
///
/// Each line goes straight to the sink in one `write_all`, nothing is kept
/// between calls, so a failed write never leaks bytes into the next line.
pub struct LineWriter<W> {
    inner: W,
}

impl<W> LineWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(sink: W) -> Self {
        Self { inner: sink }
    }

    pub async fn write_message(&mut self, message: &Message) -> Result<(), WriteError> {
        let line = format!("{}\r\n", message);
        trace!(line = line.trim_end(), "write");
        self.inner.write_all(line.as_bytes()).await?;
        self.inner.flush().await?;
        Ok(())
    }
}

/// A duplex message connection.
///
/// Calls on the same direction must not overlap. Reading and writing only
/// touch their own half, so [`Transport::into_split`] lets both run on
/// separate tasks.
pub struct Transport<R, W> {
    reader: LineReader<R>,
    writer: LineWriter<W>,
}

pub type TcpTransport = Transport<OwnedReadHalf, OwnedWriteHalf>;

impl<R, W> Transport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: LineReader::new(reader),
            writer: LineWriter::new(writer),
        }
    }

    pub async fn read_message(&mut self) -> Result<Option<Message>, ReadError> {
        self.reader.read_message().await
    }

    pub async fn write_message(&mut self, message: &Message) -> Result<(), WriteError> {
        self.writer.write_message(message).await
    }

    pub fn into_split(self) -> (LineReader<R>, LineWriter<W>) {
        (self.reader, self.writer)
    }
}

impl<S> Transport<ReadHalf<S>, WriteHalf<S>>
where
    S: AsyncRead + AsyncWrite,
{
    pub fn from_stream(stream: S) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self::new(reader, writer)
    }
}

/// Open a TCP connection to `address` (`host:port`).
pub async fn connect(address: &str) -> Result<TcpTransport, ConnectionError> {
    let stream = TcpStream::connect(address)
        .await
        .map_err(|source| ConnectionError {
            address: address.to_string(),
            source,
        })?;
    debug!(address, "connected");

    let (reader, writer) = stream.into_split();
    Ok(Transport::new(reader, writer))
}

impl<R> MessageReader for LineReader<R>
where
    R: AsyncRead + Unpin,
{
    async fn read_message(&mut self) -> Result<Option<Message>, ReadError> {
        LineReader::read_message(self).await
    }
}

impl<W> MessageWriter for LineWriter<W>
where
    W: AsyncWrite + Unpin,
{
    async fn write_message(&mut self, message: &Message) -> Result<(), WriteError> {
        LineWriter::write_message(self, message).await
    }
}

impl<R, W> MessageReader for Transport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn read_message(&mut self) -> Result<Option<Message>, ReadError> {
        self.reader.read_message().await
    }
}

impl<R, W> MessageWriter for Transport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn write_message(&mut self, message: &Message) -> Result<(), WriteError> {
        self.writer.write_message(message).await
    }
}
