//! Client Connection
//!
//! One TCP session with a server: buffered streams, line/payload read
//! helpers, the pipelining flag and the `send` round trip.

use std::fmt;
use std::io::{BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};

use crate::config::ClientConfig;
use crate::error::{RespError, Result};
use crate::protocol::{self, Command, Reply};

/// Upper bound on up-front allocation in `read_replies`
const MAX_PREALLOCATED_REPLIES: usize = 1024;

/// A single client connection
///
/// ## Pipelining
/// While `pipelining` is set, [`Connection::queue`] and
/// [`Connection::write_command`] only fill the output buffer; the caller
/// flushes once and then reads exactly as many replies as were queued, in
/// issue order. Pending output is always flushed before a blocking read, so a
/// read never waits on a request the server has not seen.
///
/// Not safe for concurrent use; see [`super::SharedConnection`].
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Scratch buffer for header lines
    line: Vec<u8>,

    /// Per-connection pipelining mode
    pipelining: bool,

    /// Set once the peer has gone away; the connection is then unusable
    closed: bool,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to `host:port` with default settings
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let config = ClientConfig::builder().host(host).port(port).build();
        Self::open(&config)
    }

    /// Connect using a full configuration
    ///
    /// Sends AUTH and SELECT when the config asks for them, before switching
    /// into pipelining mode.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let addr = config.addr();
        let stream = TcpStream::connect(&addr)
            .map_err(|e| RespError::Connection(format!("cannot connect to {}: {}", addr, e)))?;

        let mut conn = Self::with_config(stream, config)?;

        if let Some(password) = &config.password {
            conn.auth(password)?;
        }
        if let Some(index) = config.database {
            conn.select(index)?;
        }
        conn.set_pipelining(config.pipelining);

        Ok(conn)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        Self::with_config(stream, &ClientConfig::default())
    }

    fn with_config(stream: TcpStream, config: &ClientConfig) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.tcp_nodelay)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::with_capacity(config.read_buffer_size, read_stream),
            writer: BufWriter::with_capacity(config.write_buffer_size, write_stream),
            line: Vec::with_capacity(64),
            pipelining: false,
            closed: false,
            peer_addr,
        })
    }

    // =========================================================================
    // Mode
    // =========================================================================

    pub fn set_pipelining(&mut self, enabled: bool) {
        self.pipelining = enabled;
    }

    pub fn is_pipelining(&self) -> bool {
        self.pipelining
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    // =========================================================================
    // Raw I/O
    // =========================================================================

    /// Append raw bytes plus CRLF to the output buffer (no flush)
    pub fn write_token(&mut self, token: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let result = protocol::write_token(&mut self.writer, token);
        self.track(result)
    }

    /// Append an encoded command to the output buffer (no flush)
    pub fn write_command(&mut self, command: &Command) -> Result<()> {
        self.ensure_open()?;
        tracing::trace!(
            "Sending {} with {} args to {}",
            command.name_lossy(),
            command.len() - 1,
            self.peer_addr
        );
        let result = protocol::write_command(&mut self.writer, command);
        self.track(result)
    }

    /// Push buffered output onto the socket
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_open()?;
        let result = self.writer.flush().map_err(RespError::from_io);
        self.track(result)
    }

    /// Read one line, without its CRLF
    pub fn read_line(&mut self) -> Result<Vec<u8>> {
        self.before_read()?;
        let result = protocol::read_line(&mut self.reader, &mut self.line);
        self.track(result)?;
        Ok(self.line.clone())
    }

    /// Read exactly `len` bytes followed by CRLF
    pub fn read_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        self.before_read()?;
        let result = protocol::read_payload(&mut self.reader, len);
        self.track(result).map(|payload| payload.to_vec())
    }

    /// Read and decode one reply, without error filtering
    pub fn read_reply(&mut self) -> Result<Reply> {
        self.before_read()?;
        let result = protocol::read_reply_with(&mut self.reader, &mut self.line);
        let reply = self.track(result)?;
        tracing::trace!("Received {} from {}", reply.summary(), self.peer_addr);
        Ok(reply)
    }

    // =========================================================================
    // Command Invocation
    // =========================================================================

    /// Issue one command and return its reply
    ///
    /// The request is flushed immediately unless pipelining is on. An error
    /// reply is returned as `RespError::Server` with the text unchanged.
    pub fn send(&mut self, command: &Command) -> Result<Reply> {
        self.write_command(command)?;
        if !self.pipelining {
            self.flush()?;
        }
        let reply = self.read_reply()?;
        filter_error(reply)
    }

    /// Write a command whose reply will be read later
    ///
    /// Flushed right away unless pipelining is on.
    pub fn queue(&mut self, command: &Command) -> Result<()> {
        self.write_command(command)?;
        if !self.pipelining {
            self.flush()?;
        }
        Ok(())
    }

    /// Read `count` replies in issue order
    ///
    /// All replies are consumed even when one of them is an error, so the
    /// stream stays aligned; the first server error is then returned.
    pub fn read_replies(&mut self, count: usize) -> Result<Vec<Reply>> {
        let mut replies = Vec::with_capacity(count.min(MAX_PREALLOCATED_REPLIES));
        let mut first_error = None;

        for _ in 0..count {
            match filter_error(self.read_reply()?) {
                Ok(reply) => replies.push(reply),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(replies),
        }
    }

    /// Write every command, flush once, then read one reply per command
    pub fn pipeline(&mut self, commands: &[Command]) -> Result<Vec<Reply>> {
        for command in commands {
            self.write_command(command)?;
        }
        self.flush()?;
        tracing::debug!(
            "Pipelined {} commands to {}",
            commands.len(),
            self.peer_addr
        );
        self.read_replies(commands.len())
    }

    /// Issue a command that may legitimately end the session
    ///
    /// End-of-stream counts as success here; a status reply is accepted
    /// too. Either way the connection is closed afterwards.
    pub fn send_closing(&mut self, command: &Command) -> Result<()> {
        self.write_command(command)?;
        self.flush()?;

        let outcome = protocol::read_reply_with(&mut self.reader, &mut self.line);
        self.closed = true;

        match outcome {
            Err(RespError::ConnectionClosed) | Ok(Reply::Status(_)) => {
                tracing::debug!(
                    "Session with {} ended by {}",
                    self.peer_addr,
                    command.name_lossy()
                );
                self.shutdown_socket();
                Ok(())
            }
            Ok(Reply::Error(message)) => {
                // The server refused; the socket is still usable
                self.closed = false;
                Err(RespError::Server(message))
            }
            Ok(other) => {
                self.shutdown_socket();
                Err(RespError::ProjectionMismatch {
                    expected: "status or end of stream",
                    found: other.summary(),
                })
            }
            Err(e) => {
                self.shutdown_socket();
                Err(e)
            }
        }
    }

    /// Flush what is pending and close the socket
    pub fn close(mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let flushed = self.writer.flush().map_err(RespError::from_io);
        self.closed = true;
        self.shutdown_socket();
        tracing::debug!("Connection to {} closed", self.peer_addr);
        flushed
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(RespError::ConnectionClosed);
        }
        Ok(())
    }

    /// Nothing may block on a reply while its request sits in our buffer
    fn before_read(&mut self) -> Result<()> {
        self.ensure_open()?;
        if !self.writer.buffer().is_empty() {
            self.flush()?;
        }
        Ok(())
    }

    /// Mark the connection dead on connection-level failures
    ///
    /// A framing error also leaves the stream at an unknown offset, so it
    /// is treated the same way.
    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Err(ref e) if e.is_connection_error() => {
                tracing::warn!("Connection to {} lost: {}", self.peer_addr, e);
                self.closed = true;
            }
            Err(RespError::Protocol(ref message)) => {
                tracing::warn!("Protocol error from {}: {}", self.peer_addr, message);
                self.closed = true;
            }
            _ => {}
        }
        result
    }

    fn shutdown_socket(&mut self) {
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("peer_addr", &self.peer_addr)
            .field("pipelining", &self.pipelining)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// Turn an error reply into `RespError::Server`
pub fn filter_error(reply: Reply) -> Result<Reply> {
    match reply {
        Reply::Error(message) => Err(RespError::Server(message)),
        other => Ok(other),
    }
}
