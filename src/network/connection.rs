//! Console Connection
//!
//! Owns the transport to one console and runs the blocking
//! send-command/receive-response exchange.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::{JrpcError, Result};
use crate::protocol::{Command, Response};

/// Lifecycle of a connection
///
/// `Disconnected → Connecting → Connected → Closed`. `Closed` is terminal:
/// a closed or failed connection is never reopened in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Closed,
}

/// A session with one console
///
/// Generic over the transport so the handshake and exchanges can run on
/// any byte stream; the default is a TCP socket.
pub struct Connection<S = TcpStream> {
    /// Target and exchange settings
    config: Config,

    /// Current lifecycle state
    state: ConnectionState,

    /// Transport, present only while connected
    stream: Option<S>,
}

impl<S> Connection<S> {
    /// Create an unconnected session for the configured target
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: ConnectionState::Disconnected,
            stream: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// True only between a valid greeting and `close`
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Console host this session targets
    pub fn address(&self) -> &str {
        &self.config.address
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Borrow the underlying transport, if connected
    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Release the transport and mark the session closed
    ///
    /// Safe to call any number of times.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            tracing::debug!("Closed connection to {}:{}", self.config.address, self.config.port);
        }
        self.state = ConnectionState::Closed;
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.state != ConnectionState::Connected || self.stream.is_none() {
            return Err(JrpcError::NotConnected);
        }
        Ok(())
    }

    /// Move to `Connecting`, refusing any state but `Disconnected`
    fn begin_connect(&mut self) -> Result<()> {
        if self.state != ConnectionState::Disconnected {
            return Err(JrpcError::InvalidState(self.state));
        }
        self.state = ConnectionState::Connecting;
        Ok(())
    }
}

impl Connection<TcpStream> {
    /// Open the TCP stream and validate the console greeting
    pub fn connect(&mut self) -> Result<()> {
        self.begin_connect()?;

        tracing::debug!("Connecting to {}:{}", self.config.address, self.config.port);

        let stream = match self.open_stream() {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to {}:{}: {}",
                    self.config.address,
                    self.config.port,
                    e
                );
                self.state = ConnectionState::Closed;
                return Err(e);
            }
        };

        self.handshake(stream)
    }

    /// Open the socket and apply the configured options
    fn open_stream(&self) -> Result<TcpStream> {
        let target = (self.config.address.as_str(), self.config.port);

        let stream = if self.config.connect_timeout_ms > 0 {
            let addr = target.to_socket_addrs()?.next().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address resolved for {}", self.config.address),
                )
            })?;
            TcpStream::connect_timeout(&addr, Duration::from_millis(self.config.connect_timeout_ms))?
        } else {
            TcpStream::connect(target)?
        };

        // Commands are tiny; don't let Nagle hold them back
        stream.set_nodelay(true)?;

        if self.config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(self.config.read_timeout_ms)))?;
        }
        if self.config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(self.config.write_timeout_ms)))?;
        }

        Ok(stream)
    }
}

impl<S: Read + Write> Connection<S> {
    /// Validate the console greeting on an already-open stream
    pub fn connect_with(&mut self, stream: S) -> Result<()> {
        self.begin_connect()?;
        self.handshake(stream)
    }

    /// Send a command and return the console's reply
    pub fn send(&mut self, command: &Command) -> Result<Response> {
        self.ensure_connected()?;
        command.validate()?;
        self.send_command(&command.encode())
    }

    /// Send raw command text and block for exactly one read
    ///
    /// The single read is taken as the whole response; a reply split across
    /// segments arrives truncated. Command text must be ASCII.
    pub fn send_command(&mut self, command: &str) -> Result<Response> {
        self.ensure_connected()?;

        if !command.is_ascii() {
            return Err(JrpcError::Format(format!(
                "command is not single-byte text: {:?}",
                command
            )));
        }

        let buffer_size = self.config.recv_buffer_size;
        let stream = self.stream.as_mut().ok_or(JrpcError::NotConnected)?;

        tracing::trace!("Sending command: {}", command.trim_end());

        stream.write_all(command.as_bytes())?;
        stream.flush()?;

        let data = read_once(stream, buffer_size)?;
        if data.is_empty() {
            return Err(JrpcError::Connection(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "console closed the connection",
            )));
        }

        thread::sleep(self.config.settle_delay());

        let response = Response::new(data);
        if self.config.debug {
            tracing::debug!(
                command = command.trim_end(),
                response = %response.text().trim_end(),
                "Exchange with {}",
                self.config.address
            );
        }

        Ok(response)
    }

    /// Read the greeting and take ownership of the stream if it is valid
    fn handshake(&mut self, mut stream: S) -> Result<()> {
        let greeting = match read_once(&mut stream, self.config.recv_buffer_size) {
            Ok(data) => Response::new(data),
            Err(e) => {
                self.state = ConnectionState::Closed;
                return Err(e);
            }
        };

        if !greeting.is_greeting() {
            self.state = ConnectionState::Closed;
            return Err(JrpcError::Protocol(format!(
                "invalid greeting from {}: {:?}",
                self.config.address,
                greeting.text().trim_end()
            )));
        }

        tracing::debug!(
            "Connected to {}:{} ({})",
            self.config.address,
            self.config.port,
            greeting.text().trim_end()
        );

        self.stream = Some(stream);
        self.state = ConnectionState::Connected;
        Ok(())
    }
}

impl<S> Drop for Connection<S> {
    fn drop(&mut self) {
        self.close();
    }
}

/// One bounded read; an empty result means the peer closed
fn read_once<R: Read>(reader: &mut R, limit: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; limit];
    let n = reader.read(&mut buf)?;
    buf.truncate(n);
    Ok(buf)
}
