//! Console Facade
//!
//! Named memory, call, and export operations over one `Connection`.
//!
//! ## Address Forms
//! Each operation keeps the address form the console has always been sent:
//!
//! | Operation           | Address       |
//! |---------------------|---------------|
//! | `set_memory_string` | verbatim      |
//! | `set_memory`        | `82000000`    |
//! | `get_memory`        | `82000000`    |
//! | `read_memory`       | `0x82000000`  |
//! | `write_memory`      | `0x82000000`  |
//! | `write_float`       | `0x82000000`  |
//! | `write_float_array` | `82000000`    |
//! | `call`              | decimal       |

use std::io::{Read, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{pack_f32, pack_f32_slice, AddressFormat, Argument, Command, Response};

/// A connected debug session with one console
pub struct Console<S = TcpStream> {
    connection: Connection<S>,
}

impl Console<TcpStream> {
    /// Connect to the configured console and validate its greeting
    pub fn connect(config: Config) -> Result<Self> {
        let mut connection: Connection<TcpStream> = Connection::new(config);
        connection.connect()?;
        Ok(Self { connection })
    }
}

impl<S: Read + Write> Console<S> {
    /// Run the greeting handshake over an already-open stream
    pub fn connect_with(config: Config, stream: S) -> Result<Self> {
        let mut connection: Connection<S> = Connection::new(config);
        connection.connect_with(stream)?;
        Ok(Self { connection })
    }

    /// Wrap an existing connection
    pub fn from_connection(connection: Connection<S>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Connection<S> {
        &self.connection
    }

    pub fn address(&self) -> &str {
        self.connection.address()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    // =========================================================================
    // Memory Writes
    // =========================================================================

    /// `setmem` with address and data text passed through untouched
    pub fn set_memory_string(&mut self, address: &str, data: &str) -> Result<Response> {
        self.connection.send(&Command::SetMemoryRaw {
            address: address.to_string(),
            data: data.to_string(),
        })
    }

    /// Write bytes, returning the raw reply
    pub fn set_memory(&mut self, address: u32, data: &[u8]) -> Result<Response> {
        self.connection.send(&Command::SetMemory {
            address,
            data: data.to_vec(),
            format: AddressFormat::Bare,
        })
    }

    /// Write bytes, reporting whether the console accepted them
    pub fn write_memory(&mut self, address: u32, data: &[u8]) -> Result<bool> {
        let response = self.connection.send(&Command::SetMemory {
            address,
            data: data.to_vec(),
            format: AddressFormat::Prefixed,
        })?;
        Ok(response.is_success())
    }

    /// Write one big-endian float
    pub fn write_float(&mut self, address: u32, value: f32) -> Result<bool> {
        let response = self.connection.send(&Command::SetMemory {
            address,
            data: pack_f32(value).to_vec(),
            format: AddressFormat::Prefixed,
        })?;
        Ok(response.is_success())
    }

    /// Write consecutive big-endian floats starting at `address`
    pub fn write_float_array(&mut self, address: u32, values: &[f32]) -> Result<bool> {
        let response = self.connection.send(&Command::SetMemory {
            address,
            data: pack_f32_slice(values),
            format: AddressFormat::Bare,
        })?;
        Ok(response.is_success())
    }

    // =========================================================================
    // Memory Reads
    // =========================================================================

    /// `getmem`, returning the raw reply
    pub fn get_memory(&mut self, address: u32, length: u32) -> Result<Response> {
        self.connection.send(&Command::GetMemory {
            address,
            length,
            format: AddressFormat::Bare,
        })
    }

    /// Read memory as the hex text line the console returns
    ///
    /// `None` when the console rejects the read or the reply has no data line.
    pub fn read_memory(&mut self, address: u32, length: u32) -> Result<Option<Vec<u8>>> {
        let response = self.connection.send(&Command::GetMemory {
            address,
            length,
            format: AddressFormat::Prefixed,
        })?;

        if !response.is_success() {
            tracing::debug!("getmem 0x{:X} rejected: {}", address, response.text().trim_end());
            return Ok(None);
        }

        Ok(response.payload_line().map(<[u8]>::to_vec))
    }

    // =========================================================================
    // Remote Procedures
    // =========================================================================

    /// Call the function at `address` with positional arguments
    pub fn call(&mut self, address: u32, args: &[Argument]) -> Result<Response> {
        self.connection.send(&Command::Call {
            address,
            args: args.to_vec(),
        })
    }

    /// Look up the runtime address of export `ordinal` in `module`
    pub fn resolve_function(&mut self, module: &str, ordinal: u32) -> Result<u32> {
        let response = self.connection.send(&Command::ResolveExport {
            module: module.to_string(),
            ordinal,
        })?;
        let address = response.resolved_address()?;
        tracing::debug!("Resolved {}@{} to 0x{:08X}", module, ordinal, address);
        Ok(address)
    }

    /// Release the session; further commands fail with `NotConnected`
    pub fn close(&mut self) {
        self.connection.close();
    }
}
