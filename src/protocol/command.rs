//! Command definitions
//!
//! Builds the exact ASCII lines sent to the console.

use std::fmt;

use crate::error::{JrpcError, Result};

use super::codec::{encode_hex, format_address, AddressFormat};

/// Version tag sent with every `consolefeatures` command
pub const JRPC_VERSION: u32 = 2;

/// Line terminator for every command
pub const TERMINATOR: &str = "\r\n";

/// `consolefeatures` sub-feature selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FeatureType {
    /// Call a function with positional arguments
    Call = 1,

    /// Resolve a module export by ordinal
    ResolveExport = 9,
}

/// A positional argument of a remote function call
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Int(i64),
    UInt(u64),
    Float(f32),
    Str(String),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Int(v) => write!(f, "{}", v),
            Argument::UInt(v) => write!(f, "{}", v),
            // Debug keeps the fractional part on whole numbers (`1.0`, not `1`)
            Argument::Float(v) => write!(f, "{:?}", v),
            Argument::Str(v) => f.write_str(v),
        }
    }
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self {
        Argument::Int(v.into())
    }
}

impl From<i64> for Argument {
    fn from(v: i64) -> Self {
        Argument::Int(v)
    }
}

impl From<u32> for Argument {
    fn from(v: u32) -> Self {
        Argument::UInt(v.into())
    }
}

impl From<u64> for Argument {
    fn from(v: u64) -> Self {
        Argument::UInt(v)
    }
}

impl From<f32> for Argument {
    fn from(v: f32) -> Self {
        Argument::Float(v)
    }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self {
        Argument::Str(v.to_string())
    }
}

impl From<String> for Argument {
    fn from(v: String) -> Self {
        Argument::Str(v)
    }
}

/// A command for the console
///
/// Address forms differ per command; callers pick the form their
/// operation has always sent rather than going through one formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `setmem` with caller-supplied address and data text, sent verbatim
    SetMemoryRaw { address: String, data: String },

    /// `setmem` with a hex-encoded byte payload
    SetMemory {
        address: u32,
        data: Vec<u8>,
        format: AddressFormat,
    },

    /// `getmem`
    GetMemory {
        address: u32,
        length: u32,
        format: AddressFormat,
    },

    /// `consolefeatures type=1`: call `address` with positional arguments
    Call { address: u32, args: Vec<Argument> },

    /// `consolefeatures type=9`: resolve export `ordinal` of `module`
    ResolveExport { module: String, ordinal: u32 },
}

impl Command {
    /// Render the command as its wire line, CRLF included
    pub fn encode(&self) -> String {
        let mut line = match self {
            Command::SetMemoryRaw { address, data } => {
                format!("setmem addr={} data={}", address, data)
            }
            Command::SetMemory {
                address,
                data,
                format,
            } => format!(
                "setmem addr={} data={}",
                format_address(*address, *format),
                encode_hex(data)
            ),
            Command::GetMemory {
                address,
                length,
                format,
            } => format!(
                "getmem addr={} length={}",
                format_address(*address, *format),
                length
            ),
            Command::Call { address, args } => {
                let mut line = format!(
                    "consolefeatures ver={} type={} params=\"A\\0\\A\\{}\\1\\{}",
                    JRPC_VERSION,
                    FeatureType::Call as u8,
                    args.len() + 1,
                    address
                );
                for arg in args {
                    line.push_str(&format!("\\1\\{}", arg));
                }
                line.push('"');
                line
            }
            Command::ResolveExport { module, ordinal } => format!(
                "consolefeatures ver={} type={} params=\"A\\0\\A\\2\\{}\\{}\\{}\\\"",
                JRPC_VERSION,
                FeatureType::ResolveExport as u8,
                module.len(),
                encode_hex(module.as_bytes()),
                ordinal
            ),
        };
        line.push_str(TERMINATOR);
        line
    }

    /// Check that the command can be carried in single-byte text
    ///
    /// Module names are length-prefixed and hex-encoded, so a non-ASCII
    /// name would slip past the line-level check with a wrong length.
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::ResolveExport { module, .. } if !module.is_ascii() => Err(JrpcError::Format(
                format!("module name is not single-byte text: {:?}", module),
            )),
            _ => Ok(()),
        }
    }

    /// Short verb name for logging
    pub fn verb(&self) -> &'static str {
        match self {
            Command::SetMemoryRaw { .. } | Command::SetMemory { .. } => "setmem",
            Command::GetMemory { .. } => "getmem",
            Command::Call { .. } | Command::ResolveExport { .. } => "consolefeatures",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode().trim_end_matches(TERMINATOR))
    }
}
