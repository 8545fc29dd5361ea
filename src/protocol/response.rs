//! Response definitions
//!
//! Interprets the raw bytes returned for one command.

use crate::error::{JrpcError, Result};

use super::codec::parse_address;

/// Status prefix of a successful command response
pub const SUCCESS_PREFIX: &[u8] = b"200-";

/// Status prefix of the greeting sent on connect
pub const GREETING_PREFIX: &[u8] = b"201-";

/// Raw response to a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    bytes: Vec<u8>,
}

impl Response {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// True iff the response starts with `200-`
    pub fn is_success(&self) -> bool {
        self.bytes.starts_with(SUCCESS_PREFIX)
    }

    /// True iff the response is a connect greeting (`201-`)
    pub fn is_greeting(&self) -> bool {
        self.bytes.starts_with(GREETING_PREFIX)
    }

    /// Second line of the response with surrounding whitespace removed
    ///
    /// `None` when the response has no second line.
    pub fn payload_line(&self) -> Option<&[u8]> {
        self.bytes.split(|b| *b == b'\n').nth(1).map(<[u8]>::trim_ascii)
    }

    /// Address reported by an export lookup (`"<status> <hex-address>"`)
    pub fn resolved_address(&self) -> Result<u32> {
        let text = self.text();
        let token = text.split(' ').nth(1).ok_or_else(|| {
            JrpcError::Format(format!("no address token in response {:?}", text))
        })?;
        parse_address(token)
    }

    /// Response decoded one byte per character
    pub fn text(&self) -> String {
        self.bytes.iter().map(|&b| char::from(b)).collect()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for Response {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}
