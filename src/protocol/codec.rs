//! Type codec
//!
//! Conversions between native values and their wire representations.
//!
//! ## Wire Representations
//! - Floats: IEEE-754 single precision, big-endian
//! - Byte payloads: uppercase hex, no separators
//! - Addresses: uppercase hex, bare (`82000000`) or prefixed (`0x82000000`)

use crate::error::{JrpcError, Result};

/// Size of one encoded float on the wire
pub const FLOAT_SIZE: usize = 4;

// =============================================================================
// Floats
// =============================================================================

/// Pack a float as big-endian bytes
pub fn pack_f32(value: f32) -> [u8; FLOAT_SIZE] {
    value.to_be_bytes()
}

/// Unpack a big-endian float
pub fn unpack_f32(bytes: [u8; FLOAT_SIZE]) -> f32 {
    f32::from_be_bytes(bytes)
}

/// Pack a run of floats back to back, big-endian
pub fn pack_f32_slice(values: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * FLOAT_SIZE);
    for value in values {
        bytes.extend_from_slice(&pack_f32(*value));
    }
    bytes
}

// =============================================================================
// Hex
// =============================================================================

/// Encode bytes as uppercase hex
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode hex text (either case) back to bytes
///
/// Fails on odd length or non-hex characters.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| JrpcError::Format(format!("invalid hex {:?}: {}", text, e)))
}

// =============================================================================
// Addresses
// =============================================================================

/// How an address is rendered inside a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFormat {
    /// `82000000`
    Bare,

    /// `0x82000000`
    Prefixed,
}

/// Format an address as uppercase hex in the requested form
pub fn format_address(address: u32, format: AddressFormat) -> String {
    match format {
        AddressFormat::Bare => format!("{:X}", address),
        AddressFormat::Prefixed => format!("0x{:X}", address),
    }
}

/// Parse an address written as hex, with or without a `0x`/`0X` prefix
///
/// Surrounding whitespace is ignored.
pub fn parse_address(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(JrpcError::Format(format!("empty address in {:?}", text)));
    }

    u32::from_str_radix(digits, 16)
        .map_err(|e| JrpcError::Format(format!("invalid address {:?}: {}", text, e)))
}
