//! Protocol Module
//!
//! Defines the line-oriented text protocol spoken by the console.
//!
//! ## Request Format
//! One ASCII line per command, `verb key=value ...` terminated by CRLF:
//! ```text
//! setmem addr=0x82000000 data=3FC00000\r\n
//! getmem addr=82000000 length=4\r\n
//! consolefeatures ver=2 type=1 params="A\0\A\2\1\2181038080\1\5"\r\n
//! ```
//!
//! ## Response Format
//! A status line optionally followed by payload lines:
//! ```text
//! 200- memory data follows\r\n
//! 3FC00000\r\n
//! ```
//!
//! ### Status Prefixes
//! - `201-`: greeting sent once after connect
//! - `200-`: command succeeded
//! - anything else: failure or informational

mod codec;
mod command;
mod response;

pub use codec::{
    decode_hex, encode_hex, format_address, pack_f32, pack_f32_slice, parse_address, unpack_f32,
    AddressFormat, FLOAT_SIZE,
};
pub use command::{Argument, Command, FeatureType, JRPC_VERSION, TERMINATOR};
pub use response::{Response, GREETING_PREFIX, SUCCESS_PREFIX};
