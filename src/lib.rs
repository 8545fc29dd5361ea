//! # JRPC
//!
//! Client for the text-based console debug protocol:
//! - Remote memory reads and writes
//! - Big-endian float pokes
//! - Remote function calls with positional arguments
//! - Module export resolution by ordinal
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Console (facade)                        │
//! │     set/get/read/write memory, floats, call, resolve        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Command   │          │  Response   │
//!   │  (encode)   │          │  (parse)    │
//!   └──────┬──────┘          └──────▲──────┘
//!          │                        │
//!          ▼                        │
//!   ┌───────────────────────────────┴─────┐
//!   │     Connection (one TCP session)    │
//!   │  greeting → send → single read      │
//!   └─────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod console;
pub mod notify;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{JrpcError, Result};
pub use config::Config;
pub use console::Console;
pub use network::{Connection, ConnectionState};
pub use protocol::{Argument, Command, Response};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
