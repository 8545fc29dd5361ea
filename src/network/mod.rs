//! Network Module
//!
//! Console session handling.
//!
//! ## Model
//! - One TCP session per `Connection`
//! - Strictly one command in flight; callers serialize access
//! - No retries: every failure surfaces on first occurrence

mod connection;

pub use connection::{Connection, ConnectionState};
