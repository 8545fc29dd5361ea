//! Error types for the JRPC client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::network::ConnectionState;

/// Result type alias using JrpcError
pub type Result<T> = std::result::Result<T, JrpcError>;

/// Unified error type for JRPC operations
#[derive(Debug, Error)]
pub enum JrpcError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Socket could not be opened, or the transport failed mid-exchange
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    /// Greeting did not carry the `201-` prefix
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Not connected to any console")]
    NotConnected,

    #[error("Invalid connection state for connect: {0:?}")]
    InvalidState(ConnectionState),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    /// Malformed hex, non-ASCII command text, or a missing response token
    #[error("Format error: {0}")]
    Format(String),
}
