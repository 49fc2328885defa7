use mclib_protocol_core::{CodecError, ConnectionError, DecodeError, RegistryError};
use thiserror::Error;

/// Errors surfaced by the client façade (§7). Frame- and registry-level
/// failures from the core pass through unchanged; login-specific failures
/// (`AuthenticationFailed`, the login-time `Disconnect`) are added here
/// since the core's own error taxonomy doesn't know about the login
/// sequence, only about frames and packets.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("disconnected by server: {0}")]
    Disconnect(String),
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("unexpected packet during login: {0}")]
    UnexpectedPacket(String),
}
