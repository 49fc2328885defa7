use crate::state::ProtocolState;
use thiserror::Error;

/// Errors from VarInt/VarLong decoding and buffer primitives (§4.1, §4.2).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("read underflow: needed more bytes than the buffer had remaining")]
    ReadUnderflow,
    #[error("malformed VarInt: continuation bit set past the maximum width")]
    MalformedVarInt,
    #[error("string length {0} exceeds max {1}")]
    StringTooLong(usize, usize),
    #[error("nbt error: {0}")]
    Nbt(#[from] mclib_nbt::NbtError),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Frame-level errors (§4.3, §4.4). All are fatal to the connection.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("decompressed frame was {actual} bytes, expected {expected}")]
    DecompressionMismatch { expected: usize, actual: usize },
    #[error("zlib error: {0}")]
    Zlib(#[from] std::io::Error),
    #[error("connection closed")]
    ConnectionClosed,
}

/// Registry and business-logic errors (§4.5, §7). Never panic the core;
/// `UnknownInboundPacket` is policy-controlled (skip vs. fail) and
/// `UnsupportedOutboundPacket` is returned to the caller without touching
/// connection state.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown inbound packet: state={state:?} wire_id=0x{wire_id:02x}")]
    UnknownInboundPacket { state: ProtocolState, wire_id: i32 },
    #[error("packet {packet} is not supported by protocol version {version}")]
    UnsupportedOutboundPacket { packet: String, version: i32 },
    #[error("invalid packet layout: {0}")]
    InvalidPacketLayout(String),
}

/// Top-level connection errors surfaced to the Client owner (§7).
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("disconnected by server: {0}")]
    Disconnect(String),
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
}
