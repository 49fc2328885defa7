use crate::error::{CodecError, RegistryError};
use crate::packets::InternalPacket;
use crate::state::ProtocolState;
use bytes::BytesMut;

/// One per supported protocol version. Maps this version's wire ids onto
/// the shared `InternalPacket` representation and back (§4.5); never holds
/// connection state itself, so a single adapter instance is shared (and
/// `Send + Sync`) across every `Connection` that negotiates this version.
pub trait ProtocolAdapter: Send + Sync {
    /// The protocol version number this adapter handles (e.g. 340 for
    /// 1.12.2, 404 for 1.13.2).
    fn protocol_version(&self) -> i32;

    /// Decode a packet body already separated from its frame (the frame
    /// layer has stripped length, compression, and the wire id is passed
    /// separately). Returns the in-memory packet plus its agnostic id for
    /// dispatch.
    fn decode_packet(
        &self,
        state: ProtocolState,
        wire_id: i32,
        data: &mut BytesMut,
    ) -> Result<InternalPacket, DecodeError>;

    /// Encode an `InternalPacket` into `id-varint || payload` bytes ready
    /// for the frame layer. Fails with `UnsupportedOutboundPacket` if this
    /// version's table has no wire id for the given packet (§4.5, last
    /// paragraph).
    fn encode_packet(
        &self,
        state: ProtocolState,
        packet: &InternalPacket,
    ) -> Result<BytesMut, RegistryError>;
}

/// Decoding can fail either because the bytes were malformed (`Codec`) or
/// because the wire id itself was never registered for this state
/// (`Registry`).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
