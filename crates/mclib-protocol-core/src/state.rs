/// The state of a Minecraft protocol connection. Determines which packet-id
/// table is in effect and what those ids mean (§3 "Protocol state").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolState {
    Handshake,
    Status,
    Login,
    Play,
}

impl ProtocolState {
    /// The handshake packet's `nextState` field selects `Status` (1) or
    /// `Login` (2); anything else is malformed.
    pub fn from_handshake_next(next: i32) -> Option<Self> {
        match next {
            1 => Some(ProtocolState::Status),
            2 => Some(ProtocolState::Login),
            _ => None,
        }
    }
}
