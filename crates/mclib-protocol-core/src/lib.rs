pub mod adapter;
pub mod codec;
pub mod connection;
pub mod error;
pub mod packets;
pub mod state;

pub use adapter::*;
pub use codec::*;
pub use connection::{Connection, ConnectionReader, ConnectionWriter};
pub use error::*;
pub use packets::*;
pub use state::*;
