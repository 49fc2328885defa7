pub mod adapter;
pub mod registries;

pub use adapter::{inbound_agnostic_id, serverbound_wire_id, V1_13_2Adapter};
pub use registries::{read_slot_flattened, write_slot_flattened};
