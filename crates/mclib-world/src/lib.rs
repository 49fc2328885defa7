pub mod chunk;
pub mod column;

pub use chunk::{decode_sections, Chunk, SECTIONS_PER_COLUMN};
pub use column::{BlockEntity, ChunkColumn, World};
