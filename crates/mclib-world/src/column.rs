//! `ChunkColumn` and the world's arena of columns (§3, §9 "Smart-pointer-
//! shared ChunkColumnPtr"). The arena owns every column by value in a
//! `HashMap<(i32,i32), ChunkColumn>`; callers only ever get borrows, never a
//! shared handle, mirroring the redesign note's move away from
//! `ChunkColumnPtr`/`BlockEntityPtr`.

use std::collections::HashMap;

use mclib_nbt::NbtValue;
use mclib_protocol_core::{ChunkDataPayload, DataBuffer};
use mclib_types::BlockPos;

use crate::chunk::{decode_sections, Chunk, SECTIONS_PER_COLUMN};

/// A block entity's structured payload, keyed by its absolute position in
/// the owning column's map (§3 "BlockEntity").
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntity {
    pub position: BlockPos,
    pub kind: Option<String>,
    pub nbt: NbtValue,
}

/// A `(chunkX, chunkZ)` stack of up to 16 sections plus its block entities
/// (§3 "ChunkColumn").
pub struct ChunkColumn {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub sections: Vec<Option<Chunk>>,
    pub section_mask: u32,
    pub continuous: bool,
    pub sky_light: bool,
    pub block_entities: HashMap<(i32, i32, i32), BlockEntity>,
}

impl ChunkColumn {
    pub fn empty(chunk_x: i32, chunk_z: i32) -> Self {
        Self {
            chunk_x,
            chunk_z,
            sections: (0..SECTIONS_PER_COLUMN).map(|_| None).collect(),
            section_mask: 0,
            continuous: false,
            sky_light: false,
            block_entities: HashMap::new(),
        }
    }

    /// Decode a column from a clientbound chunk-data payload (§4.7).
    pub fn decode(payload: &ChunkDataPayload) -> mclib_protocol_core::CodecResult<Self> {
        let mut buf = DataBuffer::from_bytes(bytes::BytesMut::from(&payload.data[..]));
        let sections = decode_sections(&mut buf, payload.primary_bit_mask, payload.sky_light)?;

        // The original never parses biome data even when `continuous` is
        // set (§9 open question); we preserve that until a spec need
        // arises, so the trailing biome bytes (if any) are simply unread.

        let mut block_entities = HashMap::new();
        for nbt in &payload.block_entities {
            if let Some(be) = block_entity_from_nbt(nbt) {
                block_entities.insert((be.position.x, be.position.y, be.position.z), be);
            }
        }

        Ok(Self {
            chunk_x: payload.chunk_x,
            chunk_z: payload.chunk_z,
            sections,
            section_mask: payload.primary_bit_mask,
            continuous: payload.continuous,
            sky_light: payload.sky_light,
            block_entities,
        })
    }

    /// Block-state id at an absolute world position within this column.
    /// Out-of-range y or an absent section both resolve to air (§4.7).
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> i32 {
        let section_index = y.div_euclid(16);
        if !(0..SECTIONS_PER_COLUMN as i32).contains(&section_index) {
            return 0;
        }
        let local_x = x.rem_euclid(16);
        let local_y = y.rem_euclid(16);
        let local_z = z.rem_euclid(16);
        match &self.sections[section_index as usize] {
            Some(section) => section.get_block(local_x, local_y, local_z),
            None => 0,
        }
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_state_id: i32) {
        let section_index = y.div_euclid(16);
        if !(0..SECTIONS_PER_COLUMN as i32).contains(&section_index) {
            return;
        }
        let local_x = x.rem_euclid(16);
        let local_y = y.rem_euclid(16);
        let local_z = z.rem_euclid(16);
        let section = self.sections[section_index as usize].get_or_insert_with(Chunk::empty);
        section.set_block(local_x, local_y, local_z, block_state_id);
        self.section_mask |= 1 << section_index;
    }

    pub fn block_entity_at(&self, pos: BlockPos) -> Option<&BlockEntity> {
        self.block_entities.get(&(pos.x, pos.y, pos.z))
    }
}

fn block_entity_from_nbt(nbt: &NbtValue) -> Option<BlockEntity> {
    let x = match nbt.get("x")? {
        NbtValue::Int(v) => *v,
        _ => return None,
    };
    let y = match nbt.get("y")? {
        NbtValue::Int(v) => *v,
        _ => return None,
    };
    let z = match nbt.get("z")? {
        NbtValue::Int(v) => *v,
        _ => return None,
    };
    let kind = match nbt.get("id") {
        Some(NbtValue::String(s)) => Some(s.clone()),
        _ => None,
    };
    Some(BlockEntity {
        position: BlockPos::new(x, y, z),
        kind,
        nbt: nbt.clone(),
    })
}

/// The client's world model: every loaded column, keyed by its position.
/// Owned by the Client façade (§3 "Ownership"); mutated only from packet
/// handlers on the single network thread (§5).
#[derive(Default)]
pub struct World {
    columns: HashMap<(i32, i32), ChunkColumn>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: ChunkColumn) {
        self.columns.insert((column.chunk_x, column.chunk_z), column);
    }

    pub fn remove(&mut self, chunk_x: i32, chunk_z: i32) {
        self.columns.remove(&(chunk_x, chunk_z));
    }

    pub fn column(&self, chunk_x: i32, chunk_z: i32) -> Option<&ChunkColumn> {
        self.columns.get(&(chunk_x, chunk_z))
    }

    pub fn column_mut(&mut self, chunk_x: i32, chunk_z: i32) -> Option<&mut ChunkColumn> {
        self.columns.get_mut(&(chunk_x, chunk_z))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Block-state id at an absolute world position; air if the owning
    /// column is not loaded (§4.7's out-of-bounds rule extended to
    /// unloaded chunks).
    pub fn get_block(&self, pos: BlockPos) -> i32 {
        let chunk_pos = pos.chunk_pos();
        match self.column(chunk_pos.x, chunk_pos.z) {
            Some(column) => column.get_block(pos.x & 15, pos.y, pos.z & 15),
            None => 0,
        }
    }

    pub fn set_block(&mut self, pos: BlockPos) -> Option<&mut ChunkColumn> {
        let chunk_pos = pos.chunk_pos();
        self.column_mut(chunk_pos.x, chunk_pos.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_unloaded_chunk_returns_air() {
        let world = World::new();
        assert_eq!(world.get_block(BlockPos::new(0, 0, 0)), 0);
    }

    #[test]
    fn test_column_set_get_across_section_boundary() {
        let mut column = ChunkColumn::empty(0, 0);
        column.set_block(1, 16, 1, 42);
        assert_eq!(column.get_block(1, 16, 1), 42);
        assert_eq!(column.get_block(1, 0, 1), 0);
        assert_eq!(column.section_mask & (1 << 1), 1 << 1);
    }

    #[test]
    fn test_column_negative_local_coordinates_wrap() {
        let mut column = ChunkColumn::empty(-1, -1);
        column.set_block(-1, 5, -3, 7);
        assert_eq!(column.get_block(15, 5, 13), 7);
    }

    #[test]
    fn test_world_insert_and_lookup() {
        let mut world = World::new();
        let mut column = ChunkColumn::empty(2, -3);
        column.set_block(0, 0, 0, 1);
        world.insert(column);
        assert_eq!(world.len(), 1);
        assert_eq!(world.get_block(BlockPos::new(32, 0, -48)), 1);
    }

    #[test]
    fn test_block_entity_round_trip_from_nbt() {
        let nbt = mclib_nbt::nbt_compound! {
            "x" => NbtValue::Int(5),
            "y" => NbtValue::Int(64),
            "z" => NbtValue::Int(-2),
            "id" => NbtValue::String("minecraft:chest".into()),
        };
        let be = block_entity_from_nbt(&nbt).unwrap();
        assert_eq!(be.position, BlockPos::new(5, 64, -2));
        assert_eq!(be.kind.as_deref(), Some("minecraft:chest"));
    }
}
