//! Process-wide, init-once registry of block states and items.
//!
//! Populated at compile time from `data/blocks` and `data/items` by
//! `build.rs`; never mutated after the static initializes. Block state 0 is
//! always `air` and is the fallback the chunk decoder and `BlockRegistry`
//! return for any id the table doesn't recognize.

include!(concat!(env!("OUT_DIR"), "/generated.rs"));

use std::sync::LazyLock;

/// A minimal description of a block state, enough for the chunk decoder and
/// world model to report something sensible for any block it encounters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockState {
    pub id: i32,
    pub name: &'static str,
}

/// The process-wide block registry. Construction never fails: unknown ids
/// resolve to air (state 0) rather than an error, mirroring the original
/// `BlockRegistry::GetInstance()->GetBlock(id)` fallback.
pub struct BlockRegistry;

impl BlockRegistry {
    pub fn get(&self, state_id: i32) -> BlockState {
        match block_state_to_name(state_id) {
            Some(name) => BlockState { id: state_id, name },
            None => BlockState { id: 0, name: "air" },
        }
    }

    pub fn default_state_of(&self, name: &str) -> Option<i32> {
        block_name_to_default_state(name)
    }
}

static BLOCK_REGISTRY: LazyLock<BlockRegistry> = LazyLock::new(|| BlockRegistry);

/// The singleton block registry. Initializes on first use; safe to call from
/// any thread (the dispatcher is single-threaded per connection per §5, but
/// nothing here assumes that).
pub fn block_registry() -> &'static BlockRegistry {
    &BLOCK_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_lookups() {
        assert_eq!(block_name_to_default_state("air"), Some(0));
        assert_eq!(block_name_to_default_state("stone"), Some(1));
        assert_eq!(block_name_to_default_state("cobblestone"), Some(11));
        assert_eq!(block_name_to_default_state("bedrock"), Some(79));
        assert_eq!(block_name_to_default_state("nonexistent"), None);
    }

    #[test]
    fn test_item_lookups() {
        assert_eq!(item_name_to_id("stone"), Some(1));
        assert_eq!(item_name_to_id("air"), Some(0));
        assert!(item_name_to_id("nonexistent").is_none());
        assert_eq!(item_id_to_name(35), Some("cobblestone"));
    }

    #[test]
    fn test_item_to_block() {
        let stone_item = item_name_to_id("stone").unwrap();
        assert_eq!(item_id_to_block_state(stone_item), Some(1));
    }

    #[test]
    fn test_registry_unknown_state_falls_back_to_air() {
        let reg = block_registry();
        let state = reg.get(999_999);
        assert_eq!(state.id, 0);
        assert_eq!(state.name, "air");
    }

    #[test]
    fn test_registry_known_state() {
        let reg = block_registry();
        let state = reg.get(79);
        assert_eq!(state.name, "bedrock");
    }
}
