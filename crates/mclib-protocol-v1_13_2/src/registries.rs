//! Wire-id tables and the flattened (1.13+) Slot wire format for protocol
//! 404 (1.13.2). This release line dropped the numeric block/item-damage
//! split in favor of a single flattened state id, and the play-packet
//! ordering shifted to make room for the new declare-commands/declare-
//! recipes/tags packets; ids grounded in the same per-release
//! `GetPacketId` convention as the 1.12.2 adapter.

use bytes::BytesMut;
use mclib_protocol_core::{write_nbt, CodecResult};
use mclib_types::Slot;

// --- Status ---
pub const STATUS_RESPONSE_CB: i32 = 0x00;
pub const PING_SB: i32 = 0x01;
pub const PONG_CB: i32 = 0x01;
pub const STATUS_REQUEST_SB: i32 = 0x00;

// --- Login ---
pub const LOGIN_DISCONNECT_CB: i32 = 0x00;
pub const ENCRYPTION_REQUEST_CB: i32 = 0x01;
pub const LOGIN_SUCCESS_CB: i32 = 0x02;
pub const SET_COMPRESSION_CB: i32 = 0x03;
pub const LOGIN_START_SB: i32 = 0x00;
pub const ENCRYPTION_RESPONSE_SB: i32 = 0x01;

// --- Play: clientbound ---
pub const PLAY_SPAWN_OBJECT_CB: i32 = 0x00;
pub const PLAY_SPAWN_LIVING_ENTITY_CB: i32 = 0x03;
pub const PLAY_SPAWN_PLAYER_CB: i32 = 0x05;
pub const PLAY_ANIMATION_CB: i32 = 0x06;
pub const PLAY_BLOCK_ENTITY_DATA_CB: i32 = 0x09;
pub const PLAY_BLOCK_CHANGE_CB: i32 = 0x0B;
pub const PLAY_SERVER_DIFFICULTY_CB: i32 = 0x0D;
pub const PLAY_CHAT_MESSAGE_CB: i32 = 0x0E;
pub const PLAY_MULTI_BLOCK_CHANGE_CB: i32 = 0x0F;
pub const PLAY_CONFIRM_TRANSACTION_CB: i32 = 0x12;
pub const PLAY_CLOSE_WINDOW_CB: i32 = 0x13;
pub const PLAY_OPEN_WINDOW_CB: i32 = 0x14;
pub const PLAY_WINDOW_ITEMS_CB: i32 = 0x15;
pub const PLAY_SET_SLOT_CB: i32 = 0x17;
pub const PLAY_PLUGIN_MESSAGE_CB: i32 = 0x19;
pub const PLAY_DISCONNECT_CB: i32 = 0x1B;
pub const PLAY_EXPLOSION_CB: i32 = 0x1D;
pub const PLAY_UNLOAD_CHUNK_CB: i32 = 0x1E;
pub const PLAY_KEEP_ALIVE_CB: i32 = 0x20;
pub const PLAY_CHUNK_DATA_CB: i32 = 0x21;
pub const PLAY_JOIN_GAME_CB: i32 = 0x24;
pub const PLAY_ENTITY_RELATIVE_MOVE_CB: i32 = 0x27;
pub const PLAY_ENTITY_LOOK_AND_RELATIVE_MOVE_CB: i32 = 0x28;
pub const PLAY_PLAYER_ABILITIES_CB: i32 = 0x2D;
pub const PLAY_PLAYER_LIST_ITEM_CB: i32 = 0x2F;
pub const PLAY_PLAYER_POSITION_AND_LOOK_CB: i32 = 0x30;
pub const PLAY_DESTROY_ENTITIES_CB: i32 = 0x33;
pub const PLAY_RESPAWN_CB: i32 = 0x36;
pub const PLAY_ENTITY_HEAD_LOOK_CB: i32 = 0x37;
pub const PLAY_WORLD_BORDER_CB: i32 = 0x39;
pub const PLAY_HELD_ITEM_CHANGE_CB: i32 = 0x3B;
pub const PLAY_ENTITY_METADATA_CB: i32 = 0x3D;
pub const PLAY_ENTITY_VELOCITY_CB: i32 = 0x3F;
pub const PLAY_UPDATE_HEALTH_CB: i32 = 0x42;
pub const PLAY_SPAWN_POSITION_CB: i32 = 0x47;
pub const PLAY_TIME_UPDATE_CB: i32 = 0x48;
pub const PLAY_ENTITY_TELEPORT_CB: i32 = 0x4E;

// --- Play: serverbound ---
pub const PLAY_TELEPORT_CONFIRM_SB: i32 = 0x00;
pub const PLAY_CHAT_MESSAGE_SB: i32 = 0x02;
pub const PLAY_CLIENT_STATUS_SB: i32 = 0x03;
pub const PLAY_CLIENT_SETTINGS_SB: i32 = 0x04;
pub const PLAY_CONFIRM_TRANSACTION_SB: i32 = 0x06;
pub const PLAY_CLICK_WINDOW_SB: i32 = 0x08;
pub const PLAY_CLOSE_WINDOW_SB: i32 = 0x09;
pub const PLAY_PLUGIN_MESSAGE_SB: i32 = 0x0A;
pub const PLAY_KEEP_ALIVE_SB: i32 = 0x0E;
pub const PLAY_PLAYER_POSITION_SB: i32 = 0x10;
pub const PLAY_PLAYER_POSITION_AND_LOOK_SB: i32 = 0x11;
pub const PLAY_PLAYER_LOOK_SB: i32 = 0x12;
pub const PLAY_PLAYER_SB: i32 = 0x13;
pub const PLAY_PLAYER_ABILITIES_SB: i32 = 0x18;
pub const PLAY_PLAYER_DIGGING_SB: i32 = 0x19;
pub const PLAY_ENTITY_ACTION_SB: i32 = 0x1A;
pub const PLAY_HELD_ITEM_CHANGE_SB: i32 = 0x22;
pub const PLAY_CREATIVE_INVENTORY_ACTION_SB: i32 = 0x25;
pub const PLAY_ANIMATION_SB: i32 = 0x28;
pub const PLAY_PLAYER_BLOCK_PLACEMENT_SB: i32 = 0x2A;

/// Flattened (1.13+) Slot wire format: a presence boolean followed — only
/// if true — by an item id VarInt, a count byte, and an NBT tag (or a lone
/// `TAG_END` byte). The per-slot damage value folded into the NBT
/// `Damage` tag rather than a dedicated wire field once ids flattened.
/// Grounded in `Slot::Deserialize`/`Slot::Serialize` for
/// `version >= Minecraft_1_13`.
pub fn read_slot_flattened(buf: &mut BytesMut) -> CodecResult<Slot> {
    let mut db = mclib_protocol_core::DataBuffer::from_bytes(std::mem::take(buf));
    let present = db.read_bool()?;
    let slot = if !present {
        Slot::empty()
    } else {
        let item_id = db.read_varint()?;
        let count = db.read_u8()?;
        let tag_byte = db.read_u8()?;
        let nbt = if tag_byte == mclib_nbt::TAG_END {
            None
        } else {
            // `tag_byte` already consumed the NBT root's type byte; the
            // root's (always-empty) name still follows before the payload.
            let _name = mclib_nbt::read_nbt_string(db.as_mut())?;
            Some(mclib_nbt::NbtValue::read_payload(tag_byte, db.as_mut())?)
        };
        Slot {
            item_id,
            count,
            damage: 0,
            nbt,
        }
    };
    *buf = db.into_inner();
    Ok(slot)
}

pub fn write_slot_flattened(buf: &mut BytesMut, slot: &Slot) {
    let mut db = mclib_protocol_core::DataBuffer::from_bytes(std::mem::take(buf));
    if slot.is_empty() {
        db.write_bool(false);
    } else {
        db.write_bool(true);
        db.write_varint(slot.item_id);
        db.write_u8(slot.count);
        match &slot.nbt {
            Some(nbt) => write_nbt(db.as_mut(), nbt),
            None => db.write_u8(mclib_nbt::TAG_END),
        }
    }
    *buf = db.into_inner();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_roundtrip() {
        let mut buf = BytesMut::new();
        write_slot_flattened(&mut buf, &Slot::empty());
        assert_eq!(read_slot_flattened(&mut buf).unwrap(), Slot::empty());
    }

    #[test]
    fn test_populated_slot_roundtrip_no_nbt() {
        let slot = Slot::new(755, 5);
        let mut buf = BytesMut::new();
        write_slot_flattened(&mut buf, &slot);
        let decoded = read_slot_flattened(&mut buf).unwrap();
        assert_eq!(decoded.item_id, 755);
        assert_eq!(decoded.count, 5);
        assert_eq!(decoded.nbt, None);
    }

    #[test]
    fn test_populated_slot_roundtrip_with_nbt() {
        let mut slot = Slot::new(612, 1);
        slot.nbt = Some(mclib_nbt::nbt_compound! { "Damage" => mclib_nbt::NbtValue::Int(3) });
        let mut buf = BytesMut::new();
        write_slot_flattened(&mut buf, &slot);
        let decoded = read_slot_flattened(&mut buf).unwrap();
        assert_eq!(decoded.nbt, slot.nbt);
    }

    #[test]
    fn test_flattened_slot_has_no_damage_field_on_wire() {
        // Only a presence bool + varint id + count + nbt byte for an
        // itemless write; the legacy i16 item-id/i16 damage fields are
        // gone entirely, not just zeroed.
        let mut buf = BytesMut::new();
        let slot = Slot::new(1, 1);
        write_slot_flattened(&mut buf, &slot);
        assert_eq!(buf.len(), 1 /* bool */ + 1 /* varint(1) */ + 1 /* count */ + 1 /* TAG_END */);
    }
}
