//! Wire-id tables and the legacy (pre-1.13) Slot wire format for protocol
//! 340 (1.12.2). Ids grounded in `Protocol.h`'s per-packet `GetPacketId`
//! overloads from the original client library.

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
pub const PLAY_CHAT_MESSAGE_CB: i32 = 0x0F;
pub const PLAY_MULTI_BLOCK_CHANGE_CB: i32 = 0x10;
pub const PLAY_CONFIRM_TRANSACTION_CB: i32 = 0x11;
pub const PLAY_CLOSE_WINDOW_CB: i32 = 0x12;
pub const PLAY_OPEN_WINDOW_CB: i32 = 0x13;
pub const PLAY_WINDOW_ITEMS_CB: i32 = 0x14;
pub const PLAY_SET_SLOT_CB: i32 = 0x16;
pub const PLAY_PLUGIN_MESSAGE_CB: i32 = 0x18;
pub const PLAY_DISCONNECT_CB: i32 = 0x1A;
pub const PLAY_UNLOAD_CHUNK_CB: i32 = 0x1D;
pub const PLAY_KEEP_ALIVE_CB: i32 = 0x1F;
pub const PLAY_CHUNK_DATA_CB: i32 = 0x20;
pub const PLAY_JOIN_GAME_CB: i32 = 0x23;
pub const PLAY_ENTITY_RELATIVE_MOVE_CB: i32 = 0x26;
pub const PLAY_ENTITY_LOOK_AND_RELATIVE_MOVE_CB: i32 = 0x27;
pub const PLAY_PLAYER_ABILITIES_CB: i32 = 0x2B;
pub const PLAY_PLAYER_LIST_ITEM_CB: i32 = 0x2D;
pub const PLAY_PLAYER_POSITION_AND_LOOK_CB: i32 = 0x2E;
pub const PLAY_DESTROY_ENTITIES_CB: i32 = 0x30;
pub const PLAY_RESPAWN_CB: i32 = 0x33;
pub const PLAY_ENTITY_HEAD_LOOK_CB: i32 = 0x34;
pub const PLAY_WORLD_BORDER_CB: i32 = 0x36;
pub const PLAY_HELD_ITEM_CHANGE_CB: i32 = 0x38;
pub const PLAY_ENTITY_METADATA_CB: i32 = 0x3A;
pub const PLAY_ENTITY_VELOCITY_CB: i32 = 0x3C;
pub const PLAY_UPDATE_HEALTH_CB: i32 = 0x3F;
pub const PLAY_SPAWN_POSITION_CB: i32 = 0x44;
pub const PLAY_TIME_UPDATE_CB: i32 = 0x45;
pub const PLAY_ENTITY_TELEPORT_CB: i32 = 0x4A;

// --- Play: serverbound (Protocol.h) ---
pub const PLAY_TELEPORT_CONFIRM_SB: i32 = 0x00;
pub const PLAY_CHAT_MESSAGE_SB: i32 = 0x02;
pub const PLAY_CLIENT_STATUS_SB: i32 = 0x03;
pub const PLAY_CLIENT_SETTINGS_SB: i32 = 0x04;
pub const PLAY_CONFIRM_TRANSACTION_SB: i32 = 0x05;
pub const PLAY_CLICK_WINDOW_SB: i32 = 0x07;
pub const PLAY_CLOSE_WINDOW_SB: i32 = 0x08;
pub const PLAY_PLUGIN_MESSAGE_SB: i32 = 0x09;
pub const PLAY_KEEP_ALIVE_SB: i32 = 0x0B;
pub const PLAY_PLAYER_POSITION_SB: i32 = 0x0C;
pub const PLAY_PLAYER_POSITION_AND_LOOK_SB: i32 = 0x0D;
pub const PLAY_PLAYER_LOOK_SB: i32 = 0x0E;
pub const PLAY_PLAYER_SB: i32 = 0x0F;
pub const PLAY_PLAYER_ABILITIES_SB: i32 = 0x12;
pub const PLAY_PLAYER_DIGGING_SB: i32 = 0x13;
pub const PLAY_ENTITY_ACTION_SB: i32 = 0x14;
pub const PLAY_HELD_ITEM_CHANGE_SB: i32 = 0x17;
pub const PLAY_CREATIVE_INVENTORY_ACTION_SB: i32 = 0x18;
pub const PLAY_ANIMATION_SB: i32 = 0x1A;
pub const PLAY_PLAYER_BLOCK_PLACEMENT_SB: i32 = 0x1C;

/// Legacy (pre-1.13) Slot wire format: a 16-bit item id with `-1` meaning
/// empty, followed — only if present — by count, damage, and an NBT tag
/// (or a lone `TAG_END` byte for "no tag"). Grounded in
/// `Slot::Deserialize`/`Slot::Serialize` for `version <= Minecraft_1_12_2`.
pub fn read_slot_legacy(buf: &mut BytesMut) -> CodecResult<Slot> {
    let mut db = mclib_protocol_core::DataBuffer::from_bytes(std::mem::take(buf));
    let item_id = db.read_i16()? as i32;
    let slot = if item_id == -1 {
        Slot::empty()
    } else {
        let count = db.read_u8()?;
        let damage = db.read_i16()?;
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
            damage,
            nbt,
        }
    };
    *buf = db.into_inner();
    Ok(slot)
}

pub fn write_slot_legacy(buf: &mut BytesMut, slot: &Slot) {
    let mut db = mclib_protocol_core::DataBuffer::from_bytes(std::mem::take(buf));
    if slot.is_empty() {
        db.write_i16(-1);
    } else {
        db.write_i16(slot.item_id as i16);
        db.write_u8(slot.count);
        db.write_i16(slot.damage);
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
        write_slot_legacy(&mut buf, &Slot::empty());
        assert_eq!(read_slot_legacy(&mut buf).unwrap(), Slot::empty());
    }

    #[test]
    fn test_populated_slot_roundtrip_no_nbt() {
        let slot = Slot::new(280, 3);
        let mut buf = BytesMut::new();
        write_slot_legacy(&mut buf, &slot);
        let decoded = read_slot_legacy(&mut buf).unwrap();
        assert_eq!(decoded.item_id, 280);
        assert_eq!(decoded.count, 3);
        assert_eq!(decoded.nbt, None);
    }

    #[test]
    fn test_populated_slot_roundtrip_with_nbt() {
        let mut slot = Slot::new(278, 1);
        slot.nbt = Some(mclib_nbt::nbt_compound! { "ench" => mclib_nbt::NbtValue::List(vec![]) });
        let mut buf = BytesMut::new();
        write_slot_legacy(&mut buf, &slot);
        let decoded = read_slot_legacy(&mut buf).unwrap();
        assert_eq!(decoded.nbt, slot.nbt);
    }
}
