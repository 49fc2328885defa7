use bytes::BytesMut;
use mclib_protocol_core::{
    agnostic_id, BlockEntityUpdate, ChunkDataPayload, CodecError, DataBuffer, DecodeError,
    InternalPacket, PlayerListAction, ProtocolAdapter, ProtocolState, RegistryError,
};
use mclib_types::{GameMode, GameProfile, TextComponent};
use uuid::Uuid;

use crate::registries::*;

/// Legacy-era (pre-1.13) client adapter: protocol 340, numeric Slot format,
/// numeric block/item ids (no flattening). Wire ids grounded in
/// `Protocol.h`'s serverbound `GetPacketId` table and the historical
/// clientbound play-packet ordering for this release line.
pub struct V1_12_2Adapter;

impl V1_12_2Adapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for V1_12_2Adapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolAdapter for V1_12_2Adapter {
    fn protocol_version(&self) -> i32 {
        340
    }

    fn decode_packet(
        &self,
        state: ProtocolState,
        wire_id: i32,
        data: &mut BytesMut,
    ) -> Result<InternalPacket, DecodeError> {
        match state {
            ProtocolState::Handshake => Err(RegistryError::UnknownInboundPacket {
                state,
                wire_id,
            }
            .into()),
            ProtocolState::Status => decode_status(wire_id, data),
            ProtocolState::Login => decode_login(wire_id, data),
            ProtocolState::Play => decode_play(wire_id, data),
        }
    }

    fn encode_packet(
        &self,
        state: ProtocolState,
        packet: &InternalPacket,
    ) -> Result<BytesMut, RegistryError> {
        let fields = match state {
            ProtocolState::Handshake => encode_handshake(packet),
            ProtocolState::Status => encode_status(packet),
            ProtocolState::Login => encode_login(packet),
            ProtocolState::Play => encode_play(packet),
        }?;
        let wire_id = serverbound_wire_id(packet).ok_or_else(|| unsupported(packet, 340))?;
        let mut framed = DataBuffer::new();
        framed.write_varint(wire_id);
        framed.write_bytes(&fields);
        Ok(framed.into_inner())
    }
}

fn unsupported(packet: &InternalPacket, version: i32) -> RegistryError {
    RegistryError::UnsupportedOutboundPacket {
        packet: format!("{:?}", std::mem::discriminant(packet)),
        version,
    }
}

// === Handshake: client only ever encodes this one. ===

fn encode_handshake(packet: &InternalPacket) -> Result<BytesMut, RegistryError> {
    match packet {
        InternalPacket::Handshake {
            protocol_version,
            server_address,
            server_port,
            next_state,
        } => {
            let mut db = DataBuffer::new();
            db.write_varint(*protocol_version);
            db.write_string(server_address);
            db.write_u16(*server_port);
            db.write_varint(*next_state);
            Ok(db.into_inner())
        }
        other => Err(unsupported(other, 340)),
    }
}

// === Status ===

fn decode_status(wire_id: i32, data: &mut BytesMut) -> Result<InternalPacket, DecodeError> {
    let mut db = DataBuffer::from_bytes(std::mem::take(data));
    match wire_id {
        STATUS_RESPONSE_CB => {
            let json_response = db.read_string(1 << 20)?;
            Ok(InternalPacket::StatusResponse { json_response })
        }
        PONG_CB => {
            let payload = db.read_i64()?;
            Ok(InternalPacket::Pong { payload })
        }
        other => Err(RegistryError::UnknownInboundPacket {
            state: ProtocolState::Status,
            wire_id: other,
        }
        .into()),
    }
}

fn encode_status(packet: &InternalPacket) -> Result<BytesMut, RegistryError> {
    let mut db = DataBuffer::new();
    match packet {
        InternalPacket::StatusRequest => {
            Ok(db.into_inner())
        }
        InternalPacket::Ping { payload } => {
            db.write_i64(*payload);
            Ok(db.into_inner())
        }
        other => Err(unsupported(other, 340)),
    }
}

// === Login ===

fn decode_login(wire_id: i32, data: &mut BytesMut) -> Result<InternalPacket, DecodeError> {
    let mut db = DataBuffer::from_bytes(std::mem::take(data));
    match wire_id {
        LOGIN_DISCONNECT_CB => {
            let reason_json = db.read_string(1 << 20)?;
            Ok(InternalPacket::LoginDisconnect {
                reason: TextComponent::plain(reason_json),
            })
        }
        ENCRYPTION_REQUEST_CB => {
            let server_id = db.read_string(20)?;
            let public_key = db.read_byte_array()?;
            let verify_token = db.read_byte_array()?;
            Ok(InternalPacket::EncryptionRequest {
                server_id,
                public_key,
                verify_token,
            })
        }
        LOGIN_SUCCESS_CB => {
            let uuid_str = db.read_string(36)?;
            let username = db.read_string(16)?;
            let uuid = Uuid::parse_str(&uuid_str)
                .or_else(|_| Uuid::parse_str(&uuid_str.replace('-', "")))
                .map_err(|_| CodecError::StringTooLong(uuid_str.len(), 36))?;
            Ok(InternalPacket::LoginSuccess { uuid, username })
        }
        SET_COMPRESSION_CB => {
            let threshold = db.read_varint()?;
            Ok(InternalPacket::SetCompression { threshold })
        }
        other => Err(RegistryError::UnknownInboundPacket {
            state: ProtocolState::Login,
            wire_id: other,
        }
        .into()),
    }
}

fn encode_login(packet: &InternalPacket) -> Result<BytesMut, RegistryError> {
    let mut db = DataBuffer::new();
    match packet {
        InternalPacket::LoginStart { username } => {
            db.write_string(username);
            Ok(db.into_inner())
        }
        InternalPacket::EncryptionResponse {
            shared_secret,
            verify_token,
        } => {
            db.write_byte_array(shared_secret);
            db.write_byte_array(verify_token);
            Ok(db.into_inner())
        }
        other => Err(unsupported(other, 340)),
    }
}

// === Play ===

fn decode_play(wire_id: i32, data: &mut BytesMut) -> Result<InternalPacket, DecodeError> {
    let mut db = DataBuffer::from_bytes(std::mem::take(data));
    Ok(match wire_id {
        PLAY_KEEP_ALIVE_CB => InternalPacket::KeepAliveClientbound {
            payload: db.read_varint()? as i64,
        },
        PLAY_JOIN_GAME_CB => {
            let entity_id = db.read_i32()?;
            let game_mode_byte = db.read_u8()?;
            let dimension = db.read_i32()?;
            let difficulty = db.read_u8()?;
            let max_players = db.read_u8()?;
            let level_type = db.read_string(16)?;
            let reduced_debug_info = db.read_bool()?;
            InternalPacket::JoinGame {
                entity_id,
                game_mode: game_mode_from_byte(game_mode_byte & 0x7),
                dimension,
                difficulty,
                max_players,
                level_type,
                reduced_debug_info,
            }
        }
        PLAY_CHAT_MESSAGE_CB => {
            let json = db.read_string(1 << 18)?;
            let position = db.read_u8()?;
            InternalPacket::ChatMessageClientbound {
                message: TextComponent::plain(json),
                position,
            }
        }
        PLAY_DISCONNECT_CB => {
            let json = db.read_string(1 << 18)?;
            InternalPacket::DisconnectPlay {
                reason: TextComponent::plain(json),
            }
        }
        PLAY_CHUNK_DATA_CB => {
            let chunk_x = db.read_i32()?;
            let chunk_z = db.read_i32()?;
            let continuous = db.read_bool()?;
            let primary_bit_mask = db.read_varint()? as u32;
            let data_len = db.read_varint()? as usize;
            let raw = db.read_fixed_bytes(data_len)?;
            let block_entity_count = db.read_varint()?;
            let mut block_entities = Vec::with_capacity(block_entity_count.max(0) as usize);
            for _ in 0..block_entity_count.max(0) {
                block_entities.push(db.read_nbt()?);
            }
            InternalPacket::ChunkData(ChunkDataPayload {
                chunk_x,
                chunk_z,
                continuous,
                primary_bit_mask,
                sky_light: true,
                data: raw,
                block_entities,
            })
        }
        PLAY_UNLOAD_CHUNK_CB => InternalPacket::UnloadChunk {
            chunk_x: db.read_i32()?,
            chunk_z: db.read_i32()?,
        },
        PLAY_BLOCK_CHANGE_CB => {
            let position = db.read_position()?;
            let block_state_id = db.read_varint()?;
            InternalPacket::BlockChange {
                position,
                block_state_id,
            }
        }
        PLAY_PLAYER_POSITION_AND_LOOK_CB => {
            let x = db.read_f64()?;
            let y = db.read_f64()?;
            let z = db.read_f64()?;
            let yaw = db.read_f32()?;
            let pitch = db.read_f32()?;
            let flags = db.read_u8()?;
            let teleport_id = db.read_varint()?;
            InternalPacket::PlayerPositionAndLookClientbound {
                position: mclib_types::Vec3d::new(x, y, z),
                yaw,
                pitch,
                flags,
                teleport_id,
            }
        }
        PLAY_RESPAWN_CB => {
            let dimension = db.read_i32()?;
            let difficulty = db.read_u8()?;
            let game_mode_byte = db.read_u8()?;
            let level_type = db.read_string(16)?;
            InternalPacket::Respawn {
                dimension,
                difficulty,
                game_mode: game_mode_from_byte(game_mode_byte & 0x7),
                level_type,
            }
        }
        PLAY_UPDATE_HEALTH_CB => InternalPacket::UpdateHealth {
            health: db.read_f32()?,
            food: db.read_varint()?,
            saturation: db.read_f32()?,
        },
        PLAY_TIME_UPDATE_CB => InternalPacket::TimeUpdate {
            world_age: db.read_i64()?,
            time_of_day: db.read_i64()?,
        },
        PLAY_SPAWN_POSITION_CB => InternalPacket::SpawnPosition {
            location: db.read_position()?,
        },
        PLAY_WINDOW_ITEMS_CB => {
            let window_id = db.read_u8()?;
            let count = db.read_i16()?;
            let mut slots = Vec::with_capacity(count.max(0) as usize);
            for _ in 0..count.max(0) {
                slots.push(read_slot_legacy(db.as_mut())?);
            }
            InternalPacket::WindowItems { window_id, slots }
        }
        PLAY_SET_SLOT_CB => {
            let window_id = db.read_i8()?;
            let slot_index = db.read_i16()?;
            let slot = read_slot_legacy(db.as_mut())?;
            InternalPacket::SetSlot {
                window_id,
                slot_index,
                slot,
            }
        }
        PLAY_OPEN_WINDOW_CB => {
            let window_id = db.read_u8()?;
            let window_type = db.read_string(32)?;
            let title_json = db.read_string(1 << 14)?;
            let slot_count = db.read_u8()?;
            InternalPacket::OpenWindow {
                window_id,
                window_type,
                title: TextComponent::plain(title_json),
                slot_count,
            }
        }
        PLAY_CLOSE_WINDOW_CB => InternalPacket::CloseWindowClientbound {
            window_id: db.read_u8()?,
        },
        PLAY_CONFIRM_TRANSACTION_CB => {
            let window_id = db.read_u8()?;
            let action = db.read_i16()?;
            let accepted = db.read_bool()?;
            InternalPacket::ConfirmTransactionClientbound {
                window_id,
                action,
                accepted,
            }
        }
        PLAY_DESTROY_ENTITIES_CB => {
            let count = db.read_varint()?;
            let mut entity_ids = Vec::with_capacity(count.max(0) as usize);
            for _ in 0..count.max(0) {
                entity_ids.push(db.read_varint()?);
            }
            InternalPacket::DestroyEntities { entity_ids }
        }
        PLAY_ENTITY_VELOCITY_CB => InternalPacket::EntityVelocity {
            entity_id: db.read_varint()?,
            velocity_x: db.read_i16()?,
            velocity_y: db.read_i16()?,
            velocity_z: db.read_i16()?,
        },
        PLAY_ENTITY_RELATIVE_MOVE_CB => {
            let entity_id = db.read_varint()?;
            let delta_x = db.read_i16()?;
            let delta_y = db.read_i16()?;
            let delta_z = db.read_i16()?;
            let on_ground = db.read_bool()?;
            InternalPacket::EntityRelativeMove {
                entity_id,
                delta_x,
                delta_y,
                delta_z,
                on_ground,
            }
        }
        PLAY_ENTITY_LOOK_AND_RELATIVE_MOVE_CB => {
            let entity_id = db.read_varint()?;
            let delta_x = db.read_i16()?;
            let delta_y = db.read_i16()?;
            let delta_z = db.read_i16()?;
            let yaw = angle_to_deg(db.read_u8()?);
            let pitch = angle_to_deg(db.read_u8()?);
            let on_ground = db.read_bool()?;
            InternalPacket::EntityLookAndRelativeMove {
                entity_id,
                delta_x,
                delta_y,
                delta_z,
                yaw,
                pitch,
                on_ground,
            }
        }
        PLAY_ENTITY_TELEPORT_CB => {
            let entity_id = db.read_varint()?;
            let x = db.read_f64()?;
            let y = db.read_f64()?;
            let z = db.read_f64()?;
            let yaw = angle_to_deg(db.read_u8()?);
            let pitch = angle_to_deg(db.read_u8()?);
            let on_ground = db.read_bool()?;
            InternalPacket::EntityTeleport {
                entity_id,
                position: mclib_types::Vec3d::new(x, y, z),
                yaw,
                pitch,
                on_ground,
            }
        }
        PLAY_SPAWN_PLAYER_CB => {
            let entity_id = db.read_varint()?;
            let uuid = db.read_uuid()?;
            let x = db.read_f64()?;
            let y = db.read_f64()?;
            let z = db.read_f64()?;
            let yaw = angle_to_deg(db.read_u8()?);
            let pitch = angle_to_deg(db.read_u8()?);
            InternalPacket::SpawnPlayer {
                entity_id,
                uuid,
                position: mclib_types::Vec3d::new(x, y, z),
                yaw,
                pitch,
            }
        }
        PLAY_SPAWN_OBJECT_CB => {
            let entity_id = db.read_varint()?;
            let uuid = db.read_uuid()?;
            let object_type = db.read_i8()? as i32;
            let x = db.read_f64()?;
            let y = db.read_f64()?;
            let z = db.read_f64()?;
            let pitch = angle_to_deg(db.read_u8()?);
            let yaw = angle_to_deg(db.read_u8()?);
            let data = db.read_i32()?;
            db.read_i16()?;
            db.read_i16()?;
            db.read_i16()?;
            InternalPacket::SpawnObject {
                entity_id,
                uuid,
                object_type,
                position: mclib_types::Vec3d::new(x, y, z),
                yaw,
                pitch,
                data,
            }
        }
        PLAY_SPAWN_LIVING_ENTITY_CB => {
            let entity_id = db.read_varint()?;
            let uuid = db.read_uuid()?;
            let entity_type = db.read_varint()?;
            let x = db.read_f64()?;
            let y = db.read_f64()?;
            let z = db.read_f64()?;
            let yaw = angle_to_deg(db.read_u8()?);
            let pitch = angle_to_deg(db.read_u8()?);
            InternalPacket::SpawnLivingEntity {
                entity_id,
                uuid,
                entity_type,
                position: mclib_types::Vec3d::new(x, y, z),
                yaw,
                pitch,
            }
        }
        PLAY_ENTITY_METADATA_CB => {
            let entity_id = db.read_varint()?;
            let raw = db.as_mut().to_vec();
            db.as_mut().clear();
            InternalPacket::EntityMetadata { entity_id, raw }
        }
        PLAY_ENTITY_HEAD_LOOK_CB => InternalPacket::EntityHeadLook {
            entity_id: db.read_varint()?,
            head_yaw: angle_to_deg(db.read_u8()?),
        },
        PLAY_PLAYER_ABILITIES_CB => InternalPacket::PlayerAbilitiesClientbound {
            flags: db.read_u8()?,
            flying_speed: db.read_f32()?,
            walking_speed: db.read_f32()?,
        },
        PLAY_PLUGIN_MESSAGE_CB => {
            let channel = db.read_string(64)?;
            let data = db.as_mut().to_vec();
            db.as_mut().clear();
            InternalPacket::PluginMessageClientbound { channel, data }
        }
        PLAY_SERVER_DIFFICULTY_CB => InternalPacket::ServerDifficulty {
            difficulty: db.read_u8()?,
        },
        PLAY_HELD_ITEM_CHANGE_CB => InternalPacket::HeldItemChangeClientbound {
            slot: db.read_u8()?,
        },
        PLAY_ANIMATION_CB => InternalPacket::AnimationClientbound {
            entity_id: db.read_varint()?,
            animation: db.read_u8()?,
        },
        PLAY_WORLD_BORDER_CB => {
            let raw = db.as_mut().to_vec();
            db.as_mut().clear();
            InternalPacket::WorldBorder { raw }
        }
        PLAY_BLOCK_ENTITY_DATA_CB => {
            let position = db.read_position()?;
            let action = db.read_u8()?;
            let nbt = db.read_nbt()?;
            InternalPacket::BlockEntityData(BlockEntityUpdate {
                position,
                action,
                nbt,
            })
        }
        PLAY_PLAYER_LIST_ITEM_CB => {
            let action_id = db.read_varint()?;
            let count = db.read_varint()?;
            let mut actions = Vec::with_capacity(count.max(0) as usize);
            for _ in 0..count.max(0) {
                let uuid = db.read_uuid()?;
                actions.push(match action_id {
                    0 => {
                        let name = db.read_string(16)?;
                        let property_count = db.read_varint()?;
                        for _ in 0..property_count.max(0) {
                            let _name = db.read_string(64)?;
                            let _value = db.read_string(1 << 16)?;
                            if db.read_bool()? {
                                db.read_string(1 << 16)?;
                            }
                        }
                        let game_mode = game_mode_from_byte(db.read_varint()? as u8);
                        let ping = db.read_varint()?;
                        let display_name = if db.read_bool()? {
                            Some(TextComponent::plain(db.read_string(1 << 18)?))
                        } else {
                            None
                        };
                        PlayerListAction::AddPlayer {
                            profile: GameProfile {
                                uuid,
                                name,
                                properties: Vec::new(),
                            },
                            game_mode,
                            ping,
                            display_name,
                        }
                    }
                    1 => PlayerListAction::UpdateGameMode {
                        uuid,
                        game_mode: game_mode_from_byte(db.read_varint()? as u8),
                    },
                    2 => PlayerListAction::UpdateLatency {
                        uuid,
                        ping: db.read_varint()?,
                    },
                    3 => {
                        let display_name = if db.read_bool()? {
                            Some(TextComponent::plain(db.read_string(1 << 18)?))
                        } else {
                            None
                        };
                        PlayerListAction::UpdateDisplayName { uuid, display_name }
                    }
                    4 => PlayerListAction::RemovePlayer { uuid },
                    _ => {
                        return Err(RegistryError::InvalidPacketLayout(format!(
                            "unknown PlayerListItem action {action_id}"
                        ))
                        .into())
                    }
                });
            }
            InternalPacket::PlayerListItem { actions }
        }
        PLAY_MULTI_BLOCK_CHANGE_CB => {
            let chunk_x = db.read_i32()?;
            let chunk_z = db.read_i32()?;
            let count = db.read_varint()?;
            let mut changes = Vec::with_capacity(count.max(0) as usize);
            for _ in 0..count.max(0) {
                let xz = db.read_u8()?;
                let y = db.read_u8()?;
                let block_state_id = db.read_varint()?;
                changes.push((xz >> 4, y, xz & 0x0F, block_state_id));
            }
            InternalPacket::MultiBlockChange {
                chunk_x,
                chunk_z,
                changes,
            }
        }
        other => {
            return Err(RegistryError::UnknownInboundPacket {
                state: ProtocolState::Play,
                wire_id: other,
            }
            .into())
        }
    })
}

fn encode_play(packet: &InternalPacket) -> Result<BytesMut, RegistryError> {
    let mut db = DataBuffer::new();
    match packet {
        InternalPacket::TeleportConfirm { teleport_id } => {
            db.write_varint(*teleport_id);
        }
        InternalPacket::KeepAliveServerbound { payload } => {
            db.write_varint(*payload as i32);
        }
        InternalPacket::ChatMessageServerbound { message } => {
            db.write_string(message);
        }
        InternalPacket::ClientStatus { action_id } => {
            db.write_varint(*action_id);
        }
        InternalPacket::ClientSettings {
            locale,
            view_distance,
            chat_mode,
            chat_colors,
            displayed_skin_parts,
            main_hand,
        } => {
            db.write_string(locale);
            db.write_i8(*view_distance);
            db.write_varint(*chat_mode);
            db.write_bool(*chat_colors);
            db.write_u8(*displayed_skin_parts);
            db.write_varint(*main_hand);
        }
        InternalPacket::ConfirmTransactionServerbound {
            window_id,
            action,
            accepted,
        } => {
            db.write_i8(*window_id);
            db.write_i16(*action);
            db.write_bool(*accepted);
        }
        InternalPacket::ClickWindow {
            window_id,
            slot,
            button,
            action,
            mode,
            clicked_item,
        } => {
            db.write_i8(*window_id);
            db.write_i16(*slot);
            db.write_i8(*button);
            db.write_i16(*action);
            db.write_varint(*mode);
            write_slot_legacy(db.as_mut(), clicked_item);
        }
        InternalPacket::CloseWindowServerbound { window_id } => {
            db.write_u8(*window_id);
        }
        InternalPacket::PluginMessageServerbound { channel, data } => {
            db.write_string(channel);
            db.write_bytes(data);
        }
        InternalPacket::PlayerPositionServerbound {
            position,
            on_ground,
        } => {
            db.write_f64(position.x);
            db.write_f64(position.y);
            db.write_f64(position.z);
            db.write_bool(*on_ground);
        }
        InternalPacket::PlayerPositionAndLookServerbound {
            position,
            yaw,
            pitch,
            on_ground,
        } => {
            db.write_f64(position.x);
            db.write_f64(position.y);
            db.write_f64(position.z);
            db.write_f32(*yaw);
            db.write_f32(*pitch);
            db.write_bool(*on_ground);
        }
        InternalPacket::PlayerLookServerbound {
            yaw,
            pitch,
            on_ground,
        } => {
            db.write_f32(*yaw);
            db.write_f32(*pitch);
            db.write_bool(*on_ground);
        }
        InternalPacket::PlayerServerbound { on_ground } => {
            db.write_bool(*on_ground);
        }
        InternalPacket::PlayerAbilitiesServerbound {
            flags,
            flying_speed,
            walking_speed,
        } => {
            db.write_u8(*flags);
            db.write_f32(*flying_speed);
            db.write_f32(*walking_speed);
        }
        InternalPacket::PlayerDigging {
            status,
            position,
            face,
        } => {
            db.write_varint(*status);
            db.write_position(position);
            db.write_i8(*face);
        }
        InternalPacket::EntityAction {
            entity_id,
            action_id,
            jump_boost,
        } => {
            db.write_varint(*entity_id);
            db.write_varint(*action_id);
            db.write_varint(*jump_boost);
        }
        InternalPacket::HeldItemChangeServerbound { slot } => {
            db.write_i16(*slot);
        }
        InternalPacket::CreativeInventoryAction {
            slot,
            clicked_item,
        } => {
            db.write_i16(*slot);
            write_slot_legacy(db.as_mut(), clicked_item);
        }
        InternalPacket::AnimationServerbound { hand } => {
            db.write_varint(*hand);
        }
        InternalPacket::PlayerBlockPlacement {
            position,
            face,
            hand,
            cursor_x,
            cursor_y,
            cursor_z,
        } => {
            db.write_position(position);
            db.write_varint(*face);
            db.write_varint(*hand);
            db.write_f32(*cursor_x);
            db.write_f32(*cursor_y);
            db.write_f32(*cursor_z);
        }
        other => return Err(unsupported(other, 340)),
    }
    Ok(db.into_inner())
}

fn game_mode_from_byte(b: u8) -> GameMode {
    match b {
        1 => GameMode::Creative,
        2 => GameMode::Adventure,
        3 => GameMode::Spectator,
        _ => GameMode::Survival,
    }
}

fn angle_to_deg(angle: u8) -> f32 {
    angle as f32 * 360.0 / 256.0
}

// Wire-id lookup used by the outbound path to attach the right
// packet-type byte before the adapter's payload; kept here so the id
// constants and their packet-shape partners stay next to each other.
pub fn serverbound_wire_id(packet: &InternalPacket) -> Option<i32> {
    Some(match packet {
        InternalPacket::Handshake { .. } => 0x00,
        InternalPacket::StatusRequest => STATUS_REQUEST_SB,
        InternalPacket::Ping { .. } => PING_SB,
        InternalPacket::LoginStart { .. } => LOGIN_START_SB,
        InternalPacket::EncryptionResponse { .. } => ENCRYPTION_RESPONSE_SB,
        InternalPacket::TeleportConfirm { .. } => PLAY_TELEPORT_CONFIRM_SB,
        InternalPacket::ChatMessageServerbound { .. } => PLAY_CHAT_MESSAGE_SB,
        InternalPacket::ClientStatus { .. } => PLAY_CLIENT_STATUS_SB,
        InternalPacket::ClientSettings { .. } => PLAY_CLIENT_SETTINGS_SB,
        InternalPacket::ConfirmTransactionServerbound { .. } => PLAY_CONFIRM_TRANSACTION_SB,
        InternalPacket::ClickWindow { .. } => PLAY_CLICK_WINDOW_SB,
        InternalPacket::CloseWindowServerbound { .. } => PLAY_CLOSE_WINDOW_SB,
        InternalPacket::PluginMessageServerbound { .. } => PLAY_PLUGIN_MESSAGE_SB,
        InternalPacket::KeepAliveServerbound { .. } => PLAY_KEEP_ALIVE_SB,
        InternalPacket::PlayerPositionServerbound { .. } => PLAY_PLAYER_POSITION_SB,
        InternalPacket::PlayerPositionAndLookServerbound { .. } => {
            PLAY_PLAYER_POSITION_AND_LOOK_SB
        }
        InternalPacket::PlayerLookServerbound { .. } => PLAY_PLAYER_LOOK_SB,
        InternalPacket::PlayerServerbound { .. } => PLAY_PLAYER_SB,
        InternalPacket::PlayerAbilitiesServerbound { .. } => PLAY_PLAYER_ABILITIES_SB,
        InternalPacket::PlayerDigging { .. } => PLAY_PLAYER_DIGGING_SB,
        InternalPacket::EntityAction { .. } => PLAY_ENTITY_ACTION_SB,
        InternalPacket::HeldItemChangeServerbound { .. } => PLAY_HELD_ITEM_CHANGE_SB,
        InternalPacket::CreativeInventoryAction { .. } => PLAY_CREATIVE_INVENTORY_ACTION_SB,
        InternalPacket::AnimationServerbound { .. } => PLAY_ANIMATION_SB,
        InternalPacket::PlayerBlockPlacement { .. } => PLAY_PLAYER_BLOCK_PLACEMENT_SB,
        _ => return None,
    })
}

pub fn inbound_agnostic_id(state: ProtocolState, wire_id: i32) -> Option<u32> {
    use agnostic_id::*;
    Some(match (state, wire_id) {
        (ProtocolState::Status, STATUS_RESPONSE_CB) => STATUS_RESPONSE,
        (ProtocolState::Status, PONG_CB) => PONG,
        (ProtocolState::Login, LOGIN_DISCONNECT_CB) => LOGIN_DISCONNECT,
        (ProtocolState::Login, ENCRYPTION_REQUEST_CB) => ENCRYPTION_REQUEST,
        (ProtocolState::Login, LOGIN_SUCCESS_CB) => LOGIN_SUCCESS,
        (ProtocolState::Login, SET_COMPRESSION_CB) => SET_COMPRESSION,
        (ProtocolState::Play, PLAY_KEEP_ALIVE_CB) => KEEP_ALIVE_CLIENTBOUND,
        (ProtocolState::Play, PLAY_JOIN_GAME_CB) => JOIN_GAME,
        (ProtocolState::Play, PLAY_CHAT_MESSAGE_CB) => CHAT_MESSAGE_CLIENTBOUND,
        (ProtocolState::Play, PLAY_DISCONNECT_CB) => DISCONNECT_PLAY,
        (ProtocolState::Play, PLAY_CHUNK_DATA_CB) => CHUNK_DATA,
        (ProtocolState::Play, PLAY_UNLOAD_CHUNK_CB) => UNLOAD_CHUNK,
        (ProtocolState::Play, PLAY_BLOCK_CHANGE_CB) => BLOCK_CHANGE,
        (ProtocolState::Play, PLAY_MULTI_BLOCK_CHANGE_CB) => MULTI_BLOCK_CHANGE,
        (ProtocolState::Play, PLAY_BLOCK_ENTITY_DATA_CB) => BLOCK_ENTITY_DATA,
        (ProtocolState::Play, PLAY_PLAYER_POSITION_AND_LOOK_CB) => {
            PLAYER_POSITION_AND_LOOK_CLIENTBOUND
        }
        (ProtocolState::Play, PLAY_RESPAWN_CB) => RESPAWN,
        (ProtocolState::Play, PLAY_UPDATE_HEALTH_CB) => UPDATE_HEALTH,
        (ProtocolState::Play, PLAY_TIME_UPDATE_CB) => TIME_UPDATE,
        (ProtocolState::Play, PLAY_SPAWN_POSITION_CB) => SPAWN_POSITION,
        (ProtocolState::Play, PLAY_WINDOW_ITEMS_CB) => WINDOW_ITEMS,
        (ProtocolState::Play, PLAY_SET_SLOT_CB) => SET_SLOT,
        (ProtocolState::Play, PLAY_OPEN_WINDOW_CB) => OPEN_WINDOW,
        (ProtocolState::Play, PLAY_CLOSE_WINDOW_CB) => CLOSE_WINDOW_CLIENTBOUND,
        (ProtocolState::Play, PLAY_CONFIRM_TRANSACTION_CB) => CONFIRM_TRANSACTION_CLIENTBOUND,
        (ProtocolState::Play, PLAY_SPAWN_LIVING_ENTITY_CB) => SPAWN_LIVING_ENTITY,
        (ProtocolState::Play, PLAY_SPAWN_PLAYER_CB) => SPAWN_PLAYER,
        (ProtocolState::Play, PLAY_SPAWN_OBJECT_CB) => SPAWN_OBJECT,
        (ProtocolState::Play, PLAY_DESTROY_ENTITIES_CB) => DESTROY_ENTITIES,
        (ProtocolState::Play, PLAY_ENTITY_RELATIVE_MOVE_CB) => ENTITY_RELATIVE_MOVE,
        (ProtocolState::Play, PLAY_ENTITY_LOOK_AND_RELATIVE_MOVE_CB) => {
            ENTITY_LOOK_AND_RELATIVE_MOVE
        }
        (ProtocolState::Play, PLAY_ENTITY_TELEPORT_CB) => ENTITY_TELEPORT,
        (ProtocolState::Play, PLAY_ENTITY_VELOCITY_CB) => ENTITY_VELOCITY,
        (ProtocolState::Play, PLAY_ENTITY_METADATA_CB) => ENTITY_METADATA,
        (ProtocolState::Play, PLAY_ENTITY_HEAD_LOOK_CB) => ENTITY_HEAD_LOOK,
        (ProtocolState::Play, PLAY_PLAYER_LIST_ITEM_CB) => PLAYER_LIST_ITEM,
        (ProtocolState::Play, PLAY_PLAYER_ABILITIES_CB) => PLAYER_ABILITIES_CLIENTBOUND,
        (ProtocolState::Play, PLAY_PLUGIN_MESSAGE_CB) => PLUGIN_MESSAGE_CLIENTBOUND,
        (ProtocolState::Play, PLAY_SERVER_DIFFICULTY_CB) => SERVER_DIFFICULTY,
        (ProtocolState::Play, PLAY_HELD_ITEM_CHANGE_CB) => HELD_ITEM_CHANGE_CLIENTBOUND,
        (ProtocolState::Play, PLAY_ANIMATION_CB) => ANIMATION_CLIENTBOUND,
        (ProtocolState::Play, PLAY_WORLD_BORDER_CB) => WORLD_BORDER,
        _ => return None,
    })
}

// `BlockEntityUpdate` is re-exported for adapters/consumers downstream
// (mclib-world maps `ChunkDataPayload.block_entities` onto this shape);
// referenced here to keep the import used.
#[allow(dead_code)]
fn _assert_block_entity_update_in_scope(_: &BlockEntityUpdate) {}

#[cfg(test)]
mod tests {
    use super::*;
    use mclib_protocol_core::read_varint;

    #[test]
    fn test_encode_packet_prepends_wire_id() {
        let adapter = V1_12_2Adapter::new();
        let mut encoded = adapter
            .encode_packet(
                ProtocolState::Handshake,
                &InternalPacket::Handshake {
                    protocol_version: 340,
                    server_address: "localhost".to_string(),
                    server_port: 25565,
                    next_state: 2,
                },
            )
            .unwrap();
        let id = read_varint(&mut encoded).unwrap();
        assert_eq!(id, 0x00);
        assert_eq!(read_varint(&mut encoded).unwrap(), 340);
        let mut db = DataBuffer::from_bytes(encoded);
        assert_eq!(db.read_string(255).unwrap(), "localhost");
        assert_eq!(db.read_u16().unwrap(), 25565);
        assert_eq!(db.read_varint().unwrap(), 2);
    }

    #[test]
    fn test_encode_login_start_has_login_start_wire_id() {
        let adapter = V1_12_2Adapter::new();
        let mut encoded = adapter
            .encode_packet(
                ProtocolState::Login,
                &InternalPacket::LoginStart {
                    username: "T".to_string(),
                },
            )
            .unwrap();
        let id = read_varint(&mut encoded).unwrap();
        assert_eq!(id, LOGIN_START_SB);
    }

    #[test]
    fn test_encode_keep_alive_echo_has_play_keep_alive_wire_id() {
        let adapter = V1_12_2Adapter::new();
        let mut encoded = adapter
            .encode_packet(
                ProtocolState::Play,
                &InternalPacket::KeepAliveServerbound { payload: 7 },
            )
            .unwrap();
        let id = read_varint(&mut encoded).unwrap();
        assert_eq!(id, PLAY_KEEP_ALIVE_SB);
        assert_eq!(read_varint(&mut encoded).unwrap(), 7);
    }
}
