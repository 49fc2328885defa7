use mclib_nbt::NbtValue;
use mclib_types::{BlockPos, GameMode, GameProfile, Slot, TextComponent, Vec3d};
use uuid::Uuid;

/// A version-independent identifier for a packet kind, used as the
/// dispatcher's routing key alongside `ProtocolState`. Stable across
/// protocol versions even when wire ids differ (§4.5).
pub type AgnosticId = u32;

/// Canonical agnostic ids, one per `InternalPacket` variant. Adapters map
/// their own per-version wire ids onto these; callers register handlers
/// against these constants rather than raw wire ids.
pub mod agnostic_id {
    use super::AgnosticId;

    // Handshake
    pub const HANDSHAKE: AgnosticId = 0x0000;

    // Status
    pub const STATUS_REQUEST: AgnosticId = 0x0100;
    pub const STATUS_RESPONSE: AgnosticId = 0x0101;
    pub const PING: AgnosticId = 0x0102;
    pub const PONG: AgnosticId = 0x0103;

    // Login
    pub const LOGIN_START: AgnosticId = 0x0200;
    pub const ENCRYPTION_REQUEST: AgnosticId = 0x0201;
    pub const ENCRYPTION_RESPONSE: AgnosticId = 0x0202;
    pub const LOGIN_SUCCESS: AgnosticId = 0x0203;
    pub const LOGIN_DISCONNECT: AgnosticId = 0x0204;
    pub const SET_COMPRESSION: AgnosticId = 0x0205;

    // Play - clientbound
    pub const KEEP_ALIVE_CLIENTBOUND: AgnosticId = 0x0300;
    pub const JOIN_GAME: AgnosticId = 0x0301;
    pub const CHAT_MESSAGE_CLIENTBOUND: AgnosticId = 0x0302;
    pub const DISCONNECT_PLAY: AgnosticId = 0x0303;
    pub const CHUNK_DATA: AgnosticId = 0x0304;
    pub const UNLOAD_CHUNK: AgnosticId = 0x0305;
    pub const BLOCK_CHANGE: AgnosticId = 0x0306;
    pub const MULTI_BLOCK_CHANGE: AgnosticId = 0x0307;
    pub const PLAYER_POSITION_AND_LOOK_CLIENTBOUND: AgnosticId = 0x0308;
    pub const RESPAWN: AgnosticId = 0x0309;
    pub const UPDATE_HEALTH: AgnosticId = 0x030A;
    pub const TIME_UPDATE: AgnosticId = 0x030B;
    pub const SPAWN_POSITION: AgnosticId = 0x030C;
    pub const WINDOW_ITEMS: AgnosticId = 0x030D;
    pub const SET_SLOT: AgnosticId = 0x030E;
    pub const OPEN_WINDOW: AgnosticId = 0x030F;
    pub const CLOSE_WINDOW_CLIENTBOUND: AgnosticId = 0x0310;
    pub const CONFIRM_TRANSACTION_CLIENTBOUND: AgnosticId = 0x0311;
    pub const SPAWN_LIVING_ENTITY: AgnosticId = 0x0312;
    pub const SPAWN_PLAYER: AgnosticId = 0x0313;
    pub const SPAWN_OBJECT: AgnosticId = 0x0314;
    pub const DESTROY_ENTITIES: AgnosticId = 0x0315;
    pub const ENTITY_RELATIVE_MOVE: AgnosticId = 0x0316;
    pub const ENTITY_LOOK_AND_RELATIVE_MOVE: AgnosticId = 0x0317;
    pub const ENTITY_TELEPORT: AgnosticId = 0x0318;
    pub const ENTITY_VELOCITY: AgnosticId = 0x0319;
    pub const ENTITY_METADATA: AgnosticId = 0x031A;
    pub const ENTITY_HEAD_LOOK: AgnosticId = 0x031B;
    pub const PLAYER_LIST_ITEM: AgnosticId = 0x031C;
    pub const PLAYER_ABILITIES_CLIENTBOUND: AgnosticId = 0x031D;
    pub const PLUGIN_MESSAGE_CLIENTBOUND: AgnosticId = 0x031E;
    pub const SERVER_DIFFICULTY: AgnosticId = 0x031F;
    pub const HELD_ITEM_CHANGE_CLIENTBOUND: AgnosticId = 0x0320;
    pub const ANIMATION_CLIENTBOUND: AgnosticId = 0x0321;
    pub const BLOCK_ENTITY_DATA: AgnosticId = 0x0322;
    pub const WORLD_BORDER: AgnosticId = 0x0323;
    pub const EXPLOSION: AgnosticId = 0x0324;
    pub const OPEN_BOOK: AgnosticId = 0x0325;

    // Play - serverbound
    pub const KEEP_ALIVE_SERVERBOUND: AgnosticId = 0x0400;
    pub const CHAT_MESSAGE_SERVERBOUND: AgnosticId = 0x0401;
    pub const CLIENT_SETTINGS: AgnosticId = 0x0402;
    pub const PLAYER_POSITION_SERVERBOUND: AgnosticId = 0x0403;
    pub const PLAYER_POSITION_AND_LOOK_SERVERBOUND: AgnosticId = 0x0404;
    pub const PLAYER_LOOK_SERVERBOUND: AgnosticId = 0x0405;
    pub const PLAYER_SERVERBOUND: AgnosticId = 0x0406;
    pub const TELEPORT_CONFIRM: AgnosticId = 0x0407;
    pub const CLICK_WINDOW: AgnosticId = 0x0408;
    pub const CLOSE_WINDOW_SERVERBOUND: AgnosticId = 0x0409;
    pub const CONFIRM_TRANSACTION_SERVERBOUND: AgnosticId = 0x040A;
    pub const HELD_ITEM_CHANGE_SERVERBOUND: AgnosticId = 0x040B;
    pub const PLAYER_DIGGING: AgnosticId = 0x040C;
    pub const PLAYER_BLOCK_PLACEMENT: AgnosticId = 0x040D;
    pub const ANIMATION_SERVERBOUND: AgnosticId = 0x040E;
    pub const ENTITY_ACTION: AgnosticId = 0x040F;
    pub const CREATIVE_INVENTORY_ACTION: AgnosticId = 0x0410;
    pub const CLIENT_STATUS: AgnosticId = 0x0411;
    pub const PLUGIN_MESSAGE_SERVERBOUND: AgnosticId = 0x0412;
    pub const PLAYER_ABILITIES_SERVERBOUND: AgnosticId = 0x0413;

    pub const UNKNOWN: AgnosticId = 0xFFFF;
}

/// A block-entity update carried by `BlockEntityData` / chunk payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntityUpdate {
    pub position: BlockPos,
    pub action: u8,
    pub nbt: NbtValue,
}

/// One entry in a `PlayerListItem` batch (add/update only — the legacy
/// protocol folds add/remove/update-latency/update-gamemode into one
/// packet with an `action` discriminant; we keep that shape here rather
/// than splitting into four packets as post-1.19 does, since both of our
/// adapters predate that split).
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerListAction {
    AddPlayer {
        profile: GameProfile,
        game_mode: GameMode,
        ping: i32,
        display_name: Option<TextComponent>,
    },
    UpdateGameMode {
        uuid: Uuid,
        game_mode: GameMode,
    },
    UpdateLatency {
        uuid: Uuid,
        ping: i32,
    },
    UpdateDisplayName {
        uuid: Uuid,
        display_name: Option<TextComponent>,
    },
    RemovePlayer {
        uuid: Uuid,
    },
}

/// Raw, still-packed chunk column payload. `mclib-world` owns the bit
/// unpacking (§4.7); the packet layer only carries the bytes plus the
/// metadata needed to interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDataPayload {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub continuous: bool,
    pub primary_bit_mask: u32,
    pub sky_light: bool,
    pub data: Vec<u8>,
    pub block_entities: Vec<NbtValue>,
}

/// Version-agnostic in-memory representation of every packet this crate
/// exchanges. Inbound and outbound variants share one enum; the protocol
/// version adapters differ only in how they map these to/from wire bytes
/// (§4.5).
#[derive(Debug, Clone, PartialEq)]
pub enum InternalPacket {
    // --- Handshake ---
    Handshake {
        protocol_version: i32,
        server_address: String,
        server_port: u16,
        next_state: i32,
    },

    // --- Status ---
    StatusRequest,
    StatusResponse {
        json_response: String,
    },
    Ping {
        payload: i64,
    },
    Pong {
        payload: i64,
    },

    // --- Login ---
    LoginStart {
        username: String,
    },
    EncryptionRequest {
        server_id: String,
        public_key: Vec<u8>,
        verify_token: Vec<u8>,
    },
    EncryptionResponse {
        shared_secret: Vec<u8>,
        verify_token: Vec<u8>,
    },
    LoginSuccess {
        uuid: Uuid,
        username: String,
    },
    LoginDisconnect {
        reason: TextComponent,
    },
    SetCompression {
        threshold: i32,
    },

    // --- Play: clientbound ---
    KeepAliveClientbound {
        payload: i64,
    },
    JoinGame {
        entity_id: i32,
        game_mode: GameMode,
        dimension: i32,
        difficulty: u8,
        max_players: u8,
        level_type: String,
        reduced_debug_info: bool,
    },
    ChatMessageClientbound {
        message: TextComponent,
        position: u8,
    },
    DisconnectPlay {
        reason: TextComponent,
    },
    ChunkData(ChunkDataPayload),
    UnloadChunk {
        chunk_x: i32,
        chunk_z: i32,
    },
    BlockChange {
        position: BlockPos,
        block_state_id: i32,
    },
    MultiBlockChange {
        chunk_x: i32,
        chunk_z: i32,
        changes: Vec<(u8, u8, u8, i32)>,
    },
    PlayerPositionAndLookClientbound {
        position: Vec3d,
        yaw: f32,
        pitch: f32,
        flags: u8,
        teleport_id: i32,
    },
    Respawn {
        dimension: i32,
        difficulty: u8,
        game_mode: GameMode,
        level_type: String,
    },
    UpdateHealth {
        health: f32,
        food: i32,
        saturation: f32,
    },
    TimeUpdate {
        world_age: i64,
        time_of_day: i64,
    },
    SpawnPosition {
        location: BlockPos,
    },
    WindowItems {
        window_id: u8,
        slots: Vec<Slot>,
    },
    SetSlot {
        window_id: i8,
        slot_index: i16,
        slot: Slot,
    },
    OpenWindow {
        window_id: u8,
        window_type: String,
        title: TextComponent,
        slot_count: u8,
    },
    CloseWindowClientbound {
        window_id: u8,
    },
    ConfirmTransactionClientbound {
        window_id: u8,
        action: i16,
        accepted: bool,
    },
    SpawnLivingEntity {
        entity_id: i32,
        uuid: Uuid,
        entity_type: i32,
        position: Vec3d,
        yaw: f32,
        pitch: f32,
    },
    SpawnPlayer {
        entity_id: i32,
        uuid: Uuid,
        position: Vec3d,
        yaw: f32,
        pitch: f32,
    },
    SpawnObject {
        entity_id: i32,
        uuid: Uuid,
        object_type: i32,
        position: Vec3d,
        yaw: f32,
        pitch: f32,
        data: i32,
    },
    DestroyEntities {
        entity_ids: Vec<i32>,
    },
    EntityRelativeMove {
        entity_id: i32,
        delta_x: i16,
        delta_y: i16,
        delta_z: i16,
        on_ground: bool,
    },
    EntityLookAndRelativeMove {
        entity_id: i32,
        delta_x: i16,
        delta_y: i16,
        delta_z: i16,
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    EntityTeleport {
        entity_id: i32,
        position: Vec3d,
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    EntityVelocity {
        entity_id: i32,
        velocity_x: i16,
        velocity_y: i16,
        velocity_z: i16,
    },
    EntityMetadata {
        entity_id: i32,
        raw: Vec<u8>,
    },
    EntityHeadLook {
        entity_id: i32,
        head_yaw: f32,
    },
    PlayerListItem {
        actions: Vec<PlayerListAction>,
    },
    PlayerAbilitiesClientbound {
        flags: u8,
        flying_speed: f32,
        walking_speed: f32,
    },
    PluginMessageClientbound {
        channel: String,
        data: Vec<u8>,
    },
    ServerDifficulty {
        difficulty: u8,
    },
    HeldItemChangeClientbound {
        slot: u8,
    },
    AnimationClientbound {
        entity_id: i32,
        animation: u8,
    },
    BlockEntityData(BlockEntityUpdate),
    WorldBorder {
        raw: Vec<u8>,
    },
    Explosion {
        position: Vec3d,
        radius: f32,
        affected_blocks: Vec<(i8, i8, i8)>,
    },
    /// Parsed but intentionally discarded: the original throws
    /// "not implemented" for this one (§9 design note). We still consume
    /// its bytes so the frame boundary stays in sync.
    OpenBook {
        hand: i32,
    },

    // --- Play: serverbound ---
    KeepAliveServerbound {
        payload: i64,
    },
    ChatMessageServerbound {
        message: String,
    },
    ClientSettings {
        locale: String,
        view_distance: i8,
        chat_mode: i32,
        chat_colors: bool,
        displayed_skin_parts: u8,
        main_hand: i32,
    },
    PlayerPositionServerbound {
        position: Vec3d,
        on_ground: bool,
    },
    PlayerPositionAndLookServerbound {
        position: Vec3d,
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    PlayerLookServerbound {
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    PlayerServerbound {
        on_ground: bool,
    },
    TeleportConfirm {
        teleport_id: i32,
    },
    ClickWindow {
        window_id: i8,
        slot: i16,
        button: i8,
        action: i16,
        mode: i32,
        clicked_item: Slot,
    },
    CloseWindowServerbound {
        window_id: u8,
    },
    ConfirmTransactionServerbound {
        window_id: i8,
        action: i16,
        accepted: bool,
    },
    HeldItemChangeServerbound {
        slot: i16,
    },
    PlayerDigging {
        status: i32,
        position: BlockPos,
        face: i8,
    },
    PlayerBlockPlacement {
        position: BlockPos,
        face: i32,
        hand: i32,
        cursor_x: f32,
        cursor_y: f32,
        cursor_z: f32,
    },
    AnimationServerbound {
        hand: i32,
    },
    EntityAction {
        entity_id: i32,
        action_id: i32,
        jump_boost: i32,
    },
    CreativeInventoryAction {
        slot: i16,
        clicked_item: Slot,
    },
    ClientStatus {
        action_id: i32,
    },
    PluginMessageServerbound {
        channel: String,
        data: Vec<u8>,
    },
    PlayerAbilitiesServerbound {
        flags: u8,
        flying_speed: f32,
        walking_speed: f32,
    },

    /// Sent by either side to close the connection; carried through as a
    /// single variant rather than split by state, since the payload shape
    /// (a reason) is identical everywhere it appears.
    Disconnect {
        reason: TextComponent,
    },

    /// Anything the registry could not map to a known wire id. Carries the
    /// raw bytes so a caller can inspect or re-emit them; never silently
    /// dropped unless policy says to (§4.5).
    Unknown {
        wire_id: i32,
        data: Vec<u8>,
    },
}

impl InternalPacket {
    /// The agnostic id handlers register against. Kept in sync by hand with
    /// the variant list above; a mismatch here is a bug, not a missing
    /// feature, so this never returns an `Option`.
    pub fn agnostic_id(&self) -> AgnosticId {
        use agnostic_id::*;
        match self {
            InternalPacket::Handshake { .. } => HANDSHAKE,
            InternalPacket::StatusRequest => STATUS_REQUEST,
            InternalPacket::StatusResponse { .. } => STATUS_RESPONSE,
            InternalPacket::Ping { .. } => PING,
            InternalPacket::Pong { .. } => PONG,
            InternalPacket::LoginStart { .. } => LOGIN_START,
            InternalPacket::EncryptionRequest { .. } => ENCRYPTION_REQUEST,
            InternalPacket::EncryptionResponse { .. } => ENCRYPTION_RESPONSE,
            InternalPacket::LoginSuccess { .. } => LOGIN_SUCCESS,
            InternalPacket::LoginDisconnect { .. } => LOGIN_DISCONNECT,
            InternalPacket::SetCompression { .. } => SET_COMPRESSION,
            InternalPacket::KeepAliveClientbound { .. } => KEEP_ALIVE_CLIENTBOUND,
            InternalPacket::JoinGame { .. } => JOIN_GAME,
            InternalPacket::ChatMessageClientbound { .. } => CHAT_MESSAGE_CLIENTBOUND,
            InternalPacket::DisconnectPlay { .. } => DISCONNECT_PLAY,
            InternalPacket::ChunkData(_) => CHUNK_DATA,
            InternalPacket::UnloadChunk { .. } => UNLOAD_CHUNK,
            InternalPacket::BlockChange { .. } => BLOCK_CHANGE,
            InternalPacket::MultiBlockChange { .. } => MULTI_BLOCK_CHANGE,
            InternalPacket::PlayerPositionAndLookClientbound { .. } => {
                PLAYER_POSITION_AND_LOOK_CLIENTBOUND
            }
            InternalPacket::Respawn { .. } => RESPAWN,
            InternalPacket::UpdateHealth { .. } => UPDATE_HEALTH,
            InternalPacket::TimeUpdate { .. } => TIME_UPDATE,
            InternalPacket::SpawnPosition { .. } => SPAWN_POSITION,
            InternalPacket::WindowItems { .. } => WINDOW_ITEMS,
            InternalPacket::SetSlot { .. } => SET_SLOT,
            InternalPacket::OpenWindow { .. } => OPEN_WINDOW,
            InternalPacket::CloseWindowClientbound { .. } => CLOSE_WINDOW_CLIENTBOUND,
            InternalPacket::ConfirmTransactionClientbound { .. } => {
                CONFIRM_TRANSACTION_CLIENTBOUND
            }
            InternalPacket::SpawnLivingEntity { .. } => SPAWN_LIVING_ENTITY,
            InternalPacket::SpawnPlayer { .. } => SPAWN_PLAYER,
            InternalPacket::SpawnObject { .. } => SPAWN_OBJECT,
            InternalPacket::DestroyEntities { .. } => DESTROY_ENTITIES,
            InternalPacket::EntityRelativeMove { .. } => ENTITY_RELATIVE_MOVE,
            InternalPacket::EntityLookAndRelativeMove { .. } => ENTITY_LOOK_AND_RELATIVE_MOVE,
            InternalPacket::EntityTeleport { .. } => ENTITY_TELEPORT,
            InternalPacket::EntityVelocity { .. } => ENTITY_VELOCITY,
            InternalPacket::EntityMetadata { .. } => ENTITY_METADATA,
            InternalPacket::EntityHeadLook { .. } => ENTITY_HEAD_LOOK,
            InternalPacket::PlayerListItem { .. } => PLAYER_LIST_ITEM,
            InternalPacket::PlayerAbilitiesClientbound { .. } => PLAYER_ABILITIES_CLIENTBOUND,
            InternalPacket::PluginMessageClientbound { .. } => PLUGIN_MESSAGE_CLIENTBOUND,
            InternalPacket::ServerDifficulty { .. } => SERVER_DIFFICULTY,
            InternalPacket::HeldItemChangeClientbound { .. } => HELD_ITEM_CHANGE_CLIENTBOUND,
            InternalPacket::AnimationClientbound { .. } => ANIMATION_CLIENTBOUND,
            InternalPacket::BlockEntityData(_) => BLOCK_ENTITY_DATA,
            InternalPacket::WorldBorder { .. } => WORLD_BORDER,
            InternalPacket::Explosion { .. } => EXPLOSION,
            InternalPacket::OpenBook { .. } => OPEN_BOOK,
            InternalPacket::KeepAliveServerbound { .. } => KEEP_ALIVE_SERVERBOUND,
            InternalPacket::ChatMessageServerbound { .. } => CHAT_MESSAGE_SERVERBOUND,
            InternalPacket::ClientSettings { .. } => CLIENT_SETTINGS,
            InternalPacket::PlayerPositionServerbound { .. } => PLAYER_POSITION_SERVERBOUND,
            InternalPacket::PlayerPositionAndLookServerbound { .. } => {
                PLAYER_POSITION_AND_LOOK_SERVERBOUND
            }
            InternalPacket::PlayerLookServerbound { .. } => PLAYER_LOOK_SERVERBOUND,
            InternalPacket::PlayerServerbound { .. } => PLAYER_SERVERBOUND,
            InternalPacket::TeleportConfirm { .. } => TELEPORT_CONFIRM,
            InternalPacket::ClickWindow { .. } => CLICK_WINDOW,
            InternalPacket::CloseWindowServerbound { .. } => CLOSE_WINDOW_SERVERBOUND,
            InternalPacket::ConfirmTransactionServerbound { .. } => {
                CONFIRM_TRANSACTION_SERVERBOUND
            }
            InternalPacket::HeldItemChangeServerbound { .. } => HELD_ITEM_CHANGE_SERVERBOUND,
            InternalPacket::PlayerDigging { .. } => PLAYER_DIGGING,
            InternalPacket::PlayerBlockPlacement { .. } => PLAYER_BLOCK_PLACEMENT,
            InternalPacket::AnimationServerbound { .. } => ANIMATION_SERVERBOUND,
            InternalPacket::EntityAction { .. } => ENTITY_ACTION,
            InternalPacket::CreativeInventoryAction { .. } => CREATIVE_INVENTORY_ACTION,
            InternalPacket::ClientStatus { .. } => CLIENT_STATUS,
            InternalPacket::PluginMessageServerbound { .. } => PLUGIN_MESSAGE_SERVERBOUND,
            InternalPacket::PlayerAbilitiesServerbound { .. } => PLAYER_ABILITIES_SERVERBOUND,
            InternalPacket::Disconnect { .. } => DISCONNECT_PLAY,
            InternalPacket::Unknown { .. } => UNKNOWN,
        }
    }
}
