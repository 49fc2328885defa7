//! The client façade (§3, §5, §7, §11): one `Client` owning a `Connection`,
//! the current protocol state, the shared managers (`World`,
//! `InventoryManager`, `EntityManager`), and the extensible dispatcher.
//! Everything runs on whatever thread calls `step`/`run` — there is no
//! internal worker thread, matching the single-threaded cooperative model
//! the original enforces with a connection mutex.

use mclib_dispatch::{AgnosticId, HandlerId, PacketDispatcher};
use mclib_entity::EntityManager;
use mclib_inventory::InventoryManager;
use mclib_protocol_core::{
    read_varint, Connection, ConnectionError, FrameError, InternalPacket, ProtocolAdapter,
    ProtocolState,
};
use mclib_protocol_v1_12_2::V1_12_2Adapter;
use mclib_protocol_v1_13_2::V1_13_2Adapter;
use mclib_types::{GameProfile, TextComponent};
use mclib_world::World;
use tokio::net::TcpStream;

use crate::auth;
use crate::credentials::Credentials;
use crate::error::ClientError;

/// Which protocol version to speak, and which `ProtocolAdapter` that picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    V1_12_2,
    V1_13_2,
}

impl ProtocolVersion {
    pub fn protocol_number(self) -> i32 {
        match self {
            ProtocolVersion::V1_12_2 => 340,
            ProtocolVersion::V1_13_2 => 404,
        }
    }

    fn build_adapter(self) -> Box<dyn ProtocolAdapter> {
        match self {
            ProtocolVersion::V1_12_2 => Box::new(V1_12_2Adapter::new()),
            ProtocolVersion::V1_13_2 => Box::new(V1_13_2Adapter::new()),
        }
    }
}

/// What happened during one `step()` call.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A packet was read, dispatched, and any internal state updated.
    Continue,
    /// The server closed the connection or sent a `Disconnect`; `run()`
    /// stops looping once this is returned.
    Disconnected(String),
}

/// A logged-in connection to a Minecraft server (§3 "Client"). Holds the
/// world, inventory and entity state the server has told it about, plus the
/// dispatcher user code registers extensible handlers on.
pub struct Client {
    connection: Connection,
    adapter: Box<dyn ProtocolAdapter>,
    state: ProtocolState,
    profile: GameProfile,
    dispatcher: PacketDispatcher<ProtocolState, InternalPacket>,
    world: World,
    inventory: InventoryManager,
    entities: EntityManager,
}

impl Client {
    /// Connect to `host:port`, negotiate the handshake/login sequence
    /// (§4.6), and return a `Client` sitting in `ProtocolState::Play`.
    ///
    /// If the server replies with `EncryptionRequest`, `credentials` must be
    /// `Credentials::Online` or login fails with `AuthenticationFailed`.
    pub async fn login(
        host: &str,
        port: u16,
        version: ProtocolVersion,
        credentials: Credentials,
    ) -> Result<Self, ClientError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(ConnectionError::Io)?;
        let mut connection = Connection::new(stream);
        let adapter = version.build_adapter();

        write_packet(
            &mut connection,
            adapter.as_ref(),
            ProtocolState::Handshake,
            &InternalPacket::Handshake {
                protocol_version: version.protocol_number(),
                server_address: host.to_string(),
                server_port: port,
                next_state: 2,
            },
        )
        .await?;

        write_packet(
            &mut connection,
            adapter.as_ref(),
            ProtocolState::Login,
            &InternalPacket::LoginStart {
                username: credentials.username().to_string(),
            },
        )
        .await?;

        let profile = loop {
            let (wire_id, mut payload) = connection.read_packet().await?;
            let packet = adapter.decode_packet(ProtocolState::Login, wire_id, &mut payload)?;
            match packet {
                InternalPacket::EncryptionRequest {
                    server_id,
                    public_key,
                    verify_token,
                } => {
                    let (access_token, profile_uuid) = credentials.online_parts().ok_or_else(|| {
                        ClientError::AuthenticationFailed(
                            "server requires online-mode authentication".to_string(),
                        )
                    })?;

                    let shared_secret = auth::random_shared_secret();
                    let hash = auth::server_hash(&server_id, &shared_secret, &public_key);
                    auth::join_session(access_token, profile_uuid, &hash).await?;

                    let encrypted_secret = auth::encrypt_for_server(&public_key, &shared_secret)?;
                    let encrypted_verify_token = auth::encrypt_for_server(&public_key, &verify_token)?;

                    write_packet(
                        &mut connection,
                        adapter.as_ref(),
                        ProtocolState::Login,
                        &InternalPacket::EncryptionResponse {
                            shared_secret: encrypted_secret,
                            verify_token: encrypted_verify_token,
                        },
                    )
                    .await?;

                    connection.enable_encryption(&shared_secret);
                }
                InternalPacket::SetCompression { threshold } => {
                    connection.enable_compression(threshold);
                }
                InternalPacket::LoginSuccess { uuid, username } => {
                    break GameProfile {
                        uuid,
                        name: username,
                        properties: Vec::new(),
                    };
                }
                InternalPacket::LoginDisconnect { reason } | InternalPacket::Disconnect { reason } => {
                    return Err(ClientError::Disconnect(reason.text));
                }
                other => {
                    return Err(ClientError::UnexpectedPacket(format!("{other:?}")));
                }
            }
        };

        tracing::debug!(username = %profile.name, uuid = %profile.uuid, "login complete");

        Ok(Self {
            connection,
            adapter,
            state: ProtocolState::Play,
            profile,
            dispatcher: PacketDispatcher::new(),
            world: World::new(),
            inventory: InventoryManager::new(),
            entities: EntityManager::new(),
        })
    }

    pub fn profile(&self) -> &GameProfile {
        &self.profile
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn inventory(&self) -> &InventoryManager {
        &self.inventory
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    /// Register an extensible handler for one `(state, agnostic_id)` pair.
    /// Registering for `mclib_protocol_core::packets::agnostic_id::UNKNOWN`
    /// is not meaningful — unknown packets never reach the dispatcher with
    /// that id, they surface through `Unknown { wire_id, .. }` instead.
    pub fn on(
        &mut self,
        state: ProtocolState,
        agnostic_id: AgnosticId,
        callback: impl FnMut(&InternalPacket) + Send + 'static,
    ) -> HandlerId {
        self.dispatcher.register(state, agnostic_id, callback)
    }

    pub fn unregister(&mut self, id: HandlerId) {
        self.dispatcher.unregister(id);
    }

    /// Encode and send one outbound packet.
    pub async fn send(&mut self, packet: InternalPacket) -> Result<(), ClientError> {
        write_packet(&mut self.connection, self.adapter.as_ref(), self.state, &packet).await
    }

    /// Read, dispatch, and apply exactly one inbound packet (§5 "Pump"
    /// mode). Keep-alive and teleport-confirm replies are sent
    /// automatically; everything else is surfaced to user handlers via
    /// `on()` after internal state (`world`/`inventory`/`entities`) has
    /// already been updated.
    pub async fn step(&mut self) -> Result<StepOutcome, ClientError> {
        let (wire_id, mut payload) = match self.connection.read_packet().await {
            Ok(pair) => pair,
            Err(ConnectionError::Frame(FrameError::ConnectionClosed)) => {
                return Ok(StepOutcome::Disconnected("connection closed".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let packet = self.adapter.decode_packet(self.state, wire_id, &mut payload)?;
        let agnostic_id = packet.agnostic_id();

        self.dispatcher.dispatch(self.state, agnostic_id, &packet);

        if let Some(reply) = self.apply_internal_state(&packet) {
            self.send(reply).await?;
        }

        match &packet {
            InternalPacket::KeepAliveClientbound { payload } => {
                self.send(InternalPacket::KeepAliveServerbound { payload: *payload })
                    .await?;
            }
            InternalPacket::PlayerPositionAndLookClientbound {
                position,
                yaw,
                pitch,
                teleport_id,
                ..
            } => {
                self.send(InternalPacket::TeleportConfirm {
                    teleport_id: *teleport_id,
                })
                .await?;
                self.send(InternalPacket::PlayerPositionAndLookServerbound {
                    position: *position,
                    yaw: *yaw,
                    pitch: *pitch,
                    on_ground: false,
                })
                .await?;
            }
            InternalPacket::Disconnect { reason } | InternalPacket::DisconnectPlay { reason } => {
                return Ok(StepOutcome::Disconnected(reason.text.clone()));
            }
            _ => {}
        }

        Ok(StepOutcome::Continue)
    }

    /// Drive `step()` until the connection ends (§5 "Block" mode). Returns
    /// the disconnect reason.
    pub async fn run(&mut self) -> Result<String, ClientError> {
        loop {
            if let StepOutcome::Disconnected(reason) = self.step().await? {
                return Ok(reason);
            }
        }
    }

    pub async fn disconnect(&mut self) -> Result<(), ClientError> {
        self.send(InternalPacket::Disconnect {
            reason: TextComponent::plain("client disconnect"),
        })
        .await
    }

    /// Feed one decoded inbound packet to whichever manager owns it,
    /// mutating `world`/`inventory`/`entities` in place. Returns the
    /// auto-reply packet to send, if the packet demands one (only
    /// `ConfirmTransaction` rejection echoes currently do).
    fn apply_internal_state(&mut self, packet: &InternalPacket) -> Option<InternalPacket> {
        self.entities.handle_packet(packet);

        match packet {
            InternalPacket::ChunkData(payload) => {
                match mclib_world::ChunkColumn::decode(payload) {
                    Ok(column) => self.world.insert(column),
                    Err(e) => tracing::warn!(error = %e, "failed to decode chunk column"),
                }
                None
            }
            InternalPacket::UnloadChunk { chunk_x, chunk_z } => {
                self.world.remove(*chunk_x, *chunk_z);
                None
            }
            InternalPacket::BlockChange {
                position,
                block_state_id,
            } => {
                let chunk_pos = position.chunk_pos();
                if let Some(column) = self.world.column_mut(chunk_pos.x, chunk_pos.z) {
                    column.set_block(position.x & 15, position.y, position.z & 15, *block_state_id);
                }
                None
            }
            InternalPacket::MultiBlockChange {
                chunk_x,
                chunk_z,
                changes,
            } => {
                if let Some(column) = self.world.column_mut(*chunk_x, *chunk_z) {
                    for (x, y, z, block_state_id) in changes {
                        column.set_block(*x as i32, *y as i32, *z as i32, *block_state_id);
                    }
                }
                None
            }
            InternalPacket::BlockEntityData(update) => {
                let chunk_pos = update.position.chunk_pos();
                if let Some(column) = self.world.column_mut(chunk_pos.x, chunk_pos.z) {
                    column.block_entities.insert(
                        (update.position.x, update.position.y, update.position.z),
                        mclib_world::BlockEntity {
                            position: update.position,
                            kind: None,
                            nbt: update.nbt.clone(),
                        },
                    );
                }
                None
            }
            InternalPacket::WindowItems { window_id, slots } => {
                self.inventory.handle_window_items(*window_id, slots);
                None
            }
            InternalPacket::SetSlot {
                window_id,
                slot_index,
                slot,
            } => {
                self.inventory
                    .handle_set_slot(*window_id, *slot_index, slot.clone());
                None
            }
            InternalPacket::OpenWindow { window_id, .. } => {
                self.inventory.handle_open_window(*window_id);
                None
            }
            InternalPacket::ConfirmTransactionClientbound {
                window_id,
                action,
                accepted,
            } => self
                .inventory
                .handle_confirm_transaction(*window_id, *action, *accepted),
            _ => None,
        }
    }
}

/// Encode and write one packet: split the adapter's `id-varint || payload`
/// output back apart since `Connection::write_packet` wants them separate
/// (mirrors the teacher's own `send_packet` helper).
async fn write_packet(
    connection: &mut Connection,
    adapter: &dyn ProtocolAdapter,
    state: ProtocolState,
    packet: &InternalPacket,
) -> Result<(), ClientError> {
    let mut encoded = adapter.encode_packet(state, packet)?;
    let packet_id = read_varint(&mut encoded)?;
    connection.write_packet(packet_id, &encoded).await?;
    Ok(())
}
