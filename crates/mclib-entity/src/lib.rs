//! Entity manager (§3 "Entity", §2 "Entity / Inventory managers"):
//! `{entityId, type, position, velocity, yaw, pitch, metadata}`, lifetime
//! bounded by a `SpawnXxx` packet and a `DestroyEntities` packet. No
//! physics, pathfinding, or fall handling — those are explicitly out of
//! scope; this crate only mirrors what the server tells it.

use std::collections::HashMap;

use mclib_protocol_core::InternalPacket;
use mclib_types::Vec3d;
use uuid::Uuid;

/// What kind of thing a `SpawnXxx` packet introduced; callers that need
/// the precise vanilla entity-type registry can look `type_id` up
/// themselves — this crate doesn't carry that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Object,
    LivingEntity,
    Player,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub entity_id: i32,
    pub uuid: Option<Uuid>,
    pub kind: EntityKind,
    pub type_id: i32,
    pub position: Vec3d,
    pub velocity: (i16, i16, i16),
    pub yaw: f32,
    pub pitch: f32,
    pub head_yaw: f32,
    /// Still-encoded entity-metadata array (object-type-specific; the
    /// original never decodes this beyond carrying it).
    pub metadata: Vec<u8>,
}

impl Entity {
    fn new(entity_id: i32, kind: EntityKind, type_id: i32, uuid: Option<Uuid>) -> Self {
        Self {
            entity_id,
            uuid,
            kind,
            type_id,
            position: Vec3d::new(0.0, 0.0, 0.0),
            velocity: (0, 0, 0),
            yaw: 0.0,
            pitch: 0.0,
            head_yaw: 0.0,
            metadata: Vec::new(),
        }
    }
}

/// The fixed-point scale a relative-move delta is encoded at: one unit is
/// 1/4096th of a block.
const RELATIVE_MOVE_SCALE: f64 = 4096.0;

/// Every currently-spawned entity, keyed by server-assigned entity id.
/// Fed by the dispatcher via `handle_packet`; the client façade registers
/// one closure per relevant agnostic id that forwards here.
#[derive(Debug, Default)]
pub struct EntityManager {
    entities: HashMap<i32, Entity>,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity_id: i32) -> Option<&Entity> {
        self.entities.get(&entity_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Apply one inbound packet's effect on the entity table. Packets this
    /// manager doesn't care about are silently ignored — the dispatcher,
    /// not this method, decides who receives what.
    pub fn handle_packet(&mut self, packet: &InternalPacket) {
        match packet {
            InternalPacket::SpawnObject {
                entity_id,
                uuid,
                object_type,
                position,
                yaw,
                pitch,
                ..
            } => {
                let mut entity = Entity::new(*entity_id, EntityKind::Object, *object_type, Some(*uuid));
                entity.position = *position;
                entity.yaw = *yaw;
                entity.pitch = *pitch;
                self.entities.insert(*entity_id, entity);
            }
            InternalPacket::SpawnLivingEntity {
                entity_id,
                uuid,
                entity_type,
                position,
                yaw,
                pitch,
            } => {
                let mut entity =
                    Entity::new(*entity_id, EntityKind::LivingEntity, *entity_type, Some(*uuid));
                entity.position = *position;
                entity.yaw = *yaw;
                entity.pitch = *pitch;
                self.entities.insert(*entity_id, entity);
            }
            InternalPacket::SpawnPlayer {
                entity_id,
                uuid,
                position,
                yaw,
                pitch,
            } => {
                let mut entity = Entity::new(*entity_id, EntityKind::Player, 0, Some(*uuid));
                entity.position = *position;
                entity.yaw = *yaw;
                entity.pitch = *pitch;
                self.entities.insert(*entity_id, entity);
            }
            InternalPacket::EntityRelativeMove {
                entity_id,
                delta_x,
                delta_y,
                delta_z,
                ..
            } => {
                if let Some(entity) = self.entities.get_mut(entity_id) {
                    entity.position.x += *delta_x as f64 / RELATIVE_MOVE_SCALE;
                    entity.position.y += *delta_y as f64 / RELATIVE_MOVE_SCALE;
                    entity.position.z += *delta_z as f64 / RELATIVE_MOVE_SCALE;
                }
            }
            InternalPacket::EntityLookAndRelativeMove {
                entity_id,
                delta_x,
                delta_y,
                delta_z,
                yaw,
                pitch,
                ..
            } => {
                if let Some(entity) = self.entities.get_mut(entity_id) {
                    entity.position.x += *delta_x as f64 / RELATIVE_MOVE_SCALE;
                    entity.position.y += *delta_y as f64 / RELATIVE_MOVE_SCALE;
                    entity.position.z += *delta_z as f64 / RELATIVE_MOVE_SCALE;
                    entity.yaw = *yaw;
                    entity.pitch = *pitch;
                }
            }
            InternalPacket::EntityTeleport {
                entity_id,
                position,
                yaw,
                pitch,
                ..
            } => {
                if let Some(entity) = self.entities.get_mut(entity_id) {
                    entity.position = *position;
                    entity.yaw = *yaw;
                    entity.pitch = *pitch;
                }
            }
            InternalPacket::EntityVelocity {
                entity_id,
                velocity_x,
                velocity_y,
                velocity_z,
            } => {
                if let Some(entity) = self.entities.get_mut(entity_id) {
                    entity.velocity = (*velocity_x, *velocity_y, *velocity_z);
                }
            }
            InternalPacket::EntityMetadata { entity_id, raw } => {
                if let Some(entity) = self.entities.get_mut(entity_id) {
                    entity.metadata = raw.clone();
                }
            }
            InternalPacket::EntityHeadLook {
                entity_id,
                head_yaw,
            } => {
                if let Some(entity) = self.entities.get_mut(entity_id) {
                    entity.head_yaw = *head_yaw;
                }
            }
            InternalPacket::DestroyEntities { entity_ids } => {
                for id in entity_ids {
                    self.entities.remove(id);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_living(id: i32) -> InternalPacket {
        InternalPacket::SpawnLivingEntity {
            entity_id: id,
            uuid: Uuid::nil(),
            entity_type: 50,
            position: Vec3d::new(1.0, 2.0, 3.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[test]
    fn test_spawn_then_destroy() {
        let mut manager = EntityManager::new();
        manager.handle_packet(&spawn_living(7));
        assert!(manager.get(7).is_some());
        manager.handle_packet(&InternalPacket::DestroyEntities {
            entity_ids: vec![7],
        });
        assert!(manager.get(7).is_none());
    }

    #[test]
    fn test_relative_move_accumulates_from_spawn_position() {
        let mut manager = EntityManager::new();
        manager.handle_packet(&spawn_living(1));
        manager.handle_packet(&InternalPacket::EntityRelativeMove {
            entity_id: 1,
            delta_x: 4096,
            delta_y: 0,
            delta_z: -4096,
            on_ground: true,
        });
        let entity = manager.get(1).unwrap();
        assert_eq!(entity.position.x, 2.0);
        assert_eq!(entity.position.z, 2.0);
    }

    #[test]
    fn test_teleport_overwrites_position_and_look() {
        let mut manager = EntityManager::new();
        manager.handle_packet(&spawn_living(2));
        manager.handle_packet(&InternalPacket::EntityTeleport {
            entity_id: 2,
            position: Vec3d::new(10.0, 20.0, 30.0),
            yaw: 90.0,
            pitch: 5.0,
            on_ground: false,
        });
        let entity = manager.get(2).unwrap();
        assert_eq!(entity.position, Vec3d::new(10.0, 20.0, 30.0));
        assert_eq!(entity.yaw, 90.0);
    }

    #[test]
    fn test_packet_for_unknown_entity_is_ignored() {
        let mut manager = EntityManager::new();
        manager.handle_packet(&InternalPacket::EntityVelocity {
            entity_id: 999,
            velocity_x: 1,
            velocity_y: 1,
            velocity_z: 1,
        });
        assert!(manager.is_empty());
    }

    #[test]
    fn test_metadata_and_head_look_update_in_place() {
        let mut manager = EntityManager::new();
        manager.handle_packet(&spawn_living(3));
        manager.handle_packet(&InternalPacket::EntityMetadata {
            entity_id: 3,
            raw: vec![1, 2, 3],
        });
        manager.handle_packet(&InternalPacket::EntityHeadLook {
            entity_id: 3,
            head_yaw: 45.0,
        });
        let entity = manager.get(3).unwrap();
        assert_eq!(entity.metadata, vec![1, 2, 3]);
        assert_eq!(entity.head_yaw, 45.0);
    }
}
