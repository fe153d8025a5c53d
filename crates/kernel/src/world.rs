use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilewalk_common::{EntityId, TextureHandle};
use tilewalk_geom::{Collider, first_hit};
use tilewalk_tilemap::TileMap;

use crate::bounds::{BoundPolicy, RevertBound, WorldBounds};
use crate::camera::Camera;
use crate::config::SimConfig;
use crate::entity::Entity;

/// Most events a world retains; older ones are dropped first.
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// What happened during a step. Collected for inspection and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Entity was added during setup.
    Spawned { id: EntityId, position: Vec2 },
    /// Entity overlapped a structural tile.
    WallHit { id: EntityId, tick: u64 },
    /// Entity overlapped another entity.
    EntityHit {
        id: EntityId,
        other: EntityId,
        tick: u64,
    },
    /// Entity was pushed back by the bound policy.
    BoundHit { id: EntityId, tick: u64 },
    /// Camera view had to be clamped into the world.
    CameraClamped { tick: u64 },
    /// Simulation advanced one frame.
    Stepped { tick: u64, delta_time: f32 },
}

/// One level: tile map, entities, camera, and the bounds they live in.
///
/// The map and bounds are fixed at construction. `step` runs the whole frame
/// pipeline in a fixed order so a run is reproducible from its delta times.
#[derive(Debug)]
pub struct World {
    map: TileMap,
    bounds: WorldBounds,
    entities: Vec<Entity>,
    camera: Camera,
    tracked: Option<EntityId>,
    bound_policy: Box<dyn BoundPolicy>,
    tick: u64,
    event_log: Vec<WorldEvent>,
    dropped_events: u64,
}

impl World {
    /// World sized to the map's pixel extent, with [`RevertBound`] as policy.
    pub fn new(map: TileMap, camera: Camera) -> Self {
        let bounds = WorldBounds::new(map.width(), map.height());
        let view = camera.view();
        if view.w > bounds.width || view.h > bounds.height {
            tracing::warn!(
                view_w = view.w,
                view_h = view.h,
                width = bounds.width,
                height = bounds.height,
                "camera view is larger than the world; it will be centered"
            );
        }
        Self {
            map,
            bounds,
            entities: Vec::new(),
            camera,
            tracked: None,
            bound_policy: Box::new(RevertBound),
            tick: 0,
            event_log: Vec::new(),
            dropped_events: 0,
        }
    }

    /// Build a level with one player entity that the camera follows.
    pub fn from_config(map: TileMap, config: &SimConfig, texture: TextureHandle) -> (Self, EntityId) {
        let camera = Camera::new(
            config.spawn.x,
            config.spawn.y,
            config.screen_width,
            config.screen_height,
        )
        .with_lerp_factor(config.camera_lerp);
        let player = Entity::new(config.spawn, config.entity_shape, texture)
            .with_smoothing(config.velocity_smoothing)
            .with_integration(config.integration)
            .with_resolve_mode(config.resolve_mode);

        let mut world = Self::new(map, camera).with_bound_policy(config.bound_policy.into_policy());
        let id = world.add_entity(player);
        world.track(id);
        (world, id)
    }

    pub fn with_bound_policy(mut self, policy: Box<dyn BoundPolicy>) -> Self {
        self.bound_policy = policy;
        self
    }

    /// Replace the map-derived bounds.
    pub fn with_bounds(mut self, bounds: WorldBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        tracing::debug!(?id, position = ?entity.position(), "entity added");
        self.record(WorldEvent::Spawned {
            id,
            position: entity.position(),
        });
        self.entities.push(entity);
        id
    }

    /// Make the camera follow `id`. Unknown ids leave the camera still.
    pub fn track(&mut self, id: EntityId) {
        self.tracked = Some(id);
    }

    pub fn tracked(&self) -> Option<EntityId> {
        self.tracked
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn bound_policy(&self) -> &dyn BoundPolicy {
        self.bound_policy.as_ref()
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Events dropped because the log was full.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    fn record(&mut self, event: WorldEvent) {
        if self.event_log.len() == EVENT_LOG_CAPACITY {
            self.event_log.remove(0);
            self.dropped_events += 1;
        }
        self.event_log.push(event);
    }

    /// Advance one frame.
    ///
    /// Per entity, in insertion order: update, resolve against structural
    /// tiles, resolve against the other entities, apply the bound policy.
    /// Entities earlier in the list are already settled when later ones test
    /// against them. Then the camera follows the tracked entity, eases and is
    /// clamped.
    pub fn step(&mut self, delta_time: f32) {
        let tick = self.tick + 1;
        let _span = tracing::info_span!("world_step", tick).entered();

        for i in 0..self.entities.len() {
            let entity = &mut self.entities[i];
            entity.update(delta_time);
            let id = entity.id();

            if entity.resolve_collisions(self.map.structural_colliders()) {
                tracing::trace!(?id, "wall hit");
                self.record(WorldEvent::WallHit { id, tick });
            }

            let others: Vec<(EntityId, Collider)> = self
                .entities
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, e)| (e.id(), e.collider()))
                .collect();
            let subject = self.entities[i].collider();
            if let Some((k, _)) = first_hit(&subject, others.iter().map(|(_, c)| *c)) {
                let (other, collider) = others[k];
                self.entities[i].resolve_collision(&collider);
                tracing::trace!(?id, ?other, "entity hit");
                self.record(WorldEvent::EntityHit { id, other, tick });
            }

            if self
                .bound_policy
                .bound_entity(&self.bounds, &mut self.entities[i])
            {
                tracing::trace!(?id, policy = self.bound_policy.name(), "bound hit");
                self.record(WorldEvent::BoundHit { id, tick });
            }
        }

        if let Some(center) = self.tracked.and_then(|id| self.entity(id)).map(Entity::center) {
            self.camera.follow(center);
        }
        self.camera.update_lerp_center();
        if self.bounds.bound_camera(&mut self.camera) {
            self.record(WorldEvent::CameraClamped { tick });
        }

        self.tick = tick;
        self.record(WorldEvent::Stepped { tick, delta_time });
    }

    /// Deterministic fingerprint of the mutable state (tick, entity motion,
    /// camera view), for comparing runs.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        fnv(&mut h, &self.tick.to_le_bytes());
        for e in &self.entities {
            fnv(&mut h, e.id().0.as_bytes());
            for v in [e.position(), e.velocity(), e.target_velocity()] {
                fnv(&mut h, &v.x.to_le_bytes());
                fnv(&mut h, &v.y.to_le_bytes());
            }
        }
        let view = self.camera.view();
        fnv(&mut h, &view.x.to_le_bytes());
        fnv(&mut h, &view.y.to_le_bytes());
        h
    }
}

fn fnv(h: &mut u64, bytes: &[u8]) {
    for &b in bytes {
        *h ^= b as u64;
        *h = h.wrapping_mul(0x0100_0000_01b3);
    }
}
