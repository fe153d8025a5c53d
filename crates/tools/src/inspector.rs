use glam::Vec2;
use serde::Serialize;
use tilewalk_common::{Aabb, EntityId};
use tilewalk_geom::Collider;
use tilewalk_kernel::World;

/// World inspector for developer tooling.
///
/// Read-only queries against the world state for debugging and CLI output.
pub struct WorldInspector;

impl WorldInspector {
    pub fn summary(world: &World) -> WorldSummary {
        let map = world.map();
        let bounds = world.bounds();
        WorldSummary {
            tick: world.tick(),
            rows: map.rows(),
            columns: map.columns(),
            structural_tiles: map.structural_count(),
            world_size: Vec2::new(bounds.width, bounds.height),
            camera_view: world.camera().view(),
            bound_policy: world.bound_policy().name(),
            entity_count: world.entity_count(),
            pending_events: world.events().len(),
            state_hash: world.state_hash(),
        }
    }

    pub fn inspect_entity(world: &World, id: EntityId) -> Option<EntityInfo> {
        world.entity(id).map(|e| {
            let collider = e.collider();
            EntityInfo {
                id,
                position: e.position(),
                velocity: e.velocity(),
                target_velocity: e.target_velocity(),
                collider,
                touching_wall: world.map().touch_walls(&collider).is_some(),
                tracked: world.tracked() == Some(id),
            }
        })
    }

    /// Info for every entity, in insertion order.
    pub fn entities(world: &World) -> Vec<EntityInfo> {
        world
            .entities()
            .iter()
            .filter_map(|e| Self::inspect_entity(world, e.id()))
            .collect()
    }

    pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
        serde_json::to_string_pretty(value)
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub rows: usize,
    pub columns: usize,
    pub structural_tiles: usize,
    pub world_size: Vec2,
    pub camera_view: Aabb,
    pub bound_policy: &'static str,
    pub entity_count: usize,
    pub pending_events: usize,
    pub state_hash: u64,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} map={}x{} ({}x{} px, {} walls) camera=({:.1}, {:.1}) policy={} entities={} pending_events={} hash={:#018x}",
            self.tick,
            self.columns,
            self.rows,
            self.world_size.x,
            self.world_size.y,
            self.structural_tiles,
            self.camera_view.x,
            self.camera_view.y,
            self.bound_policy,
            self.entity_count,
            self.pending_events,
            self.state_hash,
        )
    }
}

/// Detailed info about a single entity.
#[derive(Debug, Clone, Serialize)]
pub struct EntityInfo {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub target_velocity: Vec2,
    pub collider: Collider,
    pub touching_wall: bool,
    pub tracked: bool,
}

impl std::fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = self.collider.bounding_box();
        write!(
            f,
            "Entity [{:.8}] pos=({:.2}, {:.2}) vel=({:.2}, {:.2}) box=({:.1}, {:.1}, {:.0}x{:.0})",
            &self.id.0.to_string()[..8],
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
            b.x,
            b.y,
            b.w,
            b.h,
        )?;
        if self.tracked {
            write!(f, " tracked")?;
        }
        if self.touching_wall {
            write!(f, " wall")?;
        }
        Ok(())
    }
}
