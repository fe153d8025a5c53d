use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilewalk_common::{Aabb, Circle, EntityId, TextureHandle};
use tilewalk_geom::{Collider, first_hit, lerp_vec2};

/// Velocity smoothing applied each update when none is configured.
pub const DEFAULT_SMOOTHING: f32 = 0.07;

/// Collision shape of an entity, positioned from the entity's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Shape {
    /// Collider for an entity whose top-left corner is at `position`.
    /// Circles are centered half a diameter in from the corner.
    pub fn collider_at(&self, position: Vec2) -> Collider {
        match *self {
            Shape::Rect { width, height } => {
                Collider::Rect(Aabb::new(position.x, position.y, width, height))
            }
            Shape::Circle { radius } => {
                Collider::Circle(Circle::new(position.x + radius, position.y + radius, radius))
            }
        }
    }

    /// Width and height of the shape's bounding box.
    pub fn extent(&self) -> Vec2 {
        match *self {
            Shape::Rect { width, height } => Vec2::new(width, height),
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
        }
    }
}

/// How velocity turns into displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integration {
    /// Velocity is a per-frame displacement; `delta_time` is ignored.
    #[default]
    PerFrame,
    /// Velocity is in units per second and is scaled by `delta_time`.
    TimeScaled,
}

/// How an overlap is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Subtract the predicate's penetration delta. An axis without a delta
    /// (deep overlap) is left uncorrected.
    #[default]
    Penetration,
    /// Undo the last applied step on x, then on y if still overlapping.
    Revert,
}

/// Kinematic entity steered through its target velocity.
///
/// The collider is derived from the position after every move and has no
/// setter, so callers never observe a stale collider.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    id: EntityId,
    position: Vec2,
    velocity: Vec2,
    target_velocity: Vec2,
    last_step: Vec2,
    shape: Shape,
    collider: Collider,
    texture: TextureHandle,
    smoothing: f32,
    integration: Integration,
    resolve_mode: ResolveMode,
}

impl Entity {
    pub fn new(position: Vec2, shape: Shape, texture: TextureHandle) -> Self {
        Self {
            id: EntityId::new(),
            position,
            velocity: Vec2::ZERO,
            target_velocity: Vec2::ZERO,
            last_step: Vec2::ZERO,
            shape,
            collider: shape.collider_at(position),
            texture,
            smoothing: DEFAULT_SMOOTHING,
            integration: Integration::default(),
            resolve_mode: ResolveMode::default(),
        }
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        assert!(
            smoothing > 0.0 && smoothing <= 1.0,
            "smoothing must be in (0, 1]"
        );
        self.smoothing = smoothing;
        self
    }

    pub fn with_integration(mut self, integration: Integration) -> Self {
        self.integration = integration;
        self
    }

    pub fn with_resolve_mode(mut self, resolve_mode: ResolveMode) -> Self {
        self.resolve_mode = resolve_mode;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn target_velocity(&self) -> Vec2 {
        self.target_velocity
    }

    /// Displacement applied by the most recent `update`.
    pub fn last_step(&self) -> Vec2 {
        self.last_step
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn collider(&self) -> Collider {
        self.collider
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn resolve_mode(&self) -> ResolveMode {
        self.resolve_mode
    }

    /// Center of the collider's bounding box.
    pub fn center(&self) -> Vec2 {
        self.position + self.shape.extent() / 2.0
    }

    pub fn set_target_velocity(&mut self, target: Vec2) {
        self.target_velocity = target;
    }

    pub fn add_target_velocity(&mut self, delta: Vec2) {
        self.target_velocity += delta;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.shift_collider();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    fn shift_collider(&mut self) {
        self.collider = self.shape.collider_at(self.position);
    }

    /// Advance one frame: smooth velocity toward the target, then move.
    pub fn update(&mut self, delta_time: f32) {
        self.velocity = lerp_vec2(self.velocity, self.target_velocity, self.smoothing);
        self.last_step = match self.integration {
            Integration::PerFrame => self.velocity,
            Integration::TimeScaled => self.velocity * delta_time,
        };
        self.translate(self.last_step);
    }

    /// Resolve against a single collider. Returns whether they overlapped.
    pub fn resolve_collision(&mut self, other: &Collider) -> bool {
        self.resolve_collisions(std::iter::once(*other))
    }

    /// Resolve against the first overlapping collider of `others`.
    ///
    /// A hit is reported even when the penetration is too deep to carry a
    /// correction, so `true` does not imply the entity moved.
    pub fn resolve_collisions<I>(&mut self, others: I) -> bool
    where
        I: IntoIterator<Item = Collider>,
        I::IntoIter: Clone,
    {
        let others = others.into_iter();
        match self.resolve_mode {
            ResolveMode::Penetration => {
                let Some((_, penetration)) = first_hit(&self.collider, others) else {
                    return false;
                };
                self.translate(-penetration.correction());
                true
            }
            ResolveMode::Revert => {
                if first_hit(&self.collider, others.clone()).is_none() {
                    return false;
                }
                self.translate(Vec2::new(-self.last_step.x, 0.0));
                if first_hit(&self.collider, others).is_some() {
                    self.translate(Vec2::new(0.0, -self.last_step.y));
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEX: TextureHandle = TextureHandle(1);

    fn wall() -> Collider {
        Collider::Rect(Aabb::new(300.0, 40.0, 40.0, 400.0))
    }

    #[test]
    fn collider_follows_position() {
        let mut e = Entity::new(Vec2::new(10.0, 20.0), Shape::Circle { radius: 10.0 }, TEX);
        assert_eq!(e.collider(), Collider::Circle(Circle::new(20.0, 30.0, 10.0)));
        e.set_position(Vec2::new(0.0, 0.0));
        assert_eq!(e.collider(), Collider::Circle(Circle::new(10.0, 10.0, 10.0)));
        e.translate(Vec2::new(5.0, 0.0));
        assert_eq!(e.collider().bounding_box(), Aabb::new(5.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn first_update_reaches_smoothing_fraction() {
        let mut e = Entity::new(Vec2::ZERO, Shape::Rect { width: 10.0, height: 10.0 }, TEX);
        e.set_target_velocity(Vec2::new(100.0, 0.0));
        e.update(1.0);
        assert!((e.velocity().x - 7.0).abs() < 1e-4);
        assert!((e.position().x - 7.0).abs() < 1e-4);
        assert_eq!(e.position().y, 0.0);
        assert_eq!(e.collider().bounding_box().x, e.position().x);
    }

    #[test]
    fn per_frame_integration_ignores_delta_time() {
        let mut a = Entity::new(Vec2::ZERO, Shape::Circle { radius: 5.0 }, TEX)
            .with_velocity(Vec2::new(4.0, 0.0));
        a.set_target_velocity(Vec2::new(4.0, 0.0));
        a.update(1.0 / 60.0);
        assert_eq!(a.position().x, 4.0);

        let mut b = Entity::new(Vec2::ZERO, Shape::Circle { radius: 5.0 }, TEX)
            .with_velocity(Vec2::new(120.0, 0.0))
            .with_integration(Integration::TimeScaled);
        b.set_target_velocity(Vec2::new(120.0, 0.0));
        b.update(0.5);
        assert_eq!(b.position().x, 60.0);
        assert_eq!(b.last_step(), Vec2::new(60.0, 0.0));
    }

    #[test]
    fn velocity_converges_to_target() {
        let mut e = Entity::new(Vec2::ZERO, Shape::Circle { radius: 5.0 }, TEX);
        e.set_target_velocity(Vec2::new(3.0, -3.0));
        for _ in 0..400 {
            e.update(1.0);
        }
        assert!((e.velocity() - Vec2::new(3.0, -3.0)).length() < 1e-3);
    }

    #[test]
    fn revert_mode_stops_flush_against_wall() {
        let mut e = Entity::new(
            Vec2::new(280.0, 100.0),
            Shape::Rect { width: 20.0, height: 20.0 },
            TEX,
        )
        .with_resolve_mode(ResolveMode::Revert)
        .with_velocity(Vec2::new(15.0, 0.0));
        e.set_target_velocity(Vec2::new(15.0, 0.0));

        e.update(1.0);
        assert_eq!(e.position().x, 295.0);
        assert!(e.resolve_collision(&wall()));
        assert_eq!(e.collider().bounding_box().right(), 300.0);
        assert!(!e.collider().overlaps(&wall()));
    }

    #[test]
    fn revert_mode_undoes_y_when_x_alone_still_overlaps() {
        // Above the wall and already inside its x span; dropping down enters it.
        let step = Vec2::new(5.0, 15.0);
        let mut e = Entity::new(
            Vec2::new(310.0, 10.0),
            Shape::Rect { width: 20.0, height: 20.0 },
            TEX,
        )
        .with_resolve_mode(ResolveMode::Revert)
        .with_velocity(step);
        e.set_target_velocity(step);

        e.update(1.0);
        assert_eq!(e.position(), Vec2::new(315.0, 25.0));
        assert!(e.resolve_collision(&wall()));
        assert_eq!(e.position(), Vec2::new(310.0, 10.0));
        assert_eq!(e.collider().bounding_box().bottom(), 30.0);
        assert!(!e.collider().overlaps(&wall()));
    }

    #[test]
    fn revert_mode_keeps_y_when_x_revert_clears() {
        // Diagonal into the wall's top-left corner from outside both spans.
        let step = Vec2::new(10.0, 10.0);
        let mut e = Entity::new(
            Vec2::new(275.0, 25.0),
            Shape::Rect { width: 20.0, height: 20.0 },
            TEX,
        )
        .with_resolve_mode(ResolveMode::Revert)
        .with_velocity(step);
        e.set_target_velocity(step);

        e.update(1.0);
        assert!(e.collider().overlaps(&wall()));
        assert!(e.resolve_collision(&wall()));
        assert_eq!(e.position(), Vec2::new(275.0, 35.0));
        assert!(!e.collider().overlaps(&wall()));
    }

    #[test]
    fn penetration_mode_pushes_out_shallow_hit() {
        let mut e = Entity::new(
            Vec2::new(280.0, 100.0),
            Shape::Rect { width: 20.0, height: 20.0 },
            TEX,
        )
        .with_velocity(Vec2::new(5.0, 0.0));
        e.set_target_velocity(Vec2::new(5.0, 0.0));

        e.update(1.0);
        assert!(e.resolve_collision(&wall()));
        assert_eq!(e.position(), Vec2::new(280.0, 100.0));
        assert_eq!(e.collider().bounding_box().right(), 300.0);
    }

    #[test]
    fn penetration_mode_leaves_deep_overlap_in_place() {
        let mut e = Entity::new(
            Vec2::new(305.0, 100.0),
            Shape::Rect { width: 20.0, height: 20.0 },
            TEX,
        );
        assert!(e.resolve_collision(&wall()));
        assert_eq!(e.position(), Vec2::new(305.0, 100.0));
    }

    #[test]
    fn resolve_collisions_misses_return_false() {
        let mut e = Entity::new(Vec2::ZERO, Shape::Circle { radius: 10.0 }, TEX);
        let others = vec![wall(), Collider::Rect(Aabb::new(100.0, 100.0, 5.0, 5.0))];
        assert!(!e.resolve_collisions(others));
        assert_eq!(e.position(), Vec2::ZERO);
    }

    #[test]
    fn circle_slides_back_out_of_wall() {
        // Circle of radius 10 whose right edge ends 3 units inside the wall.
        let mut e = Entity::new(Vec2::new(283.0, 100.0), Shape::Circle { radius: 10.0 }, TEX);
        assert!(e.resolve_collisions([wall()]));
        assert_eq!(e.collider().bounding_box().right(), 300.0);
    }
}
