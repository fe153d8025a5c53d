use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilewalk_common::Aabb;

use crate::camera::Camera;
use crate::entity::Entity;

/// Extent of the playable world, `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        assert!(width > 0.0 && height > 0.0, "world bounds must be positive");
        Self { width, height }
    }

    pub fn contains(&self, rect: &Aabb) -> bool {
        rect.x >= 0.0 && rect.y >= 0.0 && rect.right() <= self.width && rect.bottom() <= self.height
    }

    /// Clamp the camera view inside the world. Returns whether it moved.
    ///
    /// On an axis where the view is larger than the world the view is
    /// centered instead, leaving equal margins outside on both sides.
    pub fn bound_camera(&self, camera: &mut Camera) -> bool {
        let view = camera.view();
        let clamped = Vec2::new(
            clamp_view_axis(view.x, view.w, self.width),
            clamp_view_axis(view.y, view.h, self.height),
        );
        if clamped == view.origin() {
            return false;
        }
        camera.set_origin(clamped);
        true
    }
}

fn clamp_view_axis(position: f32, extent: f32, bound: f32) -> f32 {
    if extent > bound {
        (bound - extent) / 2.0
    } else if position < 0.0 {
        0.0
    } else if position > bound - extent {
        bound - extent
    } else {
        position
    }
}

/// Keeps entities inside the world bounds. Selected once when the world is set up.
pub trait BoundPolicy: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Correct the entity if its collider left the bounds. Returns whether a
    /// correction happened.
    fn bound_entity(&self, bounds: &WorldBounds, entity: &mut Entity) -> bool;
}

/// Treats the world edge as a wall: undo the last step on each axis that
/// crossed it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevertBound;

impl BoundPolicy for RevertBound {
    fn name(&self) -> &'static str {
        "revert"
    }

    fn bound_entity(&self, bounds: &WorldBounds, entity: &mut Entity) -> bool {
        let mut collided = false;

        let rect = entity.collider().bounding_box();
        if rect.x < 0.0 || rect.right() > bounds.width {
            entity.translate(Vec2::new(-entity.last_step().x, 0.0));
            collided = true;
        }

        let rect = entity.collider().bounding_box();
        if rect.y < 0.0 || rect.bottom() > bounds.height {
            entity.translate(Vec2::new(0.0, -entity.last_step().y));
            collided = true;
        }

        collided
    }
}

/// Snaps the collider back inside the bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClampBound;

impl BoundPolicy for ClampBound {
    fn name(&self) -> &'static str {
        "clamp"
    }

    fn bound_entity(&self, bounds: &WorldBounds, entity: &mut Entity) -> bool {
        let rect = entity.collider().bounding_box();
        let push = Vec2::new(
            snap_axis(rect.x, rect.right(), bounds.width),
            snap_axis(rect.y, rect.bottom(), bounds.height),
        );
        if push == Vec2::ZERO {
            return false;
        }
        entity.translate(push);
        true
    }
}

fn snap_axis(min: f32, max: f32, bound: f32) -> f32 {
    if min < 0.0 {
        -min
    } else if max > bound {
        bound - max
    } else {
        0.0
    }
}

/// Serializable selector for the built-in bound policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundPolicyKind {
    #[default]
    Revert,
    Clamp,
}

impl BoundPolicyKind {
    pub fn into_policy(self) -> Box<dyn BoundPolicy> {
        match self {
            BoundPolicyKind::Revert => Box::new(RevertBound),
            BoundPolicyKind::Clamp => Box::new(ClampBound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Shape;
    use tilewalk_common::TextureHandle;

    fn moving_right(x: f32, speed: f32) -> Entity {
        let mut e = Entity::new(
            Vec2::new(x, 100.0),
            Shape::Rect { width: 20.0, height: 20.0 },
            TextureHandle(0),
        )
        .with_velocity(Vec2::new(speed, 0.0));
        e.set_target_velocity(Vec2::new(speed, 0.0));
        e
    }

    #[test]
    fn revert_bound_pulls_entity_back_inside() {
        let bounds = WorldBounds::new(640.0, 480.0);
        let mut e = moving_right(620.0, 10.0);
        e.update(1.0);
        assert_eq!(e.collider().bounding_box().right(), 650.0);

        assert!(RevertBound.bound_entity(&bounds, &mut e));
        assert!(e.collider().bounding_box().right() <= 640.0);
        assert!(bounds.contains(&e.collider().bounding_box()));
    }

    #[test]
    fn revert_bound_leaves_inside_entity_alone() {
        let bounds = WorldBounds::new(640.0, 480.0);
        let mut e = moving_right(100.0, 10.0);
        e.update(1.0);
        assert!(!RevertBound.bound_entity(&bounds, &mut e));
        assert_eq!(e.position().x, 110.0);
    }

    #[test]
    fn revert_bound_handles_top_and_left_edges() {
        let bounds = WorldBounds::new(640.0, 480.0);
        let step = Vec2::new(-10.0, -10.0);
        let mut e = Entity::new(
            Vec2::new(5.0, 3.0),
            Shape::Rect { width: 20.0, height: 20.0 },
            TextureHandle(0),
        )
        .with_velocity(step);
        e.set_target_velocity(step);
        e.update(1.0);
        assert_eq!(e.position(), Vec2::new(-5.0, -7.0));

        assert!(RevertBound.bound_entity(&bounds, &mut e));
        assert_eq!(e.position(), Vec2::new(5.0, 3.0));
        assert!(bounds.contains(&e.collider().bounding_box()));
    }

    #[test]
    fn revert_bound_only_reverts_crossed_axis() {
        let bounds = WorldBounds::new(640.0, 480.0);
        let step = Vec2::new(4.0, 12.0);
        let mut e = Entity::new(
            Vec2::new(300.0, 455.0),
            Shape::Circle { radius: 10.0 },
            TextureHandle(0),
        )
        .with_velocity(step);
        e.set_target_velocity(step);
        e.update(1.0);

        assert!(RevertBound.bound_entity(&bounds, &mut e));
        assert_eq!(e.position(), Vec2::new(304.0, 455.0));
        assert_eq!(e.collider().bounding_box().bottom(), 475.0);
    }

    #[test]
    fn clamp_bound_snaps_to_edge() {
        let bounds = WorldBounds::new(640.0, 480.0);
        let mut e = moving_right(620.0, 30.0);
        e.update(1.0);
        assert!(ClampBound.bound_entity(&bounds, &mut e));
        assert_eq!(e.collider().bounding_box().right(), 640.0);

        let mut e = Entity::new(
            Vec2::new(-5.0, -2.0),
            Shape::Circle { radius: 4.0 },
            TextureHandle(0),
        );
        assert!(ClampBound.bound_entity(&bounds, &mut e));
        assert_eq!(e.position(), Vec2::ZERO);
    }

    #[test]
    fn camera_clamped_to_high_side() {
        let bounds = WorldBounds::new(1280.0, 960.0);
        let mut cam = Camera::new(0.0, 0.0, 640.0, 480.0).with_lerp_factor(1.0);
        cam.set_target(Vec2::new(700.0, 500.0));
        cam.update_lerp_center();
        assert_eq!(cam.origin(), Vec2::new(700.0, 500.0));

        assert!(bounds.bound_camera(&mut cam));
        assert_eq!(cam.origin(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn camera_clamped_to_low_side() {
        let bounds = WorldBounds::new(1280.0, 960.0);
        let mut cam = Camera::new(-30.0, -1.0, 640.0, 480.0);
        assert!(bounds.bound_camera(&mut cam));
        assert_eq!(cam.origin(), Vec2::ZERO);
        assert!(!bounds.bound_camera(&mut cam));
    }

    #[test]
    fn camera_bound_is_idempotent() {
        let bounds = WorldBounds::new(1280.0, 960.0);
        let origins = [
            (-500.0, -500.0),
            (0.0, 0.0),
            (320.5, 100.25),
            (640.0, 480.0),
            (641.0, 481.0),
            (5000.0, -3.0),
        ];
        for (x, y) in origins {
            let mut once = Camera::new(x, y, 640.0, 480.0);
            bounds.bound_camera(&mut once);
            let mut twice = once;
            assert!(!bounds.bound_camera(&mut twice));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn oversized_view_is_centered() {
        let bounds = WorldBounds::new(320.0, 960.0);
        let mut cam = Camera::new(50.0, 10.0, 640.0, 480.0);
        assert!(bounds.bound_camera(&mut cam));
        assert_eq!(cam.origin(), Vec2::new(-160.0, 10.0));
        assert!(!bounds.bound_camera(&mut cam));
    }

    #[test]
    fn policy_kind_selects_implementation() {
        assert_eq!(BoundPolicyKind::Revert.into_policy().name(), "revert");
        assert_eq!(BoundPolicyKind::Clamp.into_policy().name(), "clamp");
    }
}
