use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque handle to a texture owned by the media layer.
///
/// The core only ever copies it around and hands it back to a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Axis-aligned rectangle: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0, "Aabb extent must be non-negative");
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Same extent, moved so its top-left corner sits at `origin`.
    pub fn at(&self, origin: Vec2) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..*self
        }
    }
}

/// Circle given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, r: f32) -> Self {
        debug_assert!(r >= 0.0, "Circle radius must be non-negative");
        Self { x, y, r }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Smallest AABB enclosing the circle.
    pub fn bounding_box(&self) -> Aabb {
        Aabb {
            x: self.x - self.r,
            y: self.y - self.r,
            w: self.r * 2.0,
            h: self.r * 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_uniqueness() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn aabb_edges_and_center() {
        let r = Aabb::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 80.0);
        assert_eq!(r.center(), Vec2::new(30.0, 50.0));
    }

    #[test]
    fn aabb_at_keeps_extent() {
        let r = Aabb::new(0.0, 0.0, 8.0, 4.0).at(Vec2::new(3.0, 5.0));
        assert_eq!(r, Aabb::new(3.0, 5.0, 8.0, 4.0));
    }

    #[test]
    fn circle_bounding_box() {
        let c = Circle::new(10.0, 10.0, 5.0);
        assert_eq!(c.bounding_box(), Aabb::new(5.0, 5.0, 10.0, 10.0));
    }
}
