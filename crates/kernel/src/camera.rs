use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilewalk_common::Aabb;
use tilewalk_geom::lerp;

/// Follow factor used when none is configured.
pub const DEFAULT_LERP_FACTOR: f32 = 0.07;

/// 2D follow camera: a view rectangle easing toward a target origin.
///
/// The target is the desired top-left corner of the view. Call
/// [`Camera::update_lerp_center`] once per frame after the followed entity
/// has settled, then clamp with [`crate::WorldBounds::bound_camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    view: Aabb,
    target: Vec2,
    lerp_factor: f32,
}

impl Camera {
    pub fn new(x: f32, y: f32, view_width: f32, view_height: f32) -> Self {
        Self {
            view: Aabb::new(x, y, view_width, view_height),
            target: Vec2::ZERO,
            lerp_factor: DEFAULT_LERP_FACTOR,
        }
    }

    pub fn with_lerp_factor(mut self, lerp_factor: f32) -> Self {
        assert!(
            lerp_factor > 0.0 && lerp_factor <= 1.0,
            "lerp_factor must be in (0, 1]"
        );
        self.lerp_factor = lerp_factor;
        self
    }

    pub fn view(&self) -> Aabb {
        self.view
    }

    pub fn origin(&self) -> Vec2 {
        self.view.origin()
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn lerp_factor(&self) -> f32 {
        self.lerp_factor
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Aim so that `center` ends up in the middle of the view.
    pub fn follow(&mut self, center: Vec2) {
        self.target = center - self.view.extent() / 2.0;
    }

    /// Move the view without easing.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.view = self.view.at(origin);
    }

    /// Ease the view origin toward the target by the lerp factor.
    pub fn update_lerp_center(&mut self) {
        self.view.x = lerp(self.view.x, self.target.x, self.lerp_factor);
        self.view.y = lerp(self.view.y, self.target.y, self.lerp_factor);
    }

    /// World position relative to the view origin (screen position).
    pub fn to_view(&self, world: Vec2) -> Vec2 {
        world - self.origin()
    }
}
