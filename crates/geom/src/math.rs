use glam::Vec2;

/// Linear interpolation from `a` toward `b` by `t`: `a + (b - a) * t`.
///
/// `t` is not clamped. `t == 0.0` yields exactly `a`, `t == 1.0` exactly `b`,
/// and `a == b` stays put for any `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t == 1.0 {
        return b;
    }
    a + (b - a) * t
}

/// Component-wise [`lerp`].
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}
