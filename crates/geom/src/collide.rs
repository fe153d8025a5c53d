use glam::Vec2;
use tilewalk_common::{Aabb, Circle};

/// Axis-aligned correction that separates the first collider from the second.
///
/// An axis is `None` when the overlap on it is too deep to be resolved by the
/// half-extent rule: the predicate still reports the overlap, but no
/// correction is offered on that axis. Subtracting a present delta from the
/// first collider's position leaves the two colliders exactly touching.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Penetration {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl Penetration {
    /// Correction vector with unset axes treated as zero.
    pub fn correction(&self) -> Vec2 {
        Vec2::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    /// Whether at least one axis carries a correction.
    pub fn is_resolvable(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// Correction along one axis for span `a` against span `b`.
///
/// The right/bottom side of `a` is tried first, then the left/top side.
/// Only one side can satisfy `overlap < limit` when `limit` is half of `a`'s
/// extent, so the smaller correction always wins.
fn axis_delta(a_min: f32, a_max: f32, b_min: f32, b_max: f32, limit: f32) -> Option<f32> {
    if a_max > b_min && a_max - b_min < limit {
        Some(a_max - b_min)
    } else if b_max > a_min && b_max - a_min < limit {
        Some(-(b_max - a_min))
    } else {
        None
    }
}

fn spans_penetration(a: &Aabb, b: &Aabb, limit_x: f32, limit_y: f32) -> Penetration {
    Penetration {
        x: axis_delta(a.x, a.right(), b.x, b.right(), limit_x),
        y: axis_delta(a.y, a.bottom(), b.y, b.bottom(), limit_y),
    }
}

/// Strict four-inequality AABB test; touching edges do not overlap.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.right() > b.x && a.bottom() > b.y && b.right() > a.x && b.bottom() > a.y
}

fn circle_overlaps_rect(a: &Circle, b: &Aabb) -> bool {
    let closest = Vec2::new(a.x.clamp(b.x, b.right()), a.y.clamp(b.y, b.bottom()));
    closest.distance_squared(a.center()) < a.r * a.r
}

/// AABB against AABB.
///
/// Deltas are offered only when the overlap on an axis is smaller than half
/// of `a`'s extent on that axis.
pub fn rect_vs_rect(a: &Aabb, b: &Aabb) -> Option<Penetration> {
    if !overlaps(a, b) {
        return None;
    }
    Some(spans_penetration(a, b, a.w / 2.0, a.h / 2.0))
}

/// Circle against circle. Overlap is tested on center distance; deltas use
/// the circles' axis spans with a threshold of `a.r / 2`.
pub fn circle_vs_circle(a: &Circle, b: &Circle) -> Option<Penetration> {
    let reach = a.r + b.r;
    if a.center().distance_squared(b.center()) >= reach * reach {
        return None;
    }
    let limit = a.r / 2.0;
    Some(spans_penetration(
        &a.bounding_box(),
        &b.bounding_box(),
        limit,
        limit,
    ))
}

/// Circle against AABB, using the closest point of `b` to the circle center.
pub fn circle_vs_rect(a: &Circle, b: &Aabb) -> Option<Penetration> {
    if !circle_overlaps_rect(a, b) {
        return None;
    }
    let limit = a.r / 2.0;
    Some(spans_penetration(&a.bounding_box(), b, limit, limit))
}

/// AABB against circle; deltas separate the rectangle from the circle's span.
pub fn rect_vs_circle(a: &Aabb, b: &Circle) -> Option<Penetration> {
    if !circle_overlaps_rect(b, a) {
        return None;
    }
    Some(spans_penetration(a, &b.bounding_box(), a.w / 2.0, a.h / 2.0))
}

/// First-hit scan of a circle against many rectangles.
///
/// Returns the penetration against the first overlapping element, not the
/// deepest one.
pub fn circle_vs_rect_array(a: &Circle, bs: &[Aabb]) -> Option<Penetration> {
    bs.iter().find_map(|b| circle_vs_rect(a, b))
}

/// First-hit scan of a rectangle against many rectangles.
pub fn rect_vs_rect_array(a: &Aabb, bs: &[Aabb]) -> Option<Penetration> {
    bs.iter().find_map(|b| rect_vs_rect(a, b))
}
