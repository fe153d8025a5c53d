use serde::{Deserialize, Serialize};
use tilewalk_common::{Aabb, Circle};

use crate::collide::{
    Penetration, circle_vs_circle, circle_vs_rect, rect_vs_circle, rect_vs_rect,
};

/// Collision shape in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Rect(Aabb),
    Circle(Circle),
}

impl Collider {
    /// Run the predicate matching both shapes, `self` being the collider that
    /// would be corrected.
    pub fn penetration(&self, other: &Collider) -> Option<Penetration> {
        match (self, other) {
            (Collider::Rect(a), Collider::Rect(b)) => rect_vs_rect(a, b),
            (Collider::Rect(a), Collider::Circle(b)) => rect_vs_circle(a, b),
            (Collider::Circle(a), Collider::Rect(b)) => circle_vs_rect(a, b),
            (Collider::Circle(a), Collider::Circle(b)) => circle_vs_circle(a, b),
        }
    }

    pub fn overlaps(&self, other: &Collider) -> bool {
        self.penetration(other).is_some()
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            Collider::Rect(r) => *r,
            Collider::Circle(c) => c.bounding_box(),
        }
    }
}

impl From<Aabb> for Collider {
    fn from(r: Aabb) -> Self {
        Collider::Rect(r)
    }
}

impl From<Circle> for Collider {
    fn from(c: Circle) -> Self {
        Collider::Circle(c)
    }
}

/// Scan `others` in order and return the index and penetration of the first
/// collider overlapping `subject`.
pub fn first_hit<I>(subject: &Collider, others: I) -> Option<(usize, Penetration)>
where
    I: IntoIterator<Item = Collider>,
{
    others
        .into_iter()
        .enumerate()
        .find_map(|(i, other)| subject.penetration(&other).map(|p| (i, p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_shape_pairs() {
        let wall = Collider::from(Aabb::new(300.0, 40.0, 40.0, 400.0));
        let boxy = Collider::from(Aabb::new(285.0, 100.0, 20.0, 20.0));
        let round = Collider::from(Circle::new(292.0, 100.0, 10.0));

        assert_eq!(boxy.penetration(&wall).unwrap().x, Some(5.0));
        assert_eq!(round.penetration(&wall).unwrap().x, Some(2.0));
        assert!(!Collider::from(Circle::new(0.0, 0.0, 5.0)).overlaps(&wall));
    }

    #[test]
    fn first_hit_reports_index() {
        let subject = Collider::from(Aabb::new(0.0, 0.0, 10.0, 10.0));
        let others = vec![
            Collider::from(Aabb::new(50.0, 50.0, 10.0, 10.0)),
            Collider::from(Circle::new(12.0, 5.0, 3.0)),
            Collider::from(Aabb::new(8.0, 0.0, 10.0, 10.0)),
        ];
        let (index, p) = first_hit(&subject, others).unwrap();
        assert_eq!(index, 1);
        assert_eq!(p.x, Some(1.0));
    }

    #[test]
    fn circle_bounding_box_through_collider() {
        let c = Collider::from(Circle::new(10.0, 20.0, 4.0));
        assert_eq!(c.bounding_box(), Aabb::new(6.0, 16.0, 8.0, 8.0));
    }
}
