//! Axis-aligned bounding boxes.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box given by its min and max corners.
///
/// An *inverted* box (min > max on some axis) encloses nothing and overlaps
/// nothing; it is what an empty point set bounds to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// The box that overlaps nothing.
    pub fn inverted() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box enclosing all `points`; inverted if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        points.into_iter().fold(Self::inverted(), |bb, p| bb.enclose_point(p))
    }

    pub fn min(&self) -> &Point3<f64> {
        &self.min
    }

    pub fn max(&self) -> &Point3<f64> {
        &self.max
    }

    pub fn is_inverted(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    fn enclose_point(&self, p: &Point3<f64>) -> Self {
        Self {
            min: self.min.inf(p),
            max: self.max.sup(p),
        }
    }

    /// Closed-interval overlap test: boxes that only touch do overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|i| {
            intervals_intersect([self.min[i], self.max[i]], [other.min[i], other.max[i]])
        })
    }

    pub fn contains_point(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

fn intervals_intersect([l1, u1]: [f64; 2], [l2, u2]: [f64; 2]) -> bool {
    l1 <= u1 && l2 <= u2 && l2 <= u1 && u2 >= l1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(min: [f64; 3], max: [f64; 3]) -> BoundingBox {
        BoundingBox::new(Point3::from(min), Point3::from(max))
    }

    #[test]
    fn touching_boxes_overlap() {
        let a = bb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = bb([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn separated_boxes_do_not_overlap() {
        let a = bb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = bb([1.5, 0.0, 0.0], [2.0, 1.0, 1.0]);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn inverted_box_overlaps_nothing() {
        let empty = BoundingBox::from_points(std::iter::empty());
        assert!(empty.is_inverted());
        let everything = bb([-1e9; 3], [1e9; 3]);
        assert!(!empty.overlaps(&everything));
        assert!(!everything.overlaps(&empty));
    }

    #[test]
    fn from_points_encloses_all() {
        let pts = [
            Point3::new(0.0, 2.0, -1.0),
            Point3::new(1.0, -3.0, 4.0),
            Point3::new(0.5, 0.0, 0.0),
        ];
        let b = BoundingBox::from_points(&pts);
        assert_eq!(b.min(), &Point3::new(0.0, -3.0, -1.0));
        assert_eq!(b.max(), &Point3::new(1.0, 2.0, 4.0));
        assert!(pts.iter().all(|p| b.contains_point(p)));
    }
}
