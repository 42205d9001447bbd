use crate::math::{Point, Real};

/// The closest point of a shape to a query point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointProjection {
    /// Whether the query point already lies on the shape, up to rounding errors.
    pub is_inside: bool,
    /// The closest point of the shape.
    pub point: Point<Real>,
}

impl PointProjection {
    /// Initializes a new `PointProjection`.
    pub fn new(is_inside: bool, point: Point<Real>) -> Self {
        PointProjection { is_inside, point }
    }
}

/// Closest-point queries against shapes expressed in the frame of the query point.
pub trait PointQuery {
    /// Projects `pt` on `self`.
    fn project_local_point(&self, pt: &Point<Real>) -> PointProjection;

    /// The distance between `pt` and its projection on `self`.
    fn distance_to_local_point(&self, pt: &Point<Real>) -> Real {
        na::distance(pt, &self.project_local_point(pt).point)
    }
}
