//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};
use na;
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB).
///
/// - **mins**: The point with the smallest coordinates on each axis.
/// - **maxs**: The point with the largest coordinates on each axis.
/// - **Invariant**: `mins[i] ≤ maxs[i]` on every axis, except for the "invalid" AABB returned
///   by [`Aabb::new_invalid`] which is the neutral element of [`Aabb::merge`].
///
/// The same type is used for BVH node bounds and for the world clamp box that keeps particles
/// inside the simulated area.
///
/// # Example
///
/// ```rust
/// use tofu3d::bounding_volume::Aabb;
/// use tofu3d::math::Point;
///
/// let aabb = Aabb::from_points([
///     Point::new(1.0, 2.0, 3.0),
///     Point::new(-1.0, 4.0, 2.0),
///     Point::new(0.0, 0.0, 5.0),
/// ]);
///
/// assert_eq!(aabb.mins, Point::new(-1.0, 0.0, 2.0));
/// assert_eq!(aabb.maxs, Point::new(1.0, 4.0, 5.0));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::max_values` and `maxs`components set to `-Real::max_values`.
    ///
    /// This is often used as the initial values of some AABB merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Creates a new AABB that tightly encloses a set of points.
    ///
    /// Returns [`Aabb::new_invalid`] if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// Is `mins[i] <= maxs[i]` on every axis?
    #[inline]
    pub fn is_valid(&self) -> bool {
        na::partial_le(&self.mins, &self.maxs)
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// The axis along which this AABB should be split when partitioning its content.
    ///
    /// The X axis is only selected if its extent is strictly greater than both other extents,
    /// then the Y axis if its extent is strictly greater than the Z extent. Every other case
    /// (including ties) falls back to the Z axis.
    #[inline]
    pub fn split_axis(&self) -> usize {
        let extents = self.extents();

        if extents.x > extents.y && extents.x > extents.z {
            0
        } else if extents.y > extents.z {
            1
        } else {
            2
        }
    }

    /// Does this AABB fully enclose `other`?
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    /// Enlarges this AABB so it also encloses `other`.
    #[inline]
    pub fn merge(&mut self, other: &Aabb) {
        *self = self.merged(other);
    }

    /// The smallest AABB enclosing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.mins.inf(&other.mins), self.maxs.sup(&other.maxs))
    }

    /// Does this AABB contains a point expressed in the same coordinate frame as `self`?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Conservative ball-vs-AABB overlap test.
    ///
    /// This runs a separating-axis test of the ball's center against `self` enlarged by `radius`
    /// on each side. It never misses a ball that truly overlaps the box, but it does accept balls
    /// located near a corner of the enlarged box without touching the original one. Callers must
    /// treat a positive answer as "maybe".
    #[inline]
    pub fn intersects_ball_loosely(&self, center: &Point<Real>, radius: Real) -> bool {
        for i in 0..DIM {
            if center[i] > self.maxs[i] + radius || center[i] < self.mins[i] - radius {
                return false;
            }
        }

        true
    }

    /// Projects `point` on this AABB by clamping each of its coordinates independently.
    #[inline]
    pub fn clamp_point(&self, point: &Point<Real>) -> Point<Real> {
        point.sup(&self.mins).inf(&self.maxs)
    }

    /// Computes the distance between `point` and this AABB (zero if the point is inside).
    #[inline]
    pub fn distance_to_local_point(&self, point: &Point<Real>) -> Real {
        na::distance(point, &self.clamp_point(point))
    }
}
