//! Definition of the triangle shape.

use crate::math::{Isometry, Matrix, Point, Real, UnitVector, Vector};

use na::Unit;

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

/// Description of the location of a point on a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TrianglePointLocation {
    /// The point lies on a vertex.
    OnVertex(u32),
    /// The point lies on an edge.
    ///
    /// The 0-st edge is the segment AB.
    /// The 1-st edge is the segment BC.
    /// The 2-nd edge is the segment AC.
    OnEdge(u32, [Real; 2]),
    /// The point lies on the triangle interior.
    ///
    /// The integer indicates on which side of the face the point is. 0 indicates the point
    /// is on the half-space toward `AB × AC` (or on the triangle plane). 1 indicates the point
    /// is on the other half-space.
    OnFace(u32, [Real; 3]),
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Returns `None` for degenerate triangles.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        Unit::try_new(self.scaled_normal(), crate::math::DEFAULT_EPSILON)
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// Returns a new triangle with vertices transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// Returns a new triangle with vertices transformed by the linear map `m`.
    ///
    /// Unlike [`Triangle::transformed`], `m` may include reflections and scaling. A matrix with a
    /// negative determinant flips the triangle's winding.
    #[inline]
    pub fn linearly_transformed(&self, m: &Matrix<Real>) -> Self {
        Triangle::new(
            Point::from(m * self.a.coords),
            Point::from(m * self.b.coords),
            Point::from(m * self.c.coords),
        )
    }

    /// Tests if this triangle is affinely dependent, i.e., its points are almost aligned.
    ///
    /// Such triangles have no well-defined normal nor Voronoï regions.
    pub fn is_affinely_dependent(&self) -> bool {
        const EPS: Real = crate::math::DEFAULT_EPSILON * 100.0;

        let p1p2 = self.b - self.a;
        let p1p3 = self.c - self.a;
        relative_eq!(p1p2.cross(&p1p3).norm_squared(), 0.0, epsilon = EPS * EPS)
    }

    /// Does any vertex of this triangle have a NaN or infinite coordinate?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.iter().chain(self.b.iter()).chain(self.c.iter()).all(|x| x.is_finite())
    }
}
