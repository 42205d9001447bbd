use crate::math::{Point, Real};
use crate::query::{PointProjection, PointQuery};
use crate::shape::{Triangle, TrianglePointLocation};

#[inline]
fn compute_result(pt: &Point<Real>, proj: Point<Real>) -> PointProjection {
    PointProjection::new(relative_eq!(proj, *pt), proj)
}

/// Projects `pt` on the segment `[a, b]`, returning the projection and its barycentric coordinates.
///
/// Zero-length segments project everything on `a`.
#[inline]
fn project_on_segment(a: &Point<Real>, b: &Point<Real>, pt: &Point<Real>) -> (Point<Real>, [Real; 2]) {
    let ab = b - a;
    let sq_len = ab.norm_squared();

    if sq_len == 0.0 {
        return (*a, [1.0, 0.0]);
    }

    let t = (ab.dot(&(pt - a)) / sq_len).clamp(0.0, 1.0);
    (a + ab * t, [1.0 - t, t])
}

impl Triangle {
    /// Closest point of a triangle with (almost) zero area, taken as the closest point among its
    /// three edges.
    fn project_on_degenerate(&self, pt: &Point<Real>) -> (PointProjection, TrianglePointLocation) {
        let (a, b, c) = (self.a, self.b, self.c);
        let candidates = [
            (project_on_segment(&a, &b, pt), 0),
            (project_on_segment(&b, &c, pt), 1),
            (project_on_segment(&a, &c, pt), 2),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if na::distance_squared(&candidate.0 .0, pt) < na::distance_squared(&best.0 .0, pt) {
                best = *candidate;
            }
        }

        let ((proj, bcoords), edge) = best;
        (
            compute_result(pt, proj),
            TrianglePointLocation::OnEdge(edge, bcoords),
        )
    }

    /// Computes the closest point of the triangle to `pt`, and the feature it lies on.
    ///
    /// The Voronoï regions are tested in this order: vertex `a`, vertex `b`, edge `ab`, vertex
    /// `c`, edge `ac`, edge `bc`, and finally the face. Points on the boundary between two regions
    /// are attributed to the first region of that list. Triangles with (almost) zero area have no
    /// well-defined regions: the point is projected on the closest of their edges instead.
    pub fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
    ) -> (PointProjection, TrianglePointLocation) {
        if self.is_affinely_dependent() {
            return self.project_on_degenerate(pt);
        }

        let a = self.a;
        let b = self.b;
        let c = self.c;

        let ab = b - a;
        let ac = c - a;
        let ap = pt - a;

        let ab_ap = ab.dot(&ap);
        let ac_ap = ac.dot(&ap);

        if ab_ap <= 0.0 && ac_ap <= 0.0 {
            // Voronoï region of `a`.
            return (compute_result(pt, a), TrianglePointLocation::OnVertex(0));
        }

        let bp = pt - b;
        let ab_bp = ab.dot(&bp);
        let ac_bp = ac.dot(&bp);

        if ab_bp >= 0.0 && ac_bp <= ab_bp {
            // Voronoï region of `b`.
            return (compute_result(pt, b), TrianglePointLocation::OnVertex(1));
        }

        let vc = ab_ap * ac_bp - ab_bp * ac_ap;
        if vc <= 0.0 && ab_ap >= 0.0 && ab_bp <= 0.0 {
            // Voronoï region of `ab`.
            // NOTE: ab_ap - ab_bp = |ab|² > 0 for a non-degenerate triangle.
            let v = ab_ap / (ab_ap - ab_bp);
            return (
                compute_result(pt, a + ab * v),
                TrianglePointLocation::OnEdge(0, [1.0 - v, v]),
            );
        }

        let cp = pt - c;
        let ab_cp = ab.dot(&cp);
        let ac_cp = ac.dot(&cp);

        if ac_cp >= 0.0 && ab_cp <= ac_cp {
            // Voronoï region of `c`.
            return (compute_result(pt, c), TrianglePointLocation::OnVertex(2));
        }

        let vb = ab_cp * ac_ap - ab_ap * ac_cp;
        if vb <= 0.0 && ac_ap >= 0.0 && ac_cp <= 0.0 {
            // Voronoï region of `ac`.
            let w = ac_ap / (ac_ap - ac_cp);
            return (
                compute_result(pt, a + ac * w),
                TrianglePointLocation::OnEdge(2, [1.0 - w, w]),
            );
        }

        let va = ab_bp * ac_cp - ab_cp * ac_bp;
        if va <= 0.0 && (ac_bp - ab_bp) >= 0.0 && (ab_cp - ac_cp) >= 0.0 {
            // Voronoï region of `bc`.
            let w = (ac_bp - ab_bp) / ((ac_bp - ab_bp) + (ab_cp - ac_cp));
            return (
                compute_result(pt, b + (c - b) * w),
                TrianglePointLocation::OnEdge(1, [1.0 - w, w]),
            );
        }

        // Voronoï region of the face.
        // NOTE: va + vb + vc = |ab × ac|² > 0 for a non-degenerate triangle.
        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        let face_side = if self.scaled_normal().dot(&ap) >= 0.0 {
            0
        } else {
            1
        };

        (
            compute_result(pt, a + ab * v + ac * w),
            TrianglePointLocation::OnFace(face_side, [1.0 - v - w, v, w]),
        )
    }
}

impl PointQuery for Triangle {
    #[inline]
    fn project_local_point(&self, pt: &Point<Real>) -> PointProjection {
        self.project_local_point_and_get_location(pt).0
    }
}
