use super::Bvh;
use crate::math::{Point, Real};
use crate::query::{PointProjection, PointQuery};

impl Bvh {
    /// Iterates through the soup indices of every triangle that may overlap the given ball.
    ///
    /// Subtrees are pruned with [`Aabb::intersects_ball_loosely`](crate::bounding_volume::Aabb::intersects_ball_loosely),
    /// so this is a superset of the triangles whose AABB truly overlaps the ball: no triangle
    /// touching the ball is ever missed, but triangles near the corner of a leaf's box may be
    /// yielded spuriously. Triangles are yielded in depth-first leaf order.
    pub fn intersect_ball<'a>(
        &'a self,
        center: &'a Point<Real>,
        radius: Real,
    ) -> impl Iterator<Item = u32> + 'a {
        self.leaves(move |node| node.aabb().intersects_ball_loosely(center, radius))
            .flat_map(move |leaf| self.leaf_triangle_ids(leaf).iter().copied())
    }

    /// Iterates through every triangle at a distance strictly smaller than `radius` from `center`.
    ///
    /// Each candidate from [`Bvh::intersect_ball`] is tested exactly by projecting `center` on it.
    /// Yields the soup index of the triangle together with the projection of `center` on it.
    pub fn intersect_ball_exact<'a>(
        &'a self,
        center: &'a Point<Real>,
        radius: Real,
    ) -> impl Iterator<Item = (u32, PointProjection)> + 'a {
        self.leaves(move |node| node.aabb().intersects_ball_loosely(center, radius))
            .flat_map(|leaf| leaf.leaf_range().into_iter().flatten())
            .filter_map(move |i| {
                let proj = self.triangles[i].project_local_point(center);
                (na::distance(&proj.point, center) < radius).then_some((self.triangle_ids[i], proj))
            })
    }
}
