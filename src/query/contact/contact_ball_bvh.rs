use crate::math::{Point, Real, UnitVector};
use crate::partitioning::{Bvh, TraversalAction};
use crate::query::PointQuery;
use crate::shape::Triangle;
use na::Unit;

/// Pushes a ball out of every triangle of `bvh` it penetrates.
///
/// The tree is traversed depth-first, left child before right child, and each node is tested
/// against the ball's *current* center: a correction applied inside one leaf affects which of
/// the subsequent nodes are visited. Every penetrating triangle moves the center immediately,
/// along the direction from its closest point to the center, by exactly the penetration depth.
/// Contacts are not averaged, so a later correction may partially undo an earlier one.
///
/// `prev_center` only orients the push when the center lies exactly on a triangle.
///
/// Returns the number of corrections applied.
pub fn contact_ball_bvh(
    bvh: &Bvh,
    center: &mut Point<Real>,
    prev_center: &Point<Real>,
    radius: Real,
) -> usize {
    let mut num_contacts = 0;

    bvh.traverse(|node| {
        if !node.aabb().intersects_ball_loosely(center, radius) {
            return TraversalAction::Prune;
        }

        for tri in bvh.leaf_triangles(node) {
            if push_out_of_triangle(tri, center, prev_center, radius) {
                num_contacts += 1;
            }
        }

        TraversalAction::Continue
    });

    num_contacts
}

/// Pushes a ball out of a single triangle, returning `true` if it was penetrating.
pub fn push_out_of_triangle(
    tri: &Triangle,
    center: &mut Point<Real>,
    prev_center: &Point<Real>,
    radius: Real,
) -> bool {
    let proj = tri.project_local_point(center);
    let dir = *center - proj.point;
    let dist = dir.norm();

    if dist >= radius {
        return false;
    }

    let normal = if dist > 0.0 {
        Unit::new_unchecked(dir / dist)
    } else if let Some(n) = contact_normal_on_plane(tri, center, prev_center) {
        n
    } else {
        return false;
    };

    *center += *normal * (radius - dist);
    true
}

// The center lies on the triangle: use its normal, facing where the ball came from.
fn contact_normal_on_plane(
    tri: &Triangle,
    center: &Point<Real>,
    prev_center: &Point<Real>,
) -> Option<UnitVector<Real>> {
    let normal = tri.normal()?;

    if normal.dot(&(prev_center - center)) < 0.0 {
        Some(-normal)
    } else {
        Some(normal)
    }
}
