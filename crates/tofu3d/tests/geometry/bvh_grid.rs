use na::Point3;
use tofu3d::partitioning::{Bvh, TraversalAction};
use tofu3d::shape::{Triangle, TriangleSoup};

/// A bumpy `n × n` height field, two triangles per cell.
pub fn terrain(n: usize) -> TriangleSoup {
    let height = |i: usize, j: usize| ((i * 7 + j * 13) % 5) as f64 * 0.2;
    let vertex = |i: usize, j: usize| Point3::new(i as f64, height(i, j), j as f64);
    let mut triangles = Vec::new();

    for i in 0..n {
        for j in 0..n {
            triangles.push(Triangle::new(vertex(i, j), vertex(i, j + 1), vertex(i + 1, j + 1)));
            triangles.push(Triangle::new(vertex(i, j), vertex(i + 1, j + 1), vertex(i + 1, j)));
        }
    }

    TriangleSoup::new(triangles)
}

#[test]
fn bvh_over_terrain_is_well_formed() {
    let soup = terrain(12);
    let num_triangles = soup.len();

    for threshold in [1, 3, 8, 1000] {
        let bvh = Bvh::new(soup.clone(), threshold);
        bvh.assert_well_formed();
        assert_eq!(bvh.triangles().len(), num_triangles);

        let root = bvh.root().unwrap();
        for tri in soup.triangles() {
            for pt in tri.vertices() {
                assert!(root.aabb().contains_local_point(&pt));
            }
        }

        let mut max_leaf = 0;
        bvh.traverse(|node| {
            if let Some(range) = node.leaf_range() {
                max_leaf = max_leaf.max(range.len());
            }
            TraversalAction::Continue
        });
        assert!(max_leaf <= threshold);
    }
}

#[test]
fn single_leaf_when_threshold_exceeds_count() {
    let soup = terrain(2);
    let bvh = Bvh::new(soup, 8);
    assert_eq!(bvh.nodes().len(), 1);
    assert!(bvh.root().unwrap().is_leaf());
}
