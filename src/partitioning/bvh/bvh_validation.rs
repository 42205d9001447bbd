use super::{Bvh, BvhNodeContent};

impl Bvh {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (every node is reachable exactly
    /// once from the root and every triangle is owned by exactly one leaf) and geometrically
    /// correct (each internal node's AABB is the union of its children's, and each leaf's AABB is
    /// the union of its triangles'). Leaves must also own between 1 and
    /// [`Bvh::leaf_threshold`] triangles.
    pub fn assert_well_formed(&self) {
        if self.is_empty() {
            assert!(self.triangles.is_empty());
            assert!(self.triangle_ids.is_empty());
            return;
        }

        assert_eq!(self.triangles.len(), self.triangle_ids.len());

        let mut visited = vec![false; self.nodes.len()];
        let mut owned = vec![false; self.triangles.len()];
        self.assert_well_formed_recurse(0, &mut visited, &mut owned);

        assert!(visited.iter().all(|v| *v), "Found unreachable nodes.");
        assert!(owned.iter().all(|o| *o), "Found triangles owned by no leaf.");

        let mut ids = self.triangle_ids.clone();
        ids.sort_unstable();
        assert!(
            ids.iter().enumerate().all(|(i, id)| i as u32 == *id),
            "The triangle ids aren't a permutation of the input indices."
        );
    }

    fn assert_well_formed_recurse(&self, node_id: u32, visited: &mut [bool], owned: &mut [bool]) {
        let node = &self.nodes[node_id as usize];

        if visited[node_id as usize] {
            panic!("Detected loop. Node {} visited twice.", node_id);
        }
        visited[node_id as usize] = true;

        match node.content {
            BvhNodeContent::Leaf { first, len } => {
                assert!(len >= 1, "Leaf {} is empty.", node_id);
                assert!(
                    len as usize <= self.leaf_threshold,
                    "Leaf {} owns {} triangles, more than the threshold {}.",
                    node_id,
                    len,
                    self.leaf_threshold
                );

                let mut union = crate::bounding_volume::Aabb::new_invalid();
                for i in first as usize..(first + len) as usize {
                    assert!(!owned[i], "Triangle slot {} owned twice.", i);
                    owned[i] = true;
                    union.merge(&self.triangles[i].local_aabb());
                }

                assert_eq!(node.aabb, union);
            }
            BvhNodeContent::Internal { left, right } => {
                assert_ne!(left, right);
                self.assert_well_formed_recurse(left, visited, owned);
                self.assert_well_formed_recurse(right, visited, owned);

                let left_aabb = &self.nodes[left as usize].aabb;
                let right_aabb = &self.nodes[right as usize].aabb;
                assert!(node.aabb.contains(left_aabb));
                assert!(node.aabb.contains(right_aabb));
                assert_eq!(node.aabb, left_aabb.merged(right_aabb));
            }
        }
    }
}
