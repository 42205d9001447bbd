use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::{Triangle, TriangleSoup};
use core::ops::Range;

/// The children of a BVH node, or the triangles it owns if it is a leaf.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum BvhNodeContent {
    /// A leaf owning the contiguous range `first..first + len` of the tree's triangles.
    Leaf {
        /// Index of the first triangle owned by this leaf.
        first: u32,
        /// Number of triangles owned by this leaf. Never zero.
        len: u32,
    },
    /// An internal node with exactly two children, identified by their index in the node arena.
    Internal {
        /// Index of the left child (triangles with the smallest centroids on the split axis).
        left: u32,
        /// Index of the right child.
        right: u32,
    },
}

/// A node (internal or leaf) of a BVH.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvhNode {
    /// Union of the AABBs of every triangle below this node.
    pub(super) aabb: Aabb,
    pub(super) content: BvhNodeContent,
}

impl BvhNode {
    #[inline(always)]
    fn leaf(aabb: Aabb, first: u32, len: u32) -> Self {
        Self {
            aabb,
            content: BvhNodeContent::Leaf { first, len },
        }
    }

    /// This node’s AABB.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The min corner of this node’s AABB.
    #[inline]
    pub fn mins(&self) -> Point<Real> {
        self.aabb.mins
    }

    /// The max corner of this node’s AABB.
    #[inline]
    pub fn maxs(&self) -> Point<Real> {
        self.aabb.maxs
    }

    /// The children of this node, or the triangles it owns.
    #[inline]
    pub fn content(&self) -> BvhNodeContent {
        self.content
    }

    /// Is this node a leaf?
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, BvhNodeContent::Leaf { .. })
    }

    /// If this node is a leaf, the range of triangles (in [`Bvh::triangles`] order) it owns.
    #[inline]
    pub fn leaf_range(&self) -> Option<Range<usize>> {
        match self.content {
            BvhNodeContent::Leaf { first, len } => {
                Some(first as usize..first as usize + len as usize)
            }
            BvhNodeContent::Internal { .. } => None,
        }
    }

    /// If this node is internal, the indices of its left and right children.
    #[inline]
    pub fn children(&self) -> Option<[u32; 2]> {
        match self.content {
            BvhNodeContent::Internal { left, right } => Some([left, right]),
            BvhNodeContent::Leaf { .. } => None,
        }
    }
}

/// A static Bounding Volume Hierarchy over a triangle soup.
///
/// The tree is built once by recursive median splits and never updated afterward. Nodes live in
/// a flat arena (the root is at index 0) and reference their children by index. Internal nodes
/// own no triangles: every triangle belongs to exactly one leaf, and each leaf owns a contiguous
/// range of [`Bvh::triangles`].
///
/// An empty soup results in an empty tree with no node at all. Every query on such a tree yields
/// nothing.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bvh {
    pub(super) nodes: Vec<BvhNode>,
    /// The soup's triangles, reordered so that each leaf owns a contiguous range.
    pub(super) triangles: Vec<Triangle>,
    /// `triangle_ids[i]` is the index, in the original soup, of `triangles[i]`.
    pub(super) triangle_ids: Vec<u32>,
    pub(super) leaf_threshold: usize,
}

impl Bvh {
    /// Builds a BVH over every triangle of `soup`.
    ///
    /// A set of at most `leaf_threshold` triangles becomes a single leaf. Larger sets are split in
    /// two halves of (almost) equal size: the triangles are sorted by the coordinate of their
    /// centroid along the longest axis of their AABB (see [`Aabb::split_axis`]) and the sorted list
    /// is cut at its median index. Note that `leaf_threshold` bounds the size of the leaves, not
    /// the depth of the tree.
    ///
    /// # Panics
    ///
    /// Panics if `leaf_threshold` is zero.
    pub fn new(soup: TriangleSoup, leaf_threshold: usize) -> Self {
        assert!(leaf_threshold >= 1, "The BVH leaf threshold must be at least 1.");

        let input = soup.into_triangles();
        let mut result = Bvh {
            nodes: Vec::new(),
            triangles: Vec::with_capacity(input.len()),
            triangle_ids: (0..input.len() as u32).collect(),
            leaf_threshold,
        };

        if input.is_empty() {
            log::debug!("Built an empty BVH.");
            return result;
        }

        let mut ids = core::mem::take(&mut result.triangle_ids);
        let _ = result.build_recursive(&input, &mut ids, 0);
        result.triangles = ids.iter().map(|id| input[*id as usize]).collect();
        result.triangle_ids = ids;

        log::debug!(
            "Built a BVH over {} triangles: {} nodes, {} leaves, depth {}.",
            result.triangles.len(),
            result.nodes.len(),
            result.leaf_count(),
            result.depth()
        );

        result
    }

    fn build_recursive(&mut self, input: &[Triangle], ids: &mut [u32], first: u32) -> u32 {
        let aabb = Aabb::from_points(ids.iter().flat_map(|id| input[*id as usize].vertices()));
        let node_id = self.nodes.len() as u32;
        self.nodes.push(BvhNode::leaf(aabb, first, ids.len() as u32));

        if ids.len() <= self.leaf_threshold {
            return node_id;
        }

        let axis = aabb.split_axis();
        let centroid = |id: &u32| {
            let tri = &input[*id as usize];
            (tri.a[axis] + tri.b[axis] + tri.c[axis]) / 3.0
        };
        // NOTE: the sort is stable so triangles with equal centroids keep their input order.
        ids.sort_by(|a, b| centroid(a).total_cmp(&centroid(b)));

        let mid = ids.len() / 2;
        let (left_ids, right_ids) = ids.split_at_mut(mid);
        let left = self.build_recursive(input, left_ids, first);
        let right = self.build_recursive(input, right_ids, first + mid as u32);
        self.nodes[node_id as usize].content = BvhNodeContent::Internal { left, right };

        node_id
    }

    /// Does this tree contain no triangle?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root of this tree, if it isn't empty.
    #[inline]
    pub fn root(&self) -> Option<&BvhNode> {
        self.nodes.first()
    }

    /// The node arena. The root, if any, is at index 0.
    #[inline]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// The node at index `id` in the arena.
    #[inline]
    pub fn node(&self, id: u32) -> &BvhNode {
        &self.nodes[id as usize]
    }

    /// The indexed triangles, in leaf order.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The index, in the soup given at construction, of the `i`-th triangle of
    /// [`Bvh::triangles`].
    #[inline]
    pub fn triangle_id(&self, i: usize) -> u32 {
        self.triangle_ids[i]
    }

    /// The maximum number of triangles per leaf this tree was built with.
    #[inline]
    pub fn leaf_threshold(&self) -> usize {
        self.leaf_threshold
    }

    /// The triangles owned by `node`, or an empty slice if `node` is internal.
    #[inline]
    pub fn leaf_triangles(&self, node: &BvhNode) -> &[Triangle] {
        node.leaf_range()
            .map(|range| &self.triangles[range])
            .unwrap_or(&[])
    }

    /// The soup indices of the triangles owned by `node`, or an empty slice if `node` is internal.
    #[inline]
    pub fn leaf_triangle_ids(&self, node: &BvhNode) -> &[u32] {
        node.leaf_range()
            .map(|range| &self.triangle_ids[range])
            .unwrap_or(&[])
    }

    /// The number of leaves of this tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// The number of nodes on the longest root-to-leaf path (0 for an empty tree).
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: smallvec::SmallVec<[(u32, usize); 32]> = smallvec::SmallVec::new();

        if !self.nodes.is_empty() {
            stack.push((0, 1));
        }

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);

            if let Some([left, right]) = self.nodes[id as usize].children() {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }

        max_depth
    }
}
