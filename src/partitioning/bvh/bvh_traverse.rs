use super::{Bvh, BvhNode};
use smallvec::SmallVec;

const TRAVERSAL_STACK_SIZE: usize = 32;

/// Iterator over the leaves of a [`Bvh`] passing a node predicate, in depth-first order.
///
/// See [`Bvh::leaves`].
pub struct Leaves<'a, Check: Fn(&BvhNode) -> bool> {
    tree: &'a Bvh,
    next: Option<&'a BvhNode>,
    stack: SmallVec<[&'a BvhNode; TRAVERSAL_STACK_SIZE]>,
    check: Check,
}

impl<'a, Check: Fn(&BvhNode) -> bool> Leaves<'a, Check> {
    pub(super) fn new(tree: &'a Bvh, check: Check) -> Leaves<'a, Check> {
        let next = tree.root().filter(|root| check(*root));

        Leaves {
            tree,
            next,
            stack: SmallVec::default(),
            check,
        }
    }
}

impl<'a, Check: Fn(&BvhNode) -> bool> Iterator for Leaves<'a, Check> {
    type Item = &'a BvhNode;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.next.is_none() {
                self.next = self.stack.pop();
            }

            let node = self.next.take()?;

            let Some([left, right]) = node.children() else {
                return Some(node);
            };

            let left = self.tree.node(left);
            let right = self.tree.node(right);

            if (self.check)(left) {
                self.next = Some(left);
            }

            if (self.check)(right) {
                if self.next.is_none() {
                    self.next = Some(right);
                } else {
                    self.stack.push(right);
                }
            }
        }
    }
}

/// Controls the execution flow of [`Bvh::traverse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalAction {
    /// The traversal will continue on the children of the tested node.
    Continue,
    /// The traversal will skip all descendants of the tested node.
    Prune,
    /// The traversal will exit immediately.
    EarlyExit,
}

impl Bvh {
    /// Iterates through the leaves, in depth-first order (left subtrees first).
    ///
    /// The `check_node` closure is called on every traversed node. If it returns `false` then the
    /// node and all its descendants won’t be iterated on. This is useful for pruning whole
    /// sub-trees based on a geometric predicate on the node’s AABB.
    ///
    /// Both children of an internal node are checked before any of them is descended into. Use
    /// [`Bvh::traverse`] if the predicate depends on state mutated while visiting leaves.
    pub fn leaves<F: Fn(&BvhNode) -> bool>(&self, check_node: F) -> Leaves<'_, F> {
        Leaves::new(self, check_node)
    }

    /// Traverses the BVH in pre-order, depth-first, left child before right child.
    ///
    /// Each node (internal or leaf) is handed to `check_node` right before its subtree is
    /// explored, and after the whole subtree of its left sibling has been processed. This means
    /// `check_node` always observes the effects of every leaf visited before it, which is what
    /// makes the sequential collision correction of a moving particle possible.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tofu3d::math::Point;
    /// use tofu3d::partitioning::{Bvh, TraversalAction};
    /// use tofu3d::shape::{Triangle, TriangleSoup};
    ///
    /// let triangles = (0..4)
    ///     .map(|i| {
    ///         let x = i as f64 * 2.0;
    ///         Triangle::new(
    ///             Point::new(x, 0.0, 0.0),
    ///             Point::new(x, 0.0, 1.0),
    ///             Point::new(x + 1.0, 0.0, 0.0),
    ///         )
    ///     })
    ///     .collect();
    /// let bvh = Bvh::new(TriangleSoup::new(triangles), 1);
    ///
    /// let mut num_leaves = 0;
    /// bvh.traverse(|node| {
    ///     if node.is_leaf() {
    ///         num_leaves += 1;
    ///     }
    ///     TraversalAction::Continue
    /// });
    ///
    /// assert_eq!(num_leaves, 4);
    /// ```
    pub fn traverse(&self, mut check_node: impl FnMut(&BvhNode) -> TraversalAction) {
        let mut stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]> = SmallVec::new();

        if self.nodes.is_empty() {
            return;
        }

        stack.push(0);

        while let Some(curr_id) = stack.pop() {
            let node = &self.nodes[curr_id as usize];

            match check_node(node) {
                TraversalAction::Continue => {
                    if let Some([left, right]) = node.children() {
                        stack.push(right);
                        stack.push(left);
                    }
                }
                TraversalAction::Prune => {}
                TraversalAction::EarlyExit => return,
            }
        }
    }
}
