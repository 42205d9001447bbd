pub use bvh_traverse::{Leaves, TraversalAction};
pub use bvh_tree::{Bvh, BvhNode, BvhNodeContent};

mod bvh_queries;
mod bvh_traverse;
mod bvh_tree;
mod bvh_validation;
