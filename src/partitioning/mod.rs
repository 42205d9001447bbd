//! Spatial partitioning tools.

pub use self::bvh::{Bvh, BvhNode, BvhNodeContent, Leaves, TraversalAction};

pub mod bvh;
