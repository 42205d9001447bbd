//! Point inclusion and projection.

pub use self::point_query::{PointProjection, PointQuery};

mod point_query;
mod point_triangle;
