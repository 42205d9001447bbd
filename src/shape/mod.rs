//! Shapes the simulation collides with.

pub use self::triangle::{Triangle, TrianglePointLocation};
pub use self::triangle_soup::TriangleSoup;

mod triangle;
mod triangle_soup;
