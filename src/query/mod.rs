//! Non-persistent geometric queries.

pub use self::contact::{contact_ball_bvh, push_out_of_triangle};
pub use self::point::{PointProjection, PointQuery};

pub mod contact;
pub mod point;
