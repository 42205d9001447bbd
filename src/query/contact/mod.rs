//! Penetration resolution between balls and static geometry.

pub use self::contact_ball_bvh::{contact_ball_bvh, push_out_of_triangle};

mod contact_ball_bvh;
