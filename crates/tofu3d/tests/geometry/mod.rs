mod ball_ground_contact;
mod bvh_grid;
#[cfg(feature = "wavefront")]
mod obj_loading;
