//! Drops a chassis on a track and prints where it ends up.
//!
//! Usage: `cargo run --example drop_chassis [track.obj chassis.txt]`
//!
//! Without arguments, a box-shaped chassis is dropped on a flat ground. Asset files are
//! converted to `+Y` up after loading.

extern crate nalgebra as na;

use na::{Matrix3, Point3, Vector3};
use std::error::Error;
use tofu3d::dynamics::{ChassisDesc, SimulationParams, SphereDesc};
use tofu3d::io;
use tofu3d::shape::{Triangle, TriangleSoup};
use tofu3d::world::{Frame, World};

const TICKS: usize = 600;

fn default_track() -> TriangleSoup {
    let corner = |x: f64, z: f64| Point3::new(x, 0.0, z);
    TriangleSoup::new(vec![
        Triangle::new(corner(-50.0, -50.0), corner(-50.0, 50.0), corner(50.0, 50.0)),
        Triangle::new(corner(-50.0, -50.0), corner(50.0, 50.0), corner(50.0, -50.0)),
    ])
}

fn default_chassis() -> ChassisDesc {
    let mut spheres = Vec::new();
    for x in [-1.0, 1.0] {
        for y in [0.0, 0.8] {
            for z in [-2.0, 2.0] {
                spheres.push(SphereDesc::new(Vector3::new(x, y, z), 0.4));
            }
        }
    }

    let mut struts = Vec::new();
    for i in 0..spheres.len() as u32 {
        for j in i + 1..spheres.len() as u32 {
            struts.push([i, j]);
        }
    }

    ChassisDesc { spheres, struts }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();

    let (track, chassis) = if let [_, track_path, chassis_path] = &args[..] {
        // The source assets mirror the x axis, and the chassis files store (x, z, y).
        let mut track = io::load_obj_file(track_path)?;
        track.linearly_transform_by(&Matrix3::from_diagonal(&Vector3::new(-1.0, 1.0, 1.0)));
        let mut chassis = io::load_chassis_file(chassis_path)?;
        chassis.linearly_transform_by(&Matrix3::new(
            -1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, //
            0.0, 1.0, 0.0,
        ));
        (track, chassis)
    } else {
        (default_track(), default_chassis())
    };

    println!(
        "Track: {} triangles. Chassis: {} spheres, {} struts.",
        track.len(),
        chassis.spheres.len(),
        chassis.struts.len()
    );

    let params = SimulationParams {
        seed: Some(0),
        bias_force: Vector3::new(0.0, -0.002, 0.0),
        ..SimulationParams::default()
    };
    let mut world = World::new(track, &chassis, Point3::new(0.0, 5.0, 0.0), params)?;

    world.run(TICKS, &mut |tick: usize, frame: &Frame| {
        if tick % 100 == 0 {
            let (angle, axis) = frame.transform.angle_axis(params.shape_matching.axis_epsilon);
            println!(
                "tick {:4}: centroid {:?}, rotation {:.4} rad about {:?}",
                tick,
                frame.transform.translation.coords.as_slice(),
                angle,
                axis.as_slice()
            );
        }
    })?;

    Ok(())
}
