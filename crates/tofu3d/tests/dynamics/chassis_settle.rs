use na::{Point3, Vector3};
use tofu3d::dynamics::{ChassisDesc, SimulationError, SimulationParams, SphereDesc};
use tofu3d::shape::{Triangle, TriangleSoup};
use tofu3d::world::{Frame, World};

const GROUND: f64 = -1.0;
const RADIUS: f64 = 0.5;

fn ground() -> TriangleSoup {
    let corner = |x: f64, z: f64| Point3::new(x, GROUND, z);
    TriangleSoup::new(vec![
        Triangle::new(corner(-20.0, -20.0), corner(-20.0, 20.0), corner(20.0, 20.0)),
        Triangle::new(corner(-20.0, -20.0), corner(20.0, 20.0), corner(20.0, -20.0)),
    ])
}

fn square_chassis() -> ChassisDesc {
    ChassisDesc {
        spheres: vec![
            SphereDesc::new(Vector3::new(1.0, 0.0, 1.5), RADIUS),
            SphereDesc::new(Vector3::new(-1.0, 0.0, 1.5), RADIUS),
            SphereDesc::new(Vector3::new(-1.0, 0.0, -1.5), RADIUS),
            SphereDesc::new(Vector3::new(1.0, 0.0, -1.5), RADIUS),
        ],
        struts: vec![[0, 1], [1, 2], [2, 3], [3, 0], [0, 2], [1, 3]],
    }
}

fn params(seed: u64) -> SimulationParams {
    SimulationParams {
        seed: Some(seed),
        bias_force: Vector3::new(0.0, -0.01, 0.0),
        ..SimulationParams::default()
    }
}

fn assert_resting_on_the_ground(world: &World, last: &Frame) {
    for pt in &last.positions {
        assert!(pt.y >= GROUND, "{:?} fell through the ground", pt);
        assert!(pt.y <= GROUND + RADIUS + 1.0e-6, "{:?} is still airborne", pt);
    }

    let chassis = world.chassis();
    for strut in chassis.struts() {
        assert_relative_eq!(strut.length(chassis.particles()), strut.rest_length, epsilon = 1.0e-6);
    }

    // Lying flat: any remaining rotation is a spin around the vertical axis.
    let up = last.transform.rotation * Vector3::y();
    assert_relative_eq!(up, Vector3::y(), epsilon = 1.0e-6);
    assert_relative_eq!(last.transform.translation.y, GROUND + RADIUS, epsilon = 1.0e-6);
}

#[test]
fn dropped_chassis_settles_on_the_ground() {
    // Far from the edge shared by both ground triangles.
    let start = Point3::new(8.0, 2.0, -8.0);
    let mut world = World::new(ground(), &square_chassis(), start, params(7)).unwrap();
    let mut frames: Vec<Frame> = Vec::new();
    world.run(500, &mut frames).unwrap();

    assert_eq!(frames.len(), 500);
    let last = frames.last().unwrap();
    assert_resting_on_the_ground(&world, last);

    // Only face contacts: nothing pushes the chassis sideways.
    assert!(last.transform.rotation.angle() < 1.0e-6);
    assert_relative_eq!(last.transform.translation.x, start.x, epsilon = 1.0e-6);
    assert_relative_eq!(last.transform.translation.z, start.z, epsilon = 1.0e-6);
}

#[test]
fn chassis_landing_across_a_shared_edge_stays_flat() {
    // Contacts with the shared edge push sideways. Without friction the chassis may slide and
    // spin, but it must stay flat on the ground.
    for seed in [1, 2, 7] {
        let start = Point3::new(0.0, 2.0, 0.0);
        let mut world = World::new(ground(), &square_chassis(), start, params(seed)).unwrap();
        let mut frames: Vec<Frame> = Vec::new();
        world.run(500, &mut frames).unwrap();

        assert_resting_on_the_ground(&world, frames.last().unwrap());
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let start = Point3::new(0.5, 1.0, -0.25);
    let mut a = World::new(ground(), &square_chassis(), start, params(11)).unwrap();
    let mut b = World::new(ground(), &square_chassis(), start, params(11)).unwrap();

    for _ in 0..50 {
        assert_eq!(a.step().unwrap(), b.step().unwrap());
    }
}

#[test]
fn collapsed_strut_aborts_the_tick() {
    // Both spheres are squeezed against the clamp corner, collapsing their strut.
    let desc = ChassisDesc {
        spheres: vec![
            SphereDesc::new(Vector3::new(0.0, 0.0, 0.0), RADIUS),
            SphereDesc::new(Vector3::new(1.0, 0.0, 0.0), RADIUS),
        ],
        struts: vec![[0, 1]],
    };
    let mut params = params(0);
    params.world_bounds.maxs = Point3::new(-5.0, 5.0, 5.0);
    params.world_bounds.mins = Point3::new(-5.0, -5.0, -5.0);
    params.bias_force = Vector3::zeros();

    let mut world = World::new(TriangleSoup::default(), &desc, Point3::origin(), params).unwrap();
    assert_eq!(
        world.step(),
        Err(SimulationError::CollapsedStrut { strut: 0 })
    );
}
