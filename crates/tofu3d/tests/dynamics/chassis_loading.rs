use na::{Matrix3, Point3, Vector3};
use tofu3d::dynamics::{Chassis, ChassisError, SimulationParams};
use tofu3d::io::{parse_chassis, LoadError};

const TOFU: &str = "\
# four wheels
v  1.0 0.0  2.0 0.4
v -1.0 0.0  2.0 0.4
v  1.0 0.0 -2.0 0.4
v -1.0 0.0 -2.0 0.4
c 0 1
c 2 3
c 0 2
c 1 3
c 0 3
c 1 2
";

#[test]
fn loaded_chassis_is_built_at_start() {
    let desc = parse_chassis(TOFU).unwrap();
    assert_eq!(desc.spheres.len(), 4);
    assert_eq!(desc.struts.len(), 6);

    let params = SimulationParams::default();
    let chassis = Chassis::new(&desc, Point3::new(0.0, 3.0, 0.0), &params).unwrap();
    assert_eq!(chassis.particles()[3].position, Point3::new(-1.0, 3.0, -2.0));
    assert_relative_eq!(chassis.struts()[4].rest_length, 20.0f64.sqrt());
}

#[test]
fn source_axes_are_remapped() {
    // (x, y, z) -> (-x, -z, y)
    let mut desc = parse_chassis(TOFU).unwrap();
    let remap = Matrix3::new(-1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0);
    desc.linearly_transform_by(&remap);
    assert_eq!(desc.spheres[0].offset, Vector3::new(-1.0, -2.0, 0.0));
}

#[test]
fn broken_chassis_files_are_rejected() {
    let params = SimulationParams::default();

    let desc = parse_chassis("v 0 0 0 1\nv 0 0 0 1\nc 0 1\n").unwrap();
    assert_eq!(
        Chassis::new(&desc, Point3::origin(), &params).err(),
        Some(ChassisError::ZeroRestLength {
            strut: 0,
            a: 0,
            b: 1
        })
    );

    let desc = parse_chassis("v 0 0 0 1\nv 1 0 0 1\nc 0 2\n").unwrap();
    assert!(matches!(
        Chassis::new(&desc, Point3::origin(), &params),
        Err(ChassisError::ParticleIndexOutOfBounds { index: 2, .. })
    ));

    assert!(matches!(
        parse_chassis("v 0 0 zero 1\n"),
        Err(LoadError::Parse { line: 1, .. })
    ));
}
