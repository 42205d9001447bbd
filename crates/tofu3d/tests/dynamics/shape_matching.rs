use na::{Point3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;
use tofu3d::dynamics::shape_matching::match_shape;
use tofu3d::dynamics::ShapeMatchingParams;

fn box_corners() -> Vec<Vector3<f64>> {
    let mut corners = Vec::new();
    for x in [-1.5, 1.5] {
        for y in [-0.5, 0.5] {
            for z in [-2.0, 2.0] {
                corners.push(Vector3::new(x, y, z));
            }
        }
    }
    corners
}

#[test]
fn unmoved_shape_has_zero_rotation_angle() {
    let params = ShapeMatchingParams::default();
    let reference = box_corners();
    let positions: Vec<_> = reference
        .iter()
        .map(|v| Point3::new(10.0, 1.0, 0.0) + v)
        .collect();

    let transform = match_shape(&reference, &positions, &params);
    let (angle, _) = transform.angle_axis(params.axis_epsilon);

    assert_relative_eq!(angle, 0.0, epsilon = 1.0e-5);
    assert_relative_eq!(transform.translation, Point3::new(10.0, 1.0, 0.0), epsilon = 1.0e-12);
}

#[test]
fn quarter_turns_about_every_axis_are_recovered() {
    let params = ShapeMatchingParams::default();
    let reference = box_corners();

    for axis in [Vector3::x_axis(), Vector3::y_axis(), Vector3::z_axis(), -Vector3::y_axis()] {
        let rotation = UnitQuaternion::from_axis_angle(&axis, FRAC_PI_2);
        let positions: Vec<_> = reference
            .iter()
            .map(|v| Point3::from(rotation * v))
            .collect();

        let transform = match_shape(&reference, &positions, &params);
        assert!(transform.rotation.angle_to(&rotation) < 1.0e-6);

        let (angle, found_axis) = transform.angle_axis(params.axis_epsilon);
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1.0e-6);
        assert_relative_eq!(found_axis.into_inner(), axis.into_inner(), epsilon = 1.0e-6);
    }
}

#[test]
fn flat_shapes_are_matched() {
    // All points in the plane y = 0: a case where an unshifted power iteration can stall.
    let params = ShapeMatchingParams::default();
    let reference = vec![
        Vector3::new(-1.0, 0.0, -1.0),
        Vector3::new(1.0, 0.0, -1.0),
        Vector3::new(1.0, 0.0, 1.0),
        Vector3::new(-1.0, 0.0, 1.0),
    ];
    let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.4);
    let positions: Vec<_> = reference.iter().map(|v| Point3::from(rotation * v)).collect();

    let transform = match_shape(&reference, &positions, &params);
    assert!(transform.rotation.angle_to(&rotation) < 1.0e-6);
}
