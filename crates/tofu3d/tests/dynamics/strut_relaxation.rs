use na::Point3;
use tofu3d::bounding_volume::Aabb;
use tofu3d::dynamics::{Particle, Strut};

#[test]
fn particle_at_rest_is_unchanged_by_integration() {
    let bounds = Aabb::new(Point3::new(-200.0, -100.0, -200.0), Point3::new(200.0, 200.0, 200.0));
    let mut particle = Particle::new(Point3::new(12.0, -3.0, 7.5), 0.4);

    for _ in 0..100 {
        particle.integrate(0.999, &bounds);
    }

    assert_eq!(particle.position, Point3::new(12.0, -3.0, 7.5));
    assert_eq!(particle.prev_position, Point3::new(12.0, -3.0, 7.5));
}

#[test]
fn isolated_strut_converges_without_moving_its_midpoint() {
    let mut particles = vec![
        Particle::new(Point3::new(0.0, 0.0, 0.0), 0.5),
        Particle::new(Point3::new(0.0, 3.0, 4.0), 0.5),
    ];
    let strut = Strut::new(0, 0, 1, &particles).unwrap();
    assert_relative_eq!(strut.rest_length, 5.0);

    // Stretch it.
    particles[0].position = Point3::new(-1.0, -2.0, 0.5);
    particles[1].position = Point3::new(3.0, 6.0, 9.0);
    let midpoint = na::center(&particles[0].position, &particles[1].position);

    let mut prev_error = (strut.length(&particles) - strut.rest_length).abs();
    for _ in 0..3 {
        strut.relax(0, &mut particles).unwrap();
        let error = (strut.length(&particles) - strut.rest_length).abs();
        assert!(error <= prev_error);
        prev_error = error;

        let new_midpoint = na::center(&particles[0].position, &particles[1].position);
        assert_relative_eq!(new_midpoint, midpoint, epsilon = 1.0e-12);
    }

    assert_relative_eq!(prev_error, 0.0, epsilon = 1.0e-12);
}
