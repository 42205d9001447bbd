use na::Point3;
use tofu3d::partitioning::Bvh;
use tofu3d::query::contact_ball_bvh;
use tofu3d::shape::{Triangle, TriangleSoup};

#[test]
fn penetrating_ball_is_pushed_above_flat_triangle() {
    let tri = Triangle::new(
        Point3::new(-100.0, 2.0, -100.0),
        Point3::new(0.0, 2.0, 100.0),
        Point3::new(100.0, 2.0, -100.0),
    );
    let normal = tri.normal().unwrap().into_inner();
    assert!(normal.y > 0.0);
    let bvh = Bvh::new(TriangleSoup::new(vec![tri]), 1);

    let radius = 0.75;
    let mut center = Point3::new(1.0, 2.3, -3.0);
    let start = center;
    let num_contacts = contact_ball_bvh(&bvh, &mut center, &start, radius);

    assert_eq!(num_contacts, 1);
    assert!((center - start).dot(&normal) > 0.0);
    assert_relative_eq!(center.y - 2.0, radius, epsilon = 1.0e-12);
}

#[test]
fn ball_far_from_triangle_soup_is_untouched() {
    let soup = TriangleSoup::new(vec![Triangle::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    )]);
    let bvh = Bvh::new(soup, 4);

    // Inside the loosened box of the triangle, but farther than the radius.
    let mut center = Point3::new(1.0, 0.5, 1.0);
    let start = center;
    assert_eq!(contact_ball_bvh(&bvh, &mut center, &start, 0.6), 0);
    assert_eq!(center, start);
}
