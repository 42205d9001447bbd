use na::{Matrix3, Point3};
use tofu3d::io::{load_obj, LoadError};
use tofu3d::partitioning::Bvh;

const RAMP: &str = "\
mtllib track.mtl
o ramp
v -5 0 -5
v 5 0 -5
v 5 2 5
v -5 2 5
vt 0 0
vt 1 0
vt 1 1
vt 0 1
usemtl asphalt
f 1/1 2/2 3/3 4/4
f 1/1 1/1 2/2
";

#[test]
fn ramp_is_loaded_and_indexed() {
    let soup = load_obj(RAMP.as_bytes()).unwrap();

    // The second face is degenerate and discarded.
    assert_eq!(soup.len(), 2);

    let bvh = Bvh::new(soup, 1);
    bvh.assert_well_formed();
    assert_eq!(bvh.leaf_count(), 2);

    let root = bvh.root().unwrap();
    assert_eq!(root.mins(), Point3::new(-5.0, 0.0, -5.0));
    assert_eq!(root.maxs(), Point3::new(5.0, 2.0, 5.0));
}

#[test]
fn source_axes_can_be_flipped() {
    let mut soup = load_obj(RAMP.as_bytes()).unwrap();
    soup.linearly_transform_by(&Matrix3::from_diagonal(&na::Vector3::new(-1.0, -1.0, 1.0)));

    let aabb = soup.local_aabb();
    assert_eq!(aabb.mins, Point3::new(-5.0, -2.0, -5.0));
    assert_eq!(aabb.maxs, Point3::new(5.0, 0.0, 5.0));
}

#[test]
fn short_faces_fail_the_load() {
    let text = "v 0 0 0\nv 1 0 0\nf 1 2\n";
    assert!(load_obj(text.as_bytes()).is_err());

    let missing = "v 0 0 0\nf 1 2 3\n";
    assert!(matches!(
        load_obj(missing.as_bytes()),
        Err(LoadError::VertexIndexOutOfBounds { face: 0, .. })
    ));
}
