/*!
tofu3d
========

**tofu3d** simulates a soft-body vehicle chassis driving over static triangle
geometry.

The chassis looks rigid, but its motion comes from a network of Verlet
particles held together by distance constraints ("struts"). Each particle
collides as a sphere against a bounding volume hierarchy built once over the
track's triangles. The chassis's orientation for rendering comes from fitting
the best rigid rotation to the deformed particle cloud on every tick.

The usual entry point is [`world::World`]:

```
use tofu3d::dynamics::{ChassisDesc, SimulationParams, SphereDesc};
use tofu3d::math::{Point, Vector};
use tofu3d::shape::{Triangle, TriangleSoup};
use tofu3d::world::World;

let ground = TriangleSoup::new(vec![
    Triangle::new(
        Point::new(-10.0, 0.0, -10.0),
        Point::new(-10.0, 0.0, 10.0),
        Point::new(10.0, 0.0, 10.0),
    ),
    Triangle::new(
        Point::new(-10.0, 0.0, -10.0),
        Point::new(10.0, 0.0, 10.0),
        Point::new(10.0, 0.0, -10.0),
    ),
]);

let chassis = ChassisDesc {
    spheres: vec![
        SphereDesc::new(Vector::new(-1.0, 0.0, 0.0), 0.5),
        SphereDesc::new(Vector::new(1.0, 0.0, 0.0), 0.5),
    ],
    struts: vec![[0, 1]],
};

let params = SimulationParams {
    seed: Some(42),
    ..SimulationParams::default()
};

let mut world = World::new(ground, &chassis, Point::new(0.0, 1.0, 0.0), params).unwrap();
let frame = world.step().unwrap();
assert_eq!(frame.positions.len(), 2);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod dynamics;
pub mod io;
pub mod partitioning;
pub mod query;
pub mod shape;
pub mod utils;
pub mod world;

mod real {
    /// The scalar type used throughout this crate.
    pub use f64 as Real;
}

/// Aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3, Matrix3, Point3, Translation3, UnitVector3, Vector3};
    use na::{Matrix4, UnitQuaternion, Vector4};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The matrix type.
    pub use Matrix3 as Matrix;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;

    /// The rotation type.
    pub type Rotation<N> = UnitQuaternion<N>;

    /// The translation type.
    pub use Translation3 as Translation;

    /// The symmetric 4×4 matrix whose dominant eigenvector is a best-fit rotation quaternion.
    pub type KeyMatrix<N> = Matrix4<N>;

    /// A quaternion stored as a plain `(w, x, y, z)` vector during power iteration.
    pub type QuaternionCoords<N> = Vector4<N>;
}
