//! Soft-body chassis simulation: particles, struts, and rigid motion extraction.

pub use self::chassis::{Chassis, ChassisDesc, ChassisError, SimulationError, SphereDesc};
pub use self::params::{ParamsError, ShapeMatchingParams, SimulationParams};
pub use self::particle::Particle;
pub use self::shape_matching::RigidTransform;
pub use self::strut::{Strut, StrutSolver};

mod chassis;
mod params;
mod particle;
pub mod shape_matching;
mod strut;
