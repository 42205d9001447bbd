use crate::dynamics::shape_matching::{self, RigidTransform};
use crate::dynamics::{Particle, SimulationParams, Strut, StrutSolver};
use crate::math::{Isometry, Matrix, Point, Real, Vector};
use crate::partitioning::Bvh;
use crate::query;
use crate::utils;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Error raised when a chassis description cannot be turned into a [`Chassis`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ChassisError {
    /// The description has no sphere.
    #[error("a chassis needs at least one sphere")]
    NoParticles,
    /// A sphere radius is zero or negative.
    #[error("sphere {particle} must have a positive radius")]
    InvalidRadius {
        /// Index of the offending sphere.
        particle: usize,
    },
    /// A strut references a sphere that does not exist.
    #[error("strut {strut} references sphere {index} but the chassis only has {len} spheres")]
    ParticleIndexOutOfBounds {
        /// Index of the offending strut.
        strut: usize,
        /// The out-of-bounds sphere index.
        index: usize,
        /// The number of spheres.
        len: usize,
    },
    /// A strut connects a sphere to itself.
    #[error("strut {strut} connects sphere {particle} to itself")]
    SelfConnectedStrut {
        /// Index of the offending strut.
        strut: usize,
        /// The sphere connected to itself.
        particle: usize,
    },
    /// A strut connects two coincident spheres.
    #[error("strut {strut} has a zero rest length: spheres {a} and {b} coincide")]
    ZeroRestLength {
        /// Index of the offending strut.
        strut: usize,
        /// First endpoint.
        a: usize,
        /// Second endpoint.
        b: usize,
    },
    /// A sphere offset or radius is NaN or infinite.
    #[error("sphere {particle} has a non-finite offset or radius")]
    NonFiniteInput {
        /// Index of the offending sphere.
        particle: usize,
    },
}

/// Unrecoverable numerical corruption detected during a tick.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Both endpoints of a strut collapsed onto the same point.
    #[error("the endpoints of strut {strut} collapsed onto the same point")]
    CollapsedStrut {
        /// Index of the collapsed strut.
        strut: usize,
    },
    /// A particle position became NaN or infinite.
    #[error("the position of particle {particle} is not finite")]
    NonFinitePosition {
        /// Index of the corrupted particle.
        particle: usize,
    },
    /// The best-fit rotation became NaN or infinite.
    #[error("the best-fit rotation is not finite")]
    NonFiniteRotation,
}

/// One sphere of a chassis description.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SphereDesc {
    /// Position of the sphere relative to the chassis origin.
    pub offset: Vector<Real>,
    /// The sphere radius.
    pub radius: Real,
}

impl SphereDesc {
    /// Creates a sphere description.
    pub fn new(offset: Vector<Real>, radius: Real) -> Self {
        Self { offset, radius }
    }
}

/// The shape of a soft chassis: spheres and the struts connecting them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ChassisDesc {
    /// The spheres, each becoming one particle.
    pub spheres: Vec<SphereDesc>,
    /// Pairs of sphere indices, each becoming one strut.
    pub struts: Vec<[u32; 2]>,
}

impl ChassisDesc {
    /// Applies a rigid transformation to every sphere offset.
    pub fn transform_by(&mut self, pos: &Isometry<Real>) {
        for sphere in &mut self.spheres {
            sphere.offset = (pos * Point::from(sphere.offset)).coords;
        }
    }

    /// Applies a linear transformation to every sphere offset.
    ///
    /// Radii are left unchanged, so `basis` is expected to preserve lengths, e.g., a
    /// permutation of axes with sign flips.
    pub fn linearly_transform_by(&mut self, basis: &Matrix<Real>) {
        for sphere in &mut self.spheres {
            sphere.offset = basis * sphere.offset;
        }
    }
}

/// A soft body made of spheres held together by struts.
///
/// Each tick, the particles are moved by a constant bias, integrated, and pushed out of the
/// static geometry. Then the struts are relaxed, and the rigid motion best matching the
/// deformed particles is extracted for display.
#[derive(Clone, Debug)]
pub struct Chassis {
    particles: Vec<Particle>,
    struts: Vec<Strut>,
    reference_offsets: Vec<Vector<Real>>,
    solver: StrutSolver,
    transform: RigidTransform,
}

impl Chassis {
    /// Builds a chassis at rest, with the origin of `desc` placed at `start`.
    ///
    /// Strut rest lengths and the reference offsets used for shape matching are captured
    /// from this initial configuration.
    pub fn new(
        desc: &ChassisDesc,
        start: Point<Real>,
        params: &SimulationParams,
    ) -> Result<Self, ChassisError> {
        if desc.spheres.is_empty() {
            return Err(ChassisError::NoParticles);
        }

        let mut particles = Vec::with_capacity(desc.spheres.len());

        for (i, sphere) in desc.spheres.iter().enumerate() {
            let position = start + sphere.offset;

            if !position.iter().all(|x| x.is_finite()) || !sphere.radius.is_finite() {
                return Err(ChassisError::NonFiniteInput { particle: i });
            }

            if sphere.radius <= 0.0 {
                return Err(ChassisError::InvalidRadius { particle: i });
            }

            particles.push(Particle::new(position, sphere.radius));
        }

        let struts = desc
            .struts
            .iter()
            .enumerate()
            .map(|(i, [a, b])| Strut::new(i, *a, *b, &particles))
            .collect::<Result<Vec<_>, _>>()?;

        let positions: Vec<_> = particles.iter().map(|p| p.position).collect();
        let centroid = utils::center(&positions);
        let reference_offsets = positions.iter().map(|pt| pt - centroid).collect();

        log::debug!(
            "Built a chassis with {} particles and {} struts.",
            particles.len(),
            struts.len()
        );

        Ok(Self {
            solver: StrutSolver::new(struts.len(), params.seed),
            particles,
            struts,
            reference_offsets,
            transform: RigidTransform::identity_at(centroid),
        })
    }

    /// The particles, in the order of the chassis description.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The struts, in the order of the chassis description.
    pub fn struts(&self) -> &[Strut] {
        &self.struts
    }

    /// The offset of each particle to the initial centroid.
    pub fn reference_offsets(&self) -> &[Vector<Real>] {
        &self.reference_offsets
    }

    /// The rigid transform extracted at the last tick.
    pub fn transform(&self) -> &RigidTransform {
        &self.transform
    }

    /// The current position of every particle.
    pub fn positions(&self) -> Vec<Point<Real>> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Advances the chassis by one tick against the static geometry indexed by `bvh`.
    ///
    /// Every particle is first biased, integrated, and pushed out of the geometry. Only then
    /// are the struts relaxed, followed by the extraction of the best-fit rigid transform.
    /// Any collapsed strut or non-finite state aborts the tick with an error, leaving the
    /// chassis in an unspecified state.
    pub fn step(&mut self, bvh: &Bvh, params: &SimulationParams) -> Result<(), SimulationError> {
        let advance = |particle: &mut Particle| {
            particle.apply_force(&params.bias_force);
            particle.integrate(params.damping, &params.world_bounds);
            let prev = particle.prev_position;
            let _ = query::contact_ball_bvh(bvh, &mut particle.position, &prev, particle.radius);
        };

        #[cfg(not(feature = "parallel"))]
        self.particles.iter_mut().for_each(advance);
        #[cfg(feature = "parallel")]
        self.particles.par_iter_mut().for_each(advance);

        self.solver.solve(
            &self.struts,
            &mut self.particles,
            params.relaxation_iterations,
        )?;

        self.update_transform(params)
    }

    fn update_transform(&mut self, params: &SimulationParams) -> Result<(), SimulationError> {
        if let Some(i) = self.particles.iter().position(|p| !p.is_finite()) {
            return Err(SimulationError::NonFinitePosition { particle: i });
        }

        self.transform = shape_matching::match_shape(
            &self.reference_offsets,
            &self.positions(),
            &params.shape_matching,
        );

        if !self.transform.is_finite() {
            return Err(SimulationError::NonFiniteRotation);
        }

        Ok(())
    }
}
