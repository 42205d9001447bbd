use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// Error returned when a [`SimulationParams`] cannot drive a simulation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// The BVH leaf threshold must be at least 1.
    #[error("the BVH leaf threshold must be at least 1")]
    InvalidLeafThreshold,
    /// The damping factor must lie in `(0, 1]`.
    #[error("the damping factor must lie in (0, 1], got {0}")]
    InvalidDamping(Real),
    /// The world bounds are empty or not finite.
    #[error("the world bounds must be finite with mins <= maxs")]
    InvalidWorldBounds,
    /// The bias force has a NaN or infinite component.
    #[error("the bias force must be finite")]
    NonFiniteBias,
    /// The shape-matching tolerance, iteration cap, or axis epsilon is unusable.
    #[error("the shape matching parameters must be finite, positive, and allow at least one iteration")]
    InvalidShapeMatching,
}

/// Parameters of the best-fit rotation extraction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ShapeMatchingParams {
    /// Power iteration stops once the Euclidean distance between two successive quaternion
    /// estimates falls below this.
    pub tolerance: Real,
    /// Hard cap on the number of power iterations.
    pub max_iterations: usize,
    /// Below this value of `sin(angle / 2)`, the rotation axis is replaced by `(1, 0, 0)`.
    pub axis_epsilon: Real,
}

impl Default for ShapeMatchingParams {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-12,
            max_iterations: 1000,
            axis_epsilon: 1.0e-6,
        }
    }
}

/// Every tunable of a simulation.
///
/// The default values reproduce the reference vehicle, with `+Y` pointing up.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SimulationParams {
    /// Maximum number of triangles per BVH leaf.
    pub bvh_leaf_threshold: usize,
    /// Box every particle position is clamped to after integration.
    pub world_bounds: Aabb,
    /// Fraction of the implicit velocity kept from one tick to the next.
    pub damping: Real,
    /// Displacement added to every particle at the beginning of each tick.
    pub bias_force: Vector<Real>,
    /// Number of randomized strut relaxation passes per tick.
    pub relaxation_iterations: usize,
    /// Seed of the strut shuffling generator. `None` seeds it from system entropy.
    pub seed: Option<u64>,
    /// Parameters of the best-fit rotation extraction.
    pub shape_matching: ShapeMatchingParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            bvh_leaf_threshold: 1,
            world_bounds: Aabb::new(
                Point::new(-200.0, -100.0, -200.0),
                Point::new(200.0, 200.0, 200.0),
            ),
            damping: 0.999,
            bias_force: Vector::new(0.0, -1.0e-4, 0.0),
            relaxation_iterations: 200,
            seed: None,
            shape_matching: ShapeMatchingParams::default(),
        }
    }
}

impl SimulationParams {
    /// Checks that these parameters describe a usable simulation.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.bvh_leaf_threshold == 0 {
            return Err(ParamsError::InvalidLeafThreshold);
        }

        // Written so that NaN fails.
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ParamsError::InvalidDamping(self.damping));
        }

        let bounds = &self.world_bounds;
        let finite = bounds
            .mins
            .iter()
            .chain(bounds.maxs.iter())
            .all(|x| x.is_finite());
        if !finite || !bounds.is_valid() {
            return Err(ParamsError::InvalidWorldBounds);
        }

        if !self.bias_force.iter().all(|x| x.is_finite()) {
            return Err(ParamsError::NonFiniteBias);
        }

        let sm = &self.shape_matching;
        if !(sm.tolerance >= 0.0 && sm.tolerance.is_finite())
            || sm.max_iterations == 0
            || !(sm.axis_epsilon > 0.0 && sm.axis_epsilon.is_finite())
        {
            return Err(ParamsError::InvalidShapeMatching);
        }

        Ok(())
    }
}
