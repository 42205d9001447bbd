use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// A spherical mass point integrated with position Verlet.
///
/// The velocity is never stored: it is the difference between the current and previous
/// positions.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Particle {
    /// The current position.
    pub position: Point<Real>,
    /// The position at the previous tick.
    pub prev_position: Point<Real>,
    /// The collision radius.
    pub radius: Real,
}

impl Particle {
    /// Creates a particle at rest at `position`.
    #[inline]
    pub fn new(position: Point<Real>, radius: Real) -> Self {
        Self {
            position,
            prev_position: position,
            radius,
        }
    }

    /// The displacement that will be applied by the next [`Self::integrate`], before damping.
    #[inline]
    pub fn velocity(&self) -> Vector<Real> {
        self.position - self.prev_position
    }

    /// Displaces this particle by `force`.
    ///
    /// Forces are per-tick displacements, not accelerations: they are neither scaled by a mass
    /// nor by a time step.
    #[inline]
    pub fn apply_force(&mut self, force: &Vector<Real>) {
        self.position += force;
    }

    /// Advances this particle by its damped implicit velocity and clamps it to `bounds`.
    ///
    /// The previous position becomes the unclamped current position.
    #[inline]
    pub fn integrate(&mut self, damping: Real, bounds: &Aabb) {
        let velocity = self.velocity() * damping;
        let candidate = self.position + velocity;
        self.prev_position = self.position;
        self.position = bounds.clamp_point(&candidate);
    }

    /// Does this particle's state contain NaN or infinite coordinates?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(self.prev_position.iter())
            .all(|x| x.is_finite())
    }
}
