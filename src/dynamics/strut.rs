use crate::dynamics::{ChassisError, Particle, SimulationError};
use crate::math::{Real, DEFAULT_EPSILON};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A distance constraint between two particles.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Strut {
    /// Index of the first particle.
    pub a: u32,
    /// Index of the second particle.
    pub b: u32,
    /// The distance between both particles when the strut was created.
    pub rest_length: Real,
}

impl Strut {
    /// Creates the `id`-th strut of a chassis, between the particles `a` and `b` of `particles`.
    ///
    /// The rest length is the current distance between both particles. It must not be zero.
    pub fn new(id: usize, a: u32, b: u32, particles: &[Particle]) -> Result<Self, ChassisError> {
        let len = particles.len();
        for index in [a, b] {
            if index as usize >= len {
                return Err(ChassisError::ParticleIndexOutOfBounds {
                    strut: id,
                    index: index as usize,
                    len,
                });
            }
        }

        if a == b {
            return Err(ChassisError::SelfConnectedStrut {
                strut: id,
                particle: a as usize,
            });
        }

        let rest_length = na::distance(
            &particles[a as usize].position,
            &particles[b as usize].position,
        );

        if rest_length < DEFAULT_EPSILON {
            return Err(ChassisError::ZeroRestLength {
                strut: id,
                a: a as usize,
                b: b as usize,
            });
        }

        Ok(Self { a, b, rest_length })
    }

    /// The current distance between both endpoints.
    #[inline]
    pub fn length(&self, particles: &[Particle]) -> Real {
        na::distance(
            &particles[self.a as usize].position,
            &particles[self.b as usize].position,
        )
    }

    /// Moves both endpoints symmetrically so that their distance becomes the rest length.
    ///
    /// The midpoint of the endpoints is left unchanged. Fails with
    /// [`SimulationError::CollapsedStrut`] if both endpoints coincide, in which case no
    /// direction exists to separate them along. `id` is only used for error reporting.
    #[inline]
    pub fn relax(&self, id: usize, particles: &mut [Particle]) -> Result<(), SimulationError> {
        let pa = particles[self.a as usize].position;
        let pb = particles[self.b as usize].position;
        let delta = pb - pa;
        let current_length = delta.norm();

        if current_length.is_nan() || current_length < DEFAULT_EPSILON {
            return Err(SimulationError::CollapsedStrut { strut: id });
        }

        let diff = (current_length - self.rest_length) / current_length;
        let offset = delta * (0.5 * diff);
        particles[self.a as usize].position += offset;
        particles[self.b as usize].position -= offset;

        Ok(())
    }
}

/// Iterative relaxation of a strut network.
///
/// Each pass relaxes every strut once, in an order reshuffled at every pass. The number of
/// passes is fixed: no convergence criterion is evaluated.
#[derive(Clone, Debug)]
pub struct StrutSolver {
    order: Vec<u32>,
    rng: StdRng,
}

impl StrutSolver {
    /// A solver for `num_struts` struts, shuffling them with a generator seeded by `seed`, or
    /// from system entropy if `seed` is `None`.
    pub fn new(num_struts: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            order: (0..num_struts as u32).collect(),
            rng,
        }
    }

    /// Runs `iterations` shuffled relaxation passes over `struts`.
    pub fn solve(
        &mut self,
        struts: &[Strut],
        particles: &mut [Particle],
        iterations: usize,
    ) -> Result<(), SimulationError> {
        assert_eq!(
            self.order.len(),
            struts.len(),
            "The solver was created for a different number of struts."
        );

        for _ in 0..iterations {
            self.order.shuffle(&mut self.rng);

            for &id in &self.order {
                struts[id as usize].relax(id as usize, particles)?;
            }
        }

        Ok(())
    }
}
