//! A chassis driving over static geometry.

use crate::dynamics::{
    Chassis, ChassisDesc, ChassisError, ParamsError, RigidTransform, SimulationError,
    SimulationParams,
};
use crate::math::{Point, Real};
use crate::partitioning::Bvh;
use crate::shape::TriangleSoup;

/// Error raised when a [`World`] cannot be built.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// The simulation parameters are invalid.
    #[error(transparent)]
    Params(#[from] ParamsError),
    /// The chassis description is invalid.
    #[error(transparent)]
    Chassis(#[from] ChassisError),
}

/// The state of the chassis after a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Frame {
    /// The position of every particle, in the order of the chassis description.
    pub positions: Vec<Point<Real>>,
    /// The rigid transform to apply to a visual chassis modeled around the initial centroid.
    pub transform: RigidTransform,
}

/// A consumer of the frames produced by [`World::run`], typically a renderer.
pub trait FrameSink {
    /// Called once after every tick.
    fn consume(&mut self, tick: usize, frame: &Frame);
}

impl FrameSink for Vec<Frame> {
    fn consume(&mut self, _tick: usize, frame: &Frame) {
        self.push(frame.clone());
    }
}

impl<F: FnMut(usize, &Frame)> FrameSink for F {
    fn consume(&mut self, tick: usize, frame: &Frame) {
        self(tick, frame)
    }
}

/// A soft chassis and the static geometry it collides with.
#[derive(Clone, Debug)]
pub struct World {
    bvh: Bvh,
    chassis: Chassis,
    params: SimulationParams,
    ticks: usize,
}

impl World {
    /// Indexes `geometry` and places the chassis described by `chassis` at `start`.
    pub fn new(
        geometry: TriangleSoup,
        chassis: &ChassisDesc,
        start: Point<Real>,
        params: SimulationParams,
    ) -> Result<Self, WorldError> {
        params.validate()?;
        let chassis = Chassis::new(chassis, start, &params)?;
        let bvh = Bvh::new(geometry, params.bvh_leaf_threshold);

        Ok(Self {
            bvh,
            chassis,
            params,
            ticks: 0,
        })
    }

    /// The static geometry index.
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// The simulated chassis.
    pub fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    /// The simulation parameters.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// The number of ticks simulated so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// The current state of the chassis.
    pub fn frame(&self) -> Frame {
        Frame {
            positions: self.chassis.positions(),
            transform: *self.chassis.transform(),
        }
    }

    /// Advances the simulation by one tick and returns the resulting frame.
    pub fn step(&mut self) -> Result<Frame, SimulationError> {
        self.chassis.step(&self.bvh, &self.params)?;
        self.ticks += 1;
        Ok(self.frame())
    }

    /// Advances the simulation by `ticks` ticks, handing every frame to `sink`.
    ///
    /// Stops at the first error.
    pub fn run(&mut self, ticks: usize, sink: &mut impl FrameSink) -> Result<(), SimulationError> {
        for _ in 0..ticks {
            let frame = self.step()?;
            sink.consume(self.ticks, &frame);
        }

        Ok(())
    }
}
