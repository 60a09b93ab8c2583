//! Fixed-timestep frame loop.
//!
//! Frame time is accumulated and drained in fixed simulation steps, so
//! physics and the frame synchronizer always advance by the same `dt`
//! regardless of frame rate.

use thiserror::Error;
use tracing::warn;

/// Maximum frame time accepted in one tick, in seconds.
/// Longer frames are clamped and the simulation slows down instead of
/// running dozens of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Rejected loop configuration.
#[derive(Debug, Error, PartialEq)]
pub enum FrameLoopError {
    /// The step would never drain the accumulator.
    #[error("fixed timestep must be finite and positive, got {0}")]
    InvalidTimestep(f64),
}

/// Accumulator state for a fixed-timestep loop.
pub struct FrameLoop {
    fixed_dt: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    step_count: u64,
}

impl FrameLoop {
    /// Creates a loop stepping every `fixed_dt` seconds.
    ///
    /// # Errors
    ///
    /// [`FrameLoopError::InvalidTimestep`] unless `fixed_dt` is finite and
    /// greater than zero.
    pub fn new(fixed_dt: f64) -> Result<Self, FrameLoopError> {
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            return Err(FrameLoopError::InvalidTimestep(fixed_dt));
        }
        Ok(Self {
            fixed_dt,
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            step_count: 0,
        })
    }

    /// Advances by an explicit frame time.
    ///
    /// - `step_fn(fixed_dt, total_sim_time)` runs zero or more times.
    /// - `frame_fn(alpha)` runs once, with `alpha` in `[0.0, 1.0)`.
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut step_fn: impl FnMut(f64, f64),
        mut frame_fn: impl FnMut(f64),
    ) {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time
        };

        self.accumulator += frame_time;
        while self.accumulator >= self.fixed_dt {
            step_fn(self.fixed_dt, self.total_sim_time);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.step_count += 1;
        }

        frame_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Fraction of a step left in the accumulator.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulation steps run so far.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Simulated time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}
