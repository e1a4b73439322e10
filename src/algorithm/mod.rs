//! Pluggable per-cycle control algorithms.
//!
//! An [`Algorithm`] makes one decision per control loop cycle: look at the
//! robot state, issue motor commands, and say whether the run is over.
//! Termination is an ordinary return value, handled centrally by
//! [`ControlLoop`][crate::ControlLoop], never a process exit from inside an
//! algorithm.

mod sampler;
mod square;
mod teleop;

pub use sampler::{TickSampler, DEFAULT_SAMPLE_SETS};
pub use square::SquarePath;
pub use teleop::{InputSource, Teleop, Token, DEFAULT_READ_TIMEOUT};

use crate::error::TransferError;
use crate::robot::Robot;
use crate::transport::Transport;

/// The verdict an algorithm gives at the end of a cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Signal {
	/// Keep running.
	Continue,
	/// The run is complete. The control loop stops the rover and returns.
	Terminate,
}

/// A control algorithm driven by the [`ControlLoop`][crate::ControlLoop].
pub trait Algorithm<T: Transport> {
	/// Called once per control loop cycle, after the encoder readings have
	/// been refreshed.
	///
	/// `bad_update` is true when this cycle's encoder update failed at the
	/// transport level; the cached reading then still holds the previous
	/// value. The algorithm may issue any number of motor commands through
	/// `robot` and returns [`Signal::Terminate`] once its stopping condition
	/// is met.
	fn iterate(&mut self, robot: &mut Robot<T>, bad_update: bool) -> Result<Signal, TransferError<T::Error>>;
}
