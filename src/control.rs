use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use core::time::Duration;

use crate::algorithm::{Algorithm, Signal};
use crate::error::{ProtocolError, TransferError};
use crate::robot::Robot;
use crate::transport::Transport;

/// The default update rate of the control loop in cycles per second.
pub const DEFAULT_FREQUENCY: u32 = 20;

/// Fixed-rate scheduler that drives an [`Algorithm`] against a [`Robot`].
///
/// Each cycle refreshes the encoder readings, hands control to the algorithm,
/// and sleeps out the rest of the period. The sleep is compensated for the
/// time the cycle itself took; a full-period sleep would slowly drift behind
/// the nominal rate.
///
/// The loop owns all pacing. Algorithms must not sleep or block on their own,
/// with the one exception of a bounded input read (see
/// [`Teleop`][crate::algorithm::Teleop]).
pub struct ControlLoop {
	frequency: u32,
	period: Duration,
	interrupt: Option<Arc<AtomicBool>>,
}

impl ControlLoop {
	/// Create a control loop running at [`DEFAULT_FREQUENCY`].
	pub fn new() -> Self {
		Self::with_frequency(DEFAULT_FREQUENCY)
	}

	/// Create a control loop running at `frequency` cycles per second.
	///
	/// Panics if `frequency` is zero.
	pub fn with_frequency(frequency: u32) -> Self {
		assert!(frequency > 0, "control loop frequency must be non-zero");
		Self {
			frequency,
			period: Duration::from_secs(1) / frequency,
			interrupt: None,
		}
	}

	/// The configured rate in cycles per second.
	pub fn frequency(&self) -> u32 {
		self.frequency
	}

	/// The duration of one cycle.
	pub fn period(&self) -> Duration {
		self.period
	}

	/// Attach a flag that makes the loop finish early.
	///
	/// The flag is checked at the top of every cycle. Once it reads true, the
	/// loop stops the rover and returns, exactly as if the algorithm had
	/// signalled termination. Intended for wiring up a Ctrl-C handler.
	pub fn set_interrupt(&mut self, interrupt: Arc<AtomicBool>) {
		self.interrupt = Some(interrupt);
	}

	/// Drive `algorithm` until it signals termination.
	///
	/// Transport failures never end the run: a failed encoder update is
	/// reported to the algorithm as `bad_update` with the cached reading left
	/// at its last good value, and a failed motor command is logged and
	/// skipped. Protocol errors are bugs and end the run.
	///
	/// On every way out, termination signal, interrupt or error, the rover is
	/// sent a final stop command first so a run never ends with the wheels
	/// still turning.
	pub fn run<T, A>(&self, robot: &mut Robot<T>, algorithm: &mut A) -> Result<(), ProtocolError>
	where
		T: Transport,
		T::Error: core::fmt::Debug,
		A: Algorithm<T>,
	{
		loop {
			let cycle_start = Instant::now();

			if let Some(interrupt) = &self.interrupt {
				if interrupt.load(Ordering::Relaxed) {
					debug!("interrupted, ending run");
					return self.finish(robot, Ok(()));
				}
			}

			let bad_update = match robot.update_readings() {
				Ok(_) => false,
				Err(TransferError::Transport(error)) => {
					debug!("encoder update failed, keeping previous readings: {:?}", error);
					true
				},
				Err(TransferError::Protocol(error)) => return self.finish(robot, Err(error)),
			};

			match algorithm.iterate(robot, bad_update) {
				Ok(Signal::Continue) => (),
				Ok(Signal::Terminate) => return self.finish(robot, Ok(())),
				Err(TransferError::Transport(error)) => {
					warn!("motor command failed: {:?}", error);
				},
				Err(TransferError::Protocol(error)) => return self.finish(robot, Err(error)),
			}

			if let Some(remaining) = self.period.checked_sub(cycle_start.elapsed()) {
				std::thread::sleep(remaining);
			}
		}
	}

	/// Stop the rover, then hand back the run result.
	///
	/// The stop is best effort: if even that transmission fails there is
	/// nothing further to try, so the failure is logged and the run result
	/// returned as is.
	fn finish<T>(&self, robot: &mut Robot<T>, result: Result<(), ProtocolError>) -> Result<(), ProtocolError>
	where
		T: Transport,
		T::Error: core::fmt::Debug,
	{
		if let Err(error) = robot.stop() {
			error!("failed to stop rover: {:?}", error);
		}
		result
	}
}

impl Default for ControlLoop {
	fn default() -> Self {
		Self::new()
	}
}
