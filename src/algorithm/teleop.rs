use core::time::Duration;

use super::{Algorithm, Signal};
use crate::error::TransferError;
use crate::protocol::Speed;
use crate::robot::Robot;
use crate::transport::Transport;

/// How long [`Teleop`] waits for input before treating the cycle as idle.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(250);

/// A single manual driving command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Token {
	/// Drive both wheels forward.
	Forward,
	/// Drive both wheels backward.
	Backward,
	/// Pivot left: right wheel forward, left wheel backward.
	PivotLeft,
	/// Pivot right: left wheel forward, right wheel backward.
	PivotRight,
	/// No input this cycle.
	Idle,
	/// Stop the rover and end the run.
	Quit,
}

/// Source of driving [`Token`]s, normally a keyboard.
pub trait InputSource {
	/// Read one token, waiting at most `timeout`.
	///
	/// Must return [`Token::Idle`] when no input arrives in time. Blocking
	/// longer than the timeout stretches the control loop cycle and degrades
	/// its cadence.
	fn read_token(&mut self, timeout: Duration) -> Token;
}

/// Drive the rover manually, one input token per cycle.
///
/// This is the one algorithm that suspends inside `iterate`: it blocks on the
/// input source, bounded by the read timeout. A `stopped` flag keeps a stream
/// of idle cycles from re-sending the stop command every time.
pub struct Teleop<I> {
	input: I,
	timeout: Duration,
	stopped: bool,
}

impl<I: InputSource> Teleop<I> {
	/// Create the algorithm with the [`DEFAULT_READ_TIMEOUT`].
	pub fn new(input: I) -> Self {
		Self::with_timeout(input, DEFAULT_READ_TIMEOUT)
	}

	/// Create the algorithm with a custom input read timeout.
	pub fn with_timeout(input: I, timeout: Duration) -> Self {
		Self {
			input,
			timeout,
			stopped: true,
		}
	}

	fn halt_if_moving<T: Transport>(&mut self, robot: &mut Robot<T>) -> Result<(), TransferError<T::Error>> {
		if !self.stopped {
			robot.stop()?;
			self.stopped = true;
		}
		Ok(())
	}
}

impl<T: Transport, I: InputSource> Algorithm<T> for Teleop<I> {
	fn iterate(&mut self, robot: &mut Robot<T>, _bad_update: bool) -> Result<Signal, TransferError<T::Error>> {
		match self.input.read_token(self.timeout) {
			Token::Idle => {
				self.halt_if_moving(robot)?;
			},
			Token::Quit => {
				self.halt_if_moving(robot)?;
				return Ok(Signal::Terminate);
			},
			Token::Forward => {
				self.stopped = false;
				robot.move_forward(Speed::Full)?;
			},
			Token::Backward => {
				self.stopped = false;
				robot.move_backward(Speed::Full)?;
			},
			Token::PivotLeft => {
				self.stopped = false;
				robot.right_forward(Speed::Full)?;
				robot.left_backward(Speed::Full)?;
			},
			Token::PivotRight => {
				self.stopped = false;
				robot.left_forward(Speed::Full)?;
				robot.right_backward(Speed::Full)?;
			},
		}
		Ok(Signal::Continue)
	}
}
