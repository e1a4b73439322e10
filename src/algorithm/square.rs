use super::{Algorithm, Signal};
use crate::error::TransferError;
use crate::protocol::Speed;
use crate::robot::Robot;
use crate::transport::Transport;

/// Drive a square-ish path by alternating straight runs and pivot turns.
///
/// The algorithm holds each phase for two seconds worth of cycles, starting
/// with a straight run: both wheels forward at full speed. During a turn the
/// left wheel drives forward and the right wheel backward, pivoting in place.
/// After `cutoff` seconds worth of cycles the run terminates.
///
/// There is no feedback: the encoder readings are only logged. How square the
/// path actually is depends entirely on the surface and the motors.
pub struct SquarePath {
	max_iterations: u32,
	iteration: u32,
	phase_length: u32,
	phase_progress: u32,
	turning: bool,
}

impl SquarePath {
	/// Create the algorithm and reset the rover's tick counters.
	///
	/// `frequency` must match the control loop rate; it converts the
	/// `cutoff` in seconds into a number of cycles.
	pub fn new<T: Transport>(robot: &mut Robot<T>, frequency: u32, cutoff: u32) -> Result<Self, TransferError<T::Error>> {
		robot.reset_ticks()?;
		Ok(Self {
			max_iterations: frequency * cutoff,
			iteration: 0,
			phase_length: 2 * frequency,
			phase_progress: 0,
			turning: false,
		})
	}
}

impl<T: Transport> Algorithm<T> for SquarePath {
	fn iterate(&mut self, robot: &mut Robot<T>, _bad_update: bool) -> Result<Signal, TransferError<T::Error>> {
		if self.iteration == self.max_iterations {
			return Ok(Signal::Terminate);
		}

		debug!("ticks: {}, {}", robot.ticks().left, robot.ticks().right);

		if self.turning {
			robot.left_forward(Speed::Full)?;
			robot.right_backward(Speed::Full)?;
		} else {
			robot.move_forward(Speed::Full)?;
		}

		self.phase_progress += 1;
		if self.phase_progress == self.phase_length {
			self.turning = !self.turning;
			self.phase_progress = 0;
		}

		self.iteration += 1;
		Ok(Signal::Continue)
	}
}
