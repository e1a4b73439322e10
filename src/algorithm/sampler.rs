use super::{Algorithm, Signal};
use crate::error::TransferError;
use crate::robot::Robot;
use crate::transport::Transport;

/// The default number of sample sets to collect.
pub const DEFAULT_SAMPLE_SETS: usize = 10;

/// Collect encoder tick samples into fixed-length sets, one second per set.
///
/// Each cycle appends the cached tick pair to the active set; once a set
/// holds a full second worth of samples the next one starts. The run
/// terminates on the cycle after the last set fills up.
///
/// The sampler never issues motor commands. Any motion during sampling has to
/// be driven externally, for example by hand-pushing the rover or by a second
/// process commanding it.
pub struct TickSampler {
	samples_per_set: usize,
	current_set: usize,
	left_sets: Vec<Vec<i32>>,
	right_sets: Vec<Vec<i32>>,
}

impl TickSampler {
	/// Create the sampler and reset the rover's tick counters.
	///
	/// `frequency` must match the control loop rate; each sample set holds
	/// `frequency` samples, one second of readings.
	pub fn new<T: Transport>(
		robot: &mut Robot<T>,
		frequency: u32,
		num_sample_sets: usize,
	) -> Result<Self, TransferError<T::Error>> {
		robot.reset_ticks()?;
		Ok(Self {
			samples_per_set: frequency as usize,
			current_set: 0,
			left_sets: vec![Vec::new(); num_sample_sets],
			right_sets: vec![Vec::new(); num_sample_sets],
		})
	}

	/// Check if every sample set has been filled.
	pub fn is_complete(&self) -> bool {
		self.current_set == self.left_sets.len()
	}

	/// The collected left wheel sample sets.
	pub fn left_sample_sets(&self) -> &[Vec<i32>] {
		&self.left_sets
	}

	/// The collected right wheel sample sets.
	pub fn right_sample_sets(&self) -> &[Vec<i32>] {
		&self.right_sets
	}
}

impl<T: Transport> Algorithm<T> for TickSampler {
	fn iterate(&mut self, robot: &mut Robot<T>, _bad_update: bool) -> Result<Signal, TransferError<T::Error>> {
		if self.is_complete() {
			return Ok(Signal::Terminate);
		}

		// On a bad update this samples the last known good reading. A gap
		// would skew the per-second sets more than a repeated value does.
		let ticks = robot.ticks();
		self.left_sets[self.current_set].push(ticks.left);
		self.right_sets[self.current_set].push(ticks.right);

		if self.left_sets[self.current_set].len() == self.samples_per_set {
			self.current_set += 1;
		}

		Ok(Signal::Continue)
	}
}
