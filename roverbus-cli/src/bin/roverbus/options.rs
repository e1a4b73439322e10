use std::path::PathBuf;

/// Drive a two-wheeled rover over an I2C bus.
///
/// The rover understands single-byte requests: a 4-bit function code in the
/// high nibble and a 4-bit flag value in the low nibble. Encoder readings
/// come back as signed 32-bit tick counts.
#[derive(clap::Parser)]
pub struct Options {
	/// Print more messages. Can be used multiple times.
	#[arg(long, short, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// The I2C bus device connected to the rover.
	#[arg(long, short, global = true, default_value = "/dev/i2c-1")]
	pub bus: PathBuf,

	/// The I2C address of the rover motor controller.
	#[arg(long, short, global = true, default_value_t = roverbus::DEFAULT_ADDRESS, value_name = "ADDRESS")]
	pub address: u8,

	/// The control loop rate in cycles per second.
	#[arg(long, short, global = true, default_value_t = roverbus::DEFAULT_FREQUENCY, value_name = "HZ")]
	pub frequency: u32,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(clap::Subcommand)]
pub enum Command {
	/// Drive a square-ish path by alternating straight runs and pivot turns.
	Square {
		/// How long to keep driving, in seconds.
		#[arg(long, default_value_t = 10, value_name = "SECONDS")]
		cutoff: u32,
	},

	/// Record encoder ticks into one-second sample sets and print them.
	///
	/// The rover does not move on its own while collecting; push it by hand
	/// or drive it from a second process.
	Collect {
		/// The number of one-second sample sets to record.
		#[arg(long, default_value_t = roverbus::algorithm::DEFAULT_SAMPLE_SETS, value_name = "COUNT")]
		sample_sets: usize,
	},

	/// Drive the rover with the keyboard.
	///
	/// w/s drive forward and backward, a/d pivot, q quits.
	Teleop,

	/// Send a single raw request byte.
	Raw {
		/// The function code (0-15), placed in the high nibble.
		#[arg(value_name = "FUNCTION")]
		function: u8,

		/// The flag value (0-15), placed in the low nibble.
		#[arg(value_name = "FLAGS")]
		flags: u8,
	},
}
