use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use i2cdev::linux::LinuxI2CBus;
use roverbus::algorithm::{SquarePath, Teleop, TickSampler};
use roverbus::{ControlLoop, Robot};

mod keys;
mod logging;
mod options;

use options::{Command, Options};

fn main() {
	if let Err(()) = do_main(clap::Parser::parse()) {
		std::process::exit(1);
	}
}

fn do_main(options: Options) -> Result<(), ()> {
	logging::init(module_path!(), options.verbose as i8);
	let mut robot = open_robot(&options)?;

	match &options.command {
		Command::Square { cutoff } => {
			log::debug!("Driving a square path for {} seconds", cutoff);
			let mut algorithm = SquarePath::new(&mut robot, options.frequency, *cutoff)
				.map_err(|e| log::error!("Failed to reset encoders: {}", e))?;
			run(&options, &mut robot, &mut algorithm)?;
		},
		Command::Collect { sample_sets } => {
			log::debug!("Collecting {} encoder sample sets", sample_sets);
			let mut algorithm = TickSampler::new(&mut robot, options.frequency, *sample_sets)
				.map_err(|e| log::error!("Failed to reset encoders: {}", e))?;
			run(&options, &mut robot, &mut algorithm)?;
			for (index, (left, right)) in algorithm
				.left_sample_sets()
				.iter()
				.zip(algorithm.right_sample_sets())
				.enumerate()
			{
				log::info!("set {}: left {:?}", index, left);
				log::info!("set {}: right {:?}", index, right);
			}
		},
		Command::Teleop => {
			let input = keys::Keys::new()?;
			let mut algorithm = Teleop::new(input);
			log::info!("Driving with w/a/s/d, q quits");
			run(&options, &mut robot, &mut algorithm)?;
		},
		Command::Raw { function, flags } => {
			log::debug!("Sending raw request: function {:#03X}, flags {:#03X}", function, flags);
			robot
				.send_raw(*function, *flags)
				.map_err(|e| log::error!("Command failed: {}", e))?;
			log::info!("Ok");
		},
	}

	Ok(())
}

fn run<A>(options: &Options, robot: &mut Robot<LinuxI2CBus>, algorithm: &mut A) -> Result<(), ()>
where
	A: roverbus::Algorithm<LinuxI2CBus>,
{
	let mut control = ControlLoop::with_frequency(options.frequency);
	control.set_interrupt(interrupt_flag());
	control
		.run(robot, algorithm)
		.map_err(|e| log::error!("Run failed: {}", e))
}

fn open_robot(options: &Options) -> Result<Robot<LinuxI2CBus>, ()> {
	let bus = LinuxI2CBus::new(&options.bus)
		.map_err(|e| log::error!("Failed to open I2C bus {}: {}", options.bus.display(), e))?;
	log::debug!(
		"Using I2C bus {} with device address {:#04X}",
		options.bus.display(),
		options.address
	);
	Ok(Robot::with_address(bus, options.address))
}

fn interrupt_flag() -> Arc<AtomicBool> {
	let flag = Arc::new(AtomicBool::new(false));
	let handler = flag.clone();
	if let Err(e) = ctrlc::set_handler(move || handler.store(true, Ordering::Relaxed)) {
		log::warn!("Failed to install Ctrl-C handler: {}", e);
	}
	flag
}
