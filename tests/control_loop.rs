use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use assert2::assert;
use test_log::test;

use roverbus::{Algorithm, ControlLoop, Robot, Signal, TickReading, TransferError, Transport};

mod common;
use common::MockTransport;

/// Runs for a fixed number of cycles, recording the bad_update flag of each.
struct CycleRecorder {
	remaining: u32,
	bad_updates: Vec<bool>,
}

impl CycleRecorder {
	fn new(cycles: u32) -> Self {
		Self {
			remaining: cycles,
			bad_updates: Vec::new(),
		}
	}
}

impl<T: Transport> Algorithm<T> for CycleRecorder {
	fn iterate(&mut self, _robot: &mut Robot<T>, bad_update: bool) -> Result<Signal, TransferError<T::Error>> {
		if self.remaining == 0 {
			return Ok(Signal::Terminate);
		}
		self.remaining -= 1;
		self.bad_updates.push(bad_update);
		Ok(Signal::Continue)
	}
}

// High rate to keep the tests fast; the logic is rate-independent.
const TEST_FREQUENCY: u32 = 500;

#[test]
fn test_period_follows_frequency() {
	assert!(ControlLoop::new().frequency() == roverbus::DEFAULT_FREQUENCY);
	assert!(ControlLoop::with_frequency(20).period() == Duration::from_millis(50));
	assert!(ControlLoop::with_frequency(250).period() == Duration::from_millis(4));
}

#[test]
fn test_good_updates_reach_the_algorithm() {
	let transport = MockTransport::new();
	let mut robot = Robot::new(transport.clone());
	for i in 0..4 {
		transport.push_ticks(i, -i);
	}

	let mut algorithm = CycleRecorder::new(4);
	let control = ControlLoop::with_frequency(TEST_FREQUENCY);
	assert!(control.run(&mut robot, &mut algorithm) == Ok(()));

	assert!(algorithm.bad_updates == vec![false; 4]);
	assert!(robot.ticks() == TickReading { left: 3, right: -3 });
}

#[test]
fn test_transport_failures_never_escape_the_loop() {
	// Nothing scripted: every encoder update fails at the transport level.
	let transport = MockTransport::new();
	let mut robot = Robot::new(transport.clone());

	let mut algorithm = CycleRecorder::new(5);
	let control = ControlLoop::with_frequency(TEST_FREQUENCY);
	assert!(control.run(&mut robot, &mut algorithm) == Ok(()));

	// Every cycle was flagged bad and the cache never moved.
	assert!(algorithm.bad_updates == vec![true; 5]);
	assert!(robot.ticks() == TickReading::default());
}

#[test]
fn test_rover_is_stopped_on_termination() {
	let transport = MockTransport::new();
	let mut robot = Robot::new(transport.clone());

	let mut algorithm = CycleRecorder::new(2);
	let control = ControlLoop::with_frequency(TEST_FREQUENCY);
	control.run(&mut robot, &mut algorithm).unwrap();

	assert!(transport.writes().last() == Some(&vec![0x14]));
}

#[test]
fn test_interrupt_stops_the_rover_and_returns() {
	let transport = MockTransport::new();
	let mut robot = Robot::new(transport.clone());

	let interrupt = Arc::new(AtomicBool::new(true));
	let mut control = ControlLoop::with_frequency(TEST_FREQUENCY);
	control.set_interrupt(interrupt);

	// Would run forever without the interrupt.
	let mut algorithm = CycleRecorder::new(u32::MAX);
	assert!(control.run(&mut robot, &mut algorithm) == Ok(()));

	assert!(algorithm.bad_updates.is_empty());
	assert!(transport.writes() == vec![vec![0x14]]);
}

#[test]
fn test_failed_final_stop_is_swallowed() {
	let transport = MockTransport::new();
	transport.fail_writes(true);
	let mut robot = Robot::new(transport.clone());

	let mut algorithm = CycleRecorder::new(0);
	let control = ControlLoop::with_frequency(TEST_FREQUENCY);

	// The stop transmission fails, but the run still ends cleanly.
	assert!(control.run(&mut robot, &mut algorithm) == Ok(()));
	assert!(transport.writes().is_empty());
}

#[test]
fn test_failed_motor_command_does_not_end_the_run() {
	/// Commands the motors every cycle, even when the bus is down.
	struct StubbornDriver {
		remaining: u32,
	}

	impl<T: Transport> Algorithm<T> for StubbornDriver {
		fn iterate(&mut self, robot: &mut Robot<T>, _bad_update: bool) -> Result<Signal, TransferError<T::Error>> {
			if self.remaining == 0 {
				return Ok(Signal::Terminate);
			}
			self.remaining -= 1;
			robot.move_forward(roverbus::protocol::Speed::Full)?;
			Ok(Signal::Continue)
		}
	}

	let transport = MockTransport::new();
	transport.fail_writes(true);
	let mut robot = Robot::new(transport.clone());

	let mut algorithm = StubbornDriver { remaining: 3 };
	let control = ControlLoop::with_frequency(TEST_FREQUENCY);
	assert!(control.run(&mut robot, &mut algorithm) == Ok(()));

	// All three command cycles ran despite the write failures.
	assert!(algorithm.remaining == 0);
}
