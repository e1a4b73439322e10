use crate::error::TransferError;
use crate::protocol::{self, EncoderAction, Function, Speed};
use crate::transport::Transport;

/// The default bus address of the rover motor controller.
pub const DEFAULT_ADDRESS: u8 = 0x04;

/// A pair of encoder tick counts, one per wheel.
///
/// Counts are signed: a wheel spinning backward counts down.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TickReading {
	pub left: i32,
	pub right: i32,
}

/// High level interface to the rover.
///
/// Owns the bus transport for the duration of the run and caches the most
/// recently read encoder ticks. All motor commands are fire and forget: the
/// rover sends no acknowledgement, so a command succeeds unless the transport
/// itself reports a transmission failure.
pub struct Robot<T> {
	transport: T,
	address: u8,
	ticks: TickReading,
}

impl<T> core::fmt::Debug for Robot<T>
where
	T: core::fmt::Debug,
{
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Robot")
			.field("transport", &self.transport)
			.field("address", &self.address)
			.field("ticks", &self.ticks)
			.finish()
	}
}

impl<T: Transport> Robot<T> {
	/// Create a new robot talking to the controller at [`DEFAULT_ADDRESS`].
	pub fn new(transport: T) -> Self {
		Self::with_address(transport, DEFAULT_ADDRESS)
	}

	/// Create a new robot talking to the controller at a custom address.
	pub fn with_address(transport: T, address: u8) -> Self {
		Self {
			transport,
			address,
			ticks: TickReading::default(),
		}
	}

	/// The bus address of the motor controller.
	pub fn address(&self) -> u8 {
		self.address
	}

	/// Get a reference to the underlying transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Consume the robot to get ownership of the transport.
	pub fn into_transport(self) -> T {
		self.transport
	}

	/// The most recently cached encoder reading.
	///
	/// Only [`Self::update_readings()`] refreshes this value. After a failed
	/// update it still holds the last good reading.
	pub fn ticks(&self) -> TickReading {
		self.ticks
	}

	/// Query both encoders and replace the cached reading.
	///
	/// If the transaction fails the cache is left untouched, so the caller
	/// keeps the last known good reading.
	pub fn update_readings(&mut self) -> Result<TickReading, TransferError<T::Error>> {
		let ticks = self.get_ticks()?;
		self.ticks = ticks;
		Ok(ticks)
	}

	/// Query both encoders without touching the cached reading.
	pub fn get_ticks(&mut self) -> Result<TickReading, TransferError<T::Error>> {
		let request = [protocol::encoder_request(Function::Encoders, EncoderAction::Read)];
		let mut response = [0; protocol::ENCODER_PAIR_SIZE];
		self.transport
			.write_read(self.address, &request, &mut response)
			.map_err(TransferError::Transport)?;
		let (left, right) = protocol::decode_readings(&response)?;
		trace!("read encoders: left {}, right {}", left, right);
		Ok(TickReading { left, right })
	}

	/// Query the left wheel encoder alone.
	pub fn get_left_ticks(&mut self) -> Result<i32, TransferError<T::Error>> {
		self.get_single_ticks(Function::LeftEncoder)
	}

	/// Query the right wheel encoder alone.
	pub fn get_right_ticks(&mut self) -> Result<i32, TransferError<T::Error>> {
		self.get_single_ticks(Function::RightEncoder)
	}

	fn get_single_ticks(&mut self, function: Function) -> Result<i32, TransferError<T::Error>> {
		let request = [protocol::encoder_request(function, EncoderAction::Read)];
		let mut response = [0; protocol::ENCODER_SINGLE_SIZE];
		self.transport
			.write_read(self.address, &request, &mut response)
			.map_err(TransferError::Transport)?;
		Ok(protocol::decode_reading(&response)?)
	}

	/// Reset both encoder tick counters to zero.
	pub fn reset_ticks(&mut self) -> Result<(), TransferError<T::Error>> {
		self.send(protocol::encoder_request(Function::Encoders, EncoderAction::Reset))
	}

	/// Drive both wheels forward.
	pub fn move_forward(&mut self, speed: Speed) -> Result<(), TransferError<T::Error>> {
		self.send(protocol::motor_request(Function::Forward, speed))
	}

	/// Drive both wheels backward.
	pub fn move_backward(&mut self, speed: Speed) -> Result<(), TransferError<T::Error>> {
		self.send(protocol::motor_request(Function::Backward, speed))
	}

	pub fn left_forward(&mut self, speed: Speed) -> Result<(), TransferError<T::Error>> {
		self.send(protocol::motor_request(Function::LeftForward, speed))
	}

	pub fn left_backward(&mut self, speed: Speed) -> Result<(), TransferError<T::Error>> {
		self.send(protocol::motor_request(Function::LeftBackward, speed))
	}

	pub fn right_forward(&mut self, speed: Speed) -> Result<(), TransferError<T::Error>> {
		self.send(protocol::motor_request(Function::RightForward, speed))
	}

	pub fn right_backward(&mut self, speed: Speed) -> Result<(), TransferError<T::Error>> {
		self.send(protocol::motor_request(Function::RightBackward, speed))
	}

	/// Stop both motors.
	///
	/// On the wire this is the forward function with the stop flag. The
	/// protocol has no dedicated stop function; this pairing is the
	/// compatibility convention the controller expects.
	pub fn stop(&mut self) -> Result<(), TransferError<T::Error>> {
		self.send(protocol::motor_request(Function::Forward, Speed::Stop))
	}

	/// Send a request built from raw nibble values.
	///
	/// Unlike the typed commands this can fail before touching the bus: both
	/// values must fit in four bits.
	pub fn send_raw(&mut self, function: u8, flags: u8) -> Result<(), TransferError<T::Error>> {
		let request = protocol::encode_request(function, flags)?;
		self.send(request)
	}

	fn send(&mut self, request: u8) -> Result<(), TransferError<T::Error>> {
		trace!("sending request {:#04X}", request);
		self.transport
			.write(self.address, &[request])
			.map_err(TransferError::Transport)
	}
}
