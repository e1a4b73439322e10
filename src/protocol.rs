//! Wire format of rover requests and encoder responses.
//!
//! Every request is a single byte: the function code in the high nibble and a
//! flag value in the low nibble. The flag slot carries a [`Speed`] for motor
//! functions and an [`EncoderAction`] for encoder functions. The two
//! enumerations share the wire slot but are never mixed; the caller picks the
//! right one for the function it is encoding.

use crate::endian::read_i32_le;
use crate::error::{InvalidNibble, InvalidReadingLength};

#[rustfmt::skip]
pub mod function_id {
	pub const FORWARD        : u8 = 0x01;
	pub const BACKWARD       : u8 = 0x02;
	pub const LEFT_FORWARD   : u8 = 0x03;
	pub const LEFT_BACKWARD  : u8 = 0x04;
	pub const RIGHT_FORWARD  : u8 = 0x05;
	pub const RIGHT_BACKWARD : u8 = 0x06;
	pub const LEFT_ENCODER   : u8 = 0x07;
	pub const RIGHT_ENCODER  : u8 = 0x08;
	pub const ENCODERS       : u8 = 0x09;
}

/// The number of bytes in the response to a combined encoder read.
pub const ENCODER_PAIR_SIZE: usize = 8;

/// The number of bytes in the response to a single encoder read.
pub const ENCODER_SINGLE_SIZE: usize = 4;

/// A function code: the action or query selected by the high nibble of a request.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Function {
	/// Drive both wheels forward.
	Forward = function_id::FORWARD,
	/// Drive both wheels backward.
	Backward = function_id::BACKWARD,
	LeftForward = function_id::LEFT_FORWARD,
	LeftBackward = function_id::LEFT_BACKWARD,
	RightForward = function_id::RIGHT_FORWARD,
	RightBackward = function_id::RIGHT_BACKWARD,
	/// Query or reset the left wheel encoder.
	LeftEncoder = function_id::LEFT_ENCODER,
	/// Query or reset the right wheel encoder.
	RightEncoder = function_id::RIGHT_ENCODER,
	/// Query or reset both encoders at once.
	Encoders = function_id::ENCODERS,
}

impl Function {
	/// The raw function code.
	pub fn raw(self) -> u8 {
		self as u8
	}

	/// Look up the function for a raw code.
	///
	/// The set of function codes is closed: unknown codes yield `None`.
	pub fn from_raw(raw: u8) -> Option<Self> {
		match raw {
			function_id::FORWARD => Some(Self::Forward),
			function_id::BACKWARD => Some(Self::Backward),
			function_id::LEFT_FORWARD => Some(Self::LeftForward),
			function_id::LEFT_BACKWARD => Some(Self::LeftBackward),
			function_id::RIGHT_FORWARD => Some(Self::RightForward),
			function_id::RIGHT_BACKWARD => Some(Self::RightBackward),
			function_id::LEFT_ENCODER => Some(Self::LeftEncoder),
			function_id::RIGHT_ENCODER => Some(Self::RightEncoder),
			function_id::ENCODERS => Some(Self::Encoders),
			_ => None,
		}
	}
}

/// The speed level carried in the flag nibble of a motor command.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Speed {
	Slow = 0x00,
	Medium = 0x01,
	Fast = 0x02,
	Full = 0x03,
	/// Stop the motors.
	///
	/// There is no dedicated stop function on the wire: a stop is the
	/// [`Function::Forward`] code with this flag.
	Stop = 0x04,
}

/// The sub-operation carried in the flag nibble of an encoder command.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EncoderAction {
	/// Reset the tick counter to zero. No response is sent.
	Reset = 0x00,
	/// Read the current tick count.
	Read = 0x01,
}

/// Encode a request byte from a raw function code and flag value.
///
/// Both values must fit in four bits. Out of range values are rejected rather
/// than masked, so a bad request never selects the wrong function on the wire.
pub fn encode_request(function: u8, flags: u8) -> Result<u8, InvalidNibble> {
	let function = InvalidNibble::check(function)?;
	let flags = InvalidNibble::check(flags)?;
	Ok(function << 4 | flags)
}

/// Split a request byte back into its function code and flag value.
pub fn decode_request(request: u8) -> (u8, u8) {
	(request >> 4, request & 0x0F)
}

/// Encode a motor command.
pub fn motor_request(function: Function, speed: Speed) -> u8 {
	function.raw() << 4 | speed as u8
}

/// Encode an encoder command.
pub fn encoder_request(function: Function, action: EncoderAction) -> u8 {
	function.raw() << 4 | action as u8
}

/// Decode the response to a combined encoder read into (left, right) tick counts.
///
/// The response is exactly [`ENCODER_PAIR_SIZE`] bytes: two little-endian
/// two's complement 32 bit integers, left first. Negative counts mean reverse
/// rotation. Any other length is an error, never a partial decode.
pub fn decode_readings(data: &[u8]) -> Result<(i32, i32), InvalidReadingLength> {
	InvalidReadingLength::check(data.len(), ENCODER_PAIR_SIZE)?;
	Ok((read_i32_le(&data[0..4]), read_i32_le(&data[4..8])))
}

/// Decode the response to a single encoder read.
pub fn decode_reading(data: &[u8]) -> Result<i32, InvalidReadingLength> {
	InvalidReadingLength::check(data.len(), ENCODER_SINGLE_SIZE)?;
	Ok(read_i32_le(&data[0..4]))
}
