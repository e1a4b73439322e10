//! [`Transport`] trait to support talking to the rover over different bus implementations.

#[cfg(feature = "i2cdev")]
pub mod i2cdev;

/// [`Transport`]s carry raw request and response bytes between the host and
/// the rover motor controller.
///
/// The device address is fixed for a whole run; it is passed on every
/// transaction so one bus handle can serve any address. Implementations are
/// used from a single thread and do not need to be re-entrant.
pub trait Transport {
	/// The error type returned by the transport when a transaction fails.
	type Error;

	/// Write all bytes in `data` to the device at `address`.
	fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

	/// Write `request` to the device at `address`, then read exactly
	/// `response.len()` bytes back into `response` in the same transaction.
	fn write_read(&mut self, address: u8, request: &[u8], response: &mut [u8]) -> Result<(), Self::Error>;
}
