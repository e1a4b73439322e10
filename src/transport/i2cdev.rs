//! Trait implementation using the `i2cdev` crate.

use i2cdev::core::{I2CMessage, I2CTransfer};
use i2cdev::linux::{LinuxI2CBus, LinuxI2CError, LinuxI2CMessage};

impl crate::Transport for LinuxI2CBus {
	type Error = LinuxI2CError;

	fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
		let mut messages = [LinuxI2CMessage::write(data).with_address(address.into())];
		self.transfer(&mut messages)?;
		Ok(())
	}

	fn write_read(&mut self, address: u8, request: &[u8], response: &mut [u8]) -> Result<(), Self::Error> {
		// One transfer with a repeated start, so no other master can slip in
		// between the request and the response.
		let mut messages = [
			LinuxI2CMessage::write(request).with_address(address.into()),
			LinuxI2CMessage::read(response).with_address(address.into()),
		];
		self.transfer(&mut messages)?;
		Ok(())
	}
}
