use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use roverbus::Transport;

/// The error reported by [`MockTransport`] for simulated failures.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MockError;

impl std::fmt::Display for MockError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "simulated transport failure")
	}
}

impl std::error::Error for MockError {}

#[derive(Default)]
struct Inner {
	writes: Vec<(u8, Vec<u8>)>,
	queries: Vec<(u8, Vec<u8>)>,
	responses: VecDeque<Result<Vec<u8>, MockError>>,
	fail_writes: bool,
}

/// Bus transport double with scripted responses.
///
/// Clones share state, so a test can keep one handle for inspection while the
/// robot owns another. Write-read transactions consume scripted responses in
/// order; once the script runs out every transaction fails, like a dead bus.
#[derive(Clone, Default)]
pub struct MockTransport {
	inner: Arc<Mutex<Inner>>,
}

#[allow(dead_code)]
impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queue a raw response for one write-read transaction.
	pub fn push_response(&self, bytes: &[u8]) {
		self.inner.lock().unwrap().responses.push_back(Ok(bytes.to_vec()));
	}

	/// Queue an encoder pair response.
	pub fn push_ticks(&self, left: i32, right: i32) {
		let mut bytes = Vec::with_capacity(8);
		bytes.extend_from_slice(&left.to_le_bytes());
		bytes.extend_from_slice(&right.to_le_bytes());
		self.push_response(&bytes);
	}

	/// Queue `count` failing write-read transactions.
	pub fn push_read_failures(&self, count: usize) {
		let mut inner = self.inner.lock().unwrap();
		for _ in 0..count {
			inner.responses.push_back(Err(MockError));
		}
	}

	/// Make every plain write fail from now on.
	pub fn fail_writes(&self, fail: bool) {
		self.inner.lock().unwrap().fail_writes = fail;
	}

	/// Every payload sent with a plain write, in order.
	pub fn writes(&self) -> Vec<Vec<u8>> {
		self.inner.lock().unwrap().writes.iter().map(|(_, data)| data.clone()).collect()
	}

	/// The device address of every plain write, in order.
	pub fn write_addresses(&self) -> Vec<u8> {
		self.inner.lock().unwrap().writes.iter().map(|(address, _)| *address).collect()
	}

	/// Every request payload sent with a write-read transaction, in order.
	pub fn queries(&self) -> Vec<Vec<u8>> {
		self.inner.lock().unwrap().queries.iter().map(|(_, data)| data.clone()).collect()
	}

	/// Forget all recorded plain writes.
	pub fn clear_writes(&self) {
		self.inner.lock().unwrap().writes.clear();
	}
}

impl Transport for MockTransport {
	type Error = MockError;

	fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
		let mut inner = self.inner.lock().unwrap();
		if inner.fail_writes {
			return Err(MockError);
		}
		inner.writes.push((address, data.to_vec()));
		Ok(())
	}

	fn write_read(&mut self, address: u8, request: &[u8], response: &mut [u8]) -> Result<(), Self::Error> {
		let mut inner = self.inner.lock().unwrap();
		inner.queries.push((address, request.to_vec()));
		match inner.responses.pop_front() {
			Some(Ok(bytes)) => {
				assert!(bytes.len() == response.len(), "scripted response has the wrong length");
				response.copy_from_slice(&bytes);
				Ok(())
			},
			Some(Err(error)) => Err(error),
			None => Err(MockError),
		}
	}
}
