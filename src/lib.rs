//! Driving a small two-wheeled rover over a byte-oriented bus.
//!
//! Requests to the rover are single bytes (a 4-bit function code and a 4-bit
//! flag nibble), encoder readings come back as little-endian signed tick
//! counts. The [`Robot`] facade turns those wire primitives into a motor and
//! encoder API, and [`ControlLoop`] drives a pluggable [`Algorithm`] at a
//! fixed rate.

#[macro_use]
mod log;

pub mod algorithm;
pub mod protocol;
pub mod transport;

mod control;
mod endian;
mod error;
mod robot;

pub use algorithm::{Algorithm, Signal};
pub use control::{ControlLoop, DEFAULT_FREQUENCY};
pub use error::{InvalidNibble, InvalidReadingLength, ProtocolError, TransferError};
pub use robot::{Robot, TickReading, DEFAULT_ADDRESS};
pub use transport::Transport;
