use core::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use roverbus::algorithm::{InputSource, Token};

/// Keyboard input read from the terminal in raw mode.
///
/// Raw mode is enabled for the lifetime of the value and restored on drop.
pub struct Keys {
	_private: (),
}

impl Keys {
	pub fn new() -> Result<Self, ()> {
		crossterm::terminal::enable_raw_mode()
			.map_err(|e| log::error!("Failed to enable raw terminal mode: {}", e))?;
		Ok(Self { _private: () })
	}
}

impl Drop for Keys {
	fn drop(&mut self) {
		if let Err(e) = crossterm::terminal::disable_raw_mode() {
			log::warn!("Failed to restore terminal mode: {}", e);
		}
	}
}

impl InputSource for Keys {
	fn read_token(&mut self, timeout: Duration) -> Token {
		match crossterm::event::poll(timeout) {
			Ok(true) => (),
			Ok(false) => return Token::Idle,
			Err(e) => {
				log::warn!("Failed to poll for input: {}", e);
				return Token::Idle;
			},
		}
		match crossterm::event::read() {
			Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => match key.code {
				KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Token::Quit,
				KeyCode::Char('w') | KeyCode::Up => Token::Forward,
				KeyCode::Char('a') | KeyCode::Left => Token::PivotLeft,
				KeyCode::Char('s') | KeyCode::Down => Token::Backward,
				KeyCode::Char('d') | KeyCode::Right => Token::PivotRight,
				KeyCode::Char('q') | KeyCode::Esc => Token::Quit,
				_ => Token::Idle,
			},
			Ok(_) => Token::Idle,
			Err(e) => {
				log::warn!("Failed to read input: {}", e);
				Token::Idle
			},
		}
	}
}
