//! Line-oriented input and output.
//!
//! The evaluator never touches the terminal directly: `print`, `println` and
//! `input` all go through an [`Io`] pair, so embedders and tests can swap in
//! buffers. [`Io::stdio`] is the interactive default.

use std::io::{BufRead, BufReader, Write};

pub struct Io {
	input:  Box<dyn BufRead>,
	output: Box<dyn Write>,
}

impl Io {
	pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self { Self { input, output } }

	/// Process standard input and output.
	pub fn stdio() -> Self {
		Self::new(Box::new(BufReader::new(std::io::stdin())), Box::new(std::io::stdout()))
	}

	/// Write without a trailing newline, flushing so a prompt is visible
	/// before any read that follows.
	pub fn print(&mut self, text: &str) {
		if let Err(e) = write!(self.output, "{text}").and_then(|()| self.output.flush()) {
			eprintln!("Failed write output: {e}");
		}
	}

	/// Write with a trailing newline.
	pub fn print_line(&mut self, text: &str) {
		if let Err(e) = writeln!(self.output, "{text}") {
			eprintln!("Failed write output: {e}");
		}
	}

	/// Read one line, without its line ending. `None` means end of input.
	pub fn read_line(&mut self) -> Option<String> {
		let mut line = String::new();
		match self.input.read_line(&mut line) {
			Ok(0) => None,
			Ok(_) => {
				while line.ends_with('\n') || line.ends_with('\r') {
					line.pop();
				}
				Some(line)
			}
			Err(e) => {
				eprintln!("Failed read line: {e}");
				None
			}
		}
	}
}

impl Default for Io {
	fn default() -> Self { Self::stdio() }
}
