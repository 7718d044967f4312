use std::{fs::read_to_string, path::Path};

use anyhow::Context;

use crate::{
	TamarinError,
	environment::Environment,
	evaluator::Evaluator,
	io::Io,
	lexer::Lexer,
	object::Object,
	parser::Parser,
	utils::RcCell,
};

/// An interpreter session: one evaluator plus the global environment that
/// survives across inputs, so each REPL line sees earlier bindings.
pub struct Session {
	evaluator:   Evaluator,
	environment: RcCell<Environment>,
}

impl Default for Session {
	fn default() -> Self { Self::new() }
}

impl Session {
	pub fn new() -> Self {
		Self { evaluator: Evaluator::new(), environment: RcCell::new(Environment::new()) }
	}

	/// A session that reads and writes the given handles instead of stdio.
	pub fn with_io(io: Io) -> Self {
		Self { evaluator: Evaluator::with_io(io), environment: RcCell::new(Environment::new()) }
	}

	/// Run a source file to completion.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TamarinError> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.run(&source)
	}

	/// Run the REPL prompt until end of input.
	pub fn run_prompt(&mut self) {
		let io = self.evaluator.io_mut();
		io.print_line(&format!("tamarin {}", env!("CARGO_PKG_VERSION")));
		io.print_line("type some commands");
		loop {
			self.evaluator.io_mut().print(">> ");
			let Some(line) = self.evaluator.io_mut().read_line() else {
				self.evaluator.io_mut().print_line("\nExited tamarin repl");
				break;
			};
			if let Err(e) = self.run(&line) {
				eprintln!("Failed run prompt: {e}");
			}
		}
	}
}

impl Session {
	/// Parse and evaluate one source text against the session environment,
	/// printing the result unless it is the void `None`.
	fn run(&mut self, source: &str) -> Result<(), TamarinError> {
		let program = match Parser::new(Lexer::new(source)).parse_program() {
			Ok(program) => program,
			Err(errors) => {
				for error in &errors {
					eprintln!("{error}");
				}
				return Err(TamarinError::ParseErrors(errors.len()));
			}
		};
		let result = self.evaluator.eval_program(&program, &self.environment);
		if !matches!(result, Object::None) {
			self.evaluator.io_mut().print_line(&result.to_string());
		}
		Ok(())
	}
}
