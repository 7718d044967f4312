//! # How Tamarin runs your code
//!
//! User's source code: `let total = base + tip * 2;`
//!
//! Tamarin is a small dynamically typed scripting language executed by a
//! tree-walking interpreter. There is no bytecode and no virtual machine:
//! source text becomes a syntax tree and the tree is walked directly.

//! ## Lexing
//!
//! The lexer takes in characters and hands out tokens one at a time, on
//! demand. Operators `+`, `=`, numbers `123` and `1.5`, string literals
//! `"hi!"`, identifiers `base` are all tokens.
//!
//! Whitespace is skipped (line breaks are counted for diagnostics), so the
//! tokens are `["let", "total", "=", "base", "+", "tip", "*", "2", ";"]`.

//! ## Parsing
//!
//! A Pratt parser builds an `abstract syntax tree` from the token stream,
//! one statement at a time. Operator precedence lives in a single ladder the
//! expression loop climbs, which is what turns the flat token list into
//!
//! ``` markdown
//! total (Statement::Let)
//! └── + (Expression::Infix)
//!     ├── base (Expression::Identifier)
//!     └── * (Expression::Infix)
//!         ├── tip (Expression::Identifier)
//!         └── 2 (Expression::Integer)
//! ```
//!
//! Syntax errors don't stop the parser. It records the diagnostic,
//! resynchronizes at the next statement boundary and keeps going, so one
//! pass reports every error the source contains.

//! ## Evaluation
//!
//! The evaluator walks the tree and computes a value for every node.
//! Variables live in environments: hash maps chained from innermost scope
//! outward, and a function literal captures the environment it was created
//! in. Calling it later evaluates the body against that captured chain,
//! which is all it takes for closures to work.
//!
//! There are two error channels and they never mix. Faults in the user's
//! program (`5 + true`, an unknown identifier) are ordinary values that
//! flow through evaluation and abort it when they surface. Faults in the
//! interpreter's own shell (an unreadable source file) are `Result`s.

//! ## The REPL
//!
//! A session keeps one evaluator and one global environment alive across
//! inputs, so a binding made on one line is visible on the next. Builtins
//! read and write through handles owned by the session, not through the
//! process's stdio, which keeps whole interactive sessions scriptable.

pub mod cli;
mod ast;
mod environment;
mod error;
mod evaluator;
mod io;
mod lexer;
mod object;
mod parser;
mod session;
mod utils;

pub use environment::Environment;
pub use error::{TamarinError, parser::{ParseError, ParseErrorKind}};
pub use evaluator::Evaluator;
pub use io::Io;
pub use object::Object;
pub use session::Session;
pub use utils::RcCell;

/// Parse and evaluate `source` in `env`, with builtins wired to stdio. A
/// parse failure comes back as a single [`Object::Error`] joining every
/// diagnostic.
pub fn evaluate_source(source: &str, env: &RcCell<Environment>) -> Object {
	Evaluator::new().evaluate(source, env)
}

/// Rendered parse diagnostics for `source`, in order; empty when it parses.
pub fn parse_errors(source: &str) -> Vec<String> {
	match parser::Parser::new(lexer::Lexer::new(source)).parse_program() {
		Ok(_) => Vec::new(),
		Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
	}
}
