pub mod parser;

/// TamarinError is the top-level error type for the interpreter shell.
///
/// Runtime faults never appear here: inside the language they are
/// [`Object::Error`](crate::object::Object::Error) values flowing through the
/// ordinary evaluation channel.
#[derive(thiserror::Error, Debug)]
pub enum TamarinError {
	/// Internal error, should never happen
	#[error("InternalError: {0}")]
	Internal(#[from] anyhow::Error),
	/// Parse errors encountered during parsing
	#[error("Generated {0} parse errors")]
	ParseErrors(usize),
}
