use crate::lexer::TokenKind;

/// A single parse diagnostic. The parser records these and keeps going, so
/// one run can report several of them.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {kind}")]
pub struct ParseError {
	line: usize,
	kind: ParseErrorKind,
}

impl ParseError {
	pub fn new(line: usize, kind: ParseErrorKind) -> Self { Self { line, kind } }
}

#[derive(Debug)]
pub enum ParseErrorKind {
	/// The next token was not the one the grammar requires here.
	UnexpectedToken { expected: TokenKind, found: TokenKind },
	/// A token that cannot start an expression in prefix position.
	ExpectedExpression(TokenKind),
	/// An integer literal that does not fit in 64 bits.
	IntegerOutOfRange(String),
	/// A float literal past the finite range of a 64-bit float.
	FloatOutOfRange(String),
	/// A character no lexer rule recognizes.
	UnrecognizedCharacter(String),
}

impl std::fmt::Display for ParseErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorKind::*;
		match self {
			UnexpectedToken { expected, found } => {
				write!(f, "expected `{expected}`, found `{found}`")
			}
			ExpectedExpression(found) => {
				write!(f, "expected an expression, found `{found}`")
			}
			IntegerOutOfRange(literal) => {
				write!(f, "integer literal `{literal}` out of range")
			}
			FloatOutOfRange(literal) => {
				write!(f, "float literal `{literal}` out of range")
			}
			UnrecognizedCharacter(text) => {
				write!(f, "unrecognized character `{text}`")
			}
		}
	}
}
