use crate::lexer::TokenKind;

/// Binding powers, lowest to highest. Parsing at level `p` keeps consuming
/// operators only while they bind strictly tighter than `p`, which makes
/// every binary operator left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
	Lowest,
	Equality,
	Comparison,
	Term,
	Factor,
	Unary,
	Call,
	Index,
}

impl Precedence {
	/// The binding power of a token seen in infix position. Tokens that
	/// cannot continue an expression bind lowest, which ends the climb.
	pub fn of(kind: TokenKind) -> Self {
		use TokenKind::*;
		match kind {
			EqualEqual | BangEqual => Precedence::Equality,
			Less | Greater | LessEqual | GreaterEqual => Precedence::Comparison,
			Plus | Minus => Precedence::Term,
			Star | Slash => Precedence::Factor,
			LeftParen => Precedence::Call,
			LeftBracket => Precedence::Index,
			_ => Precedence::Lowest,
		}
	}
}
