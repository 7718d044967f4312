use std::fmt::Display;

/// A token produced by the lexer.
///
/// `literal` holds the owned source text of the lexeme: the identifier name,
/// the digit run, the string body without its quotes, the comment text. For
/// fixed tokens it is the operator or keyword itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind:    TokenKind,
	pub literal: String,
	pub line:    usize,
}

impl Token {
	pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize) -> Self {
		Self { kind, literal: literal.into(), line }
	}
}

/// The kinds of tokens in tamarin. Fieldless, so copying is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	/// A character no rule recognizes. The parser reports it.
	Illegal,
	/// End of input. Returned forever once the source is exhausted.
	Eof,
	/// Identifier, e.g. variable or function name.
	Identifier,
	/// Integer literal, e.g. `123`.
	Integer,
	/// Float literal, e.g. `123.45`.
	Float,
	/// String literal, e.g. `"hello"`.
	Str,
	/// Line comment `// ...`. Dropped by the parser.
	Comment,
	/// Assignment `=`.
	Equal,
	/// Plus `+`.
	Plus,
	/// Minus `-`.
	Minus,
	/// Bang `!`.
	Bang,
	/// Asterisk `*`.
	Star,
	/// Slash `/`.
	Slash,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Greater than `>`.
	Greater,
	/// Greater than or equal `>=`.
	GreaterEqual,
	/// Equality `==`.
	EqualEqual,
	/// Inequality `!=`.
	BangEqual,
	/// Comma `,`.
	Comma,
	/// Semicolon `;`.
	Semicolon,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Left bracket `[`.
	LeftBracket,
	/// Right bracket `]`.
	RightBracket,
	/// Function keyword `fn`.
	Function,
	/// Let keyword.
	Let,
	/// Boolean literal `true`.
	True,
	/// Boolean literal `false`.
	False,
	/// If keyword.
	If,
	/// Else keyword.
	Else,
	/// Return keyword.
	Return,
}

impl TokenKind {
	pub fn keyword_or_identifier(value: &str) -> Self {
		match value {
			"fn" => TokenKind::Function,
			"let" => TokenKind::Let,
			"true" => TokenKind::True,
			"false" => TokenKind::False,
			"if" => TokenKind::If,
			"else" => TokenKind::Else,
			"return" => TokenKind::Return,
			_ => TokenKind::Identifier,
		}
	}
}

/// Renders the source text for fixed tokens and a descriptive name for the
/// variable ones. Both unparse output and parse diagnostics go through this.
impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use TokenKind::*;
		let text = match self {
			Illegal => "illegal character",
			Eof => "end of input",
			Identifier => "identifier",
			Integer => "integer literal",
			Float => "float literal",
			Str => "string literal",
			Comment => "comment",
			Equal => "=",
			Plus => "+",
			Minus => "-",
			Bang => "!",
			Star => "*",
			Slash => "/",
			Less => "<",
			LessEqual => "<=",
			Greater => ">",
			GreaterEqual => ">=",
			EqualEqual => "==",
			BangEqual => "!=",
			Comma => ",",
			Semicolon => ";",
			LeftParen => "(",
			RightParen => ")",
			LeftBrace => "{",
			RightBrace => "}",
			LeftBracket => "[",
			RightBracket => "]",
			Function => "fn",
			Let => "let",
			True => "true",
			False => "false",
			If => "if",
			Else => "else",
			Return => "return",
		};
		write!(f, "{text}")
	}
}
