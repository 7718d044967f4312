//! Lexical analysis for tamarin source text.
//!
//! The lexer walks characters and groups them into tokens on demand: the
//! parser pulls one token at a time through [`Lexer::next_token`] instead of
//! receiving the whole stream up front. Two-character operators (`==`, `!=`,
//! `<=`, `>=`) follow maximal munch, so `<=` never lexes as `<` then `=`.
//! Keywords are recognized only after the whole identifier has been read,
//! by exact lookup in the keyword table.
//!
//! The lexer never fails. Unrecognized characters become [`TokenKind::Illegal`]
//! tokens for the parser to report, and once the input is exhausted every
//! further call yields [`TokenKind::Eof`].

mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenKind::*;
pub use token::*;

/// A pull-based lexer for tamarin source code.
pub struct Lexer<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Byte offset of the first character of the current lexeme
	start:       usize,
	/// Byte offset just past the last consumed character
	cursor:      usize,
	/// Current 1-based source line, carried into every token
	line:        usize,
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1 }
	}

	/// Produce the next token, advancing past it.
	pub fn next_token(&mut self) -> Token {
		self.skip_whitespace();

		self.start = match self.source_iter.peek() {
			Some(&(index, _)) => index,
			None => return Token::new(Eof, "", self.line),
		};
		self.cursor = self.start;
		let next_char = match self.advance() {
			Some(c) => c,
			None => return Token::new(Eof, "", self.line),
		};

		let kind = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			'[' => LeftBracket,
			']' => RightBracket,
			',' => Comma,
			';' => Semicolon,
			'+' => Plus,
			'-' => Minus,
			'*' => Star,
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'/' => {
				if self.match_next('/') {
					while self.peek().is_some_and(|c| c != '\n') {
						self.advance();
					}
					Comment
				} else {
					Slash
				}
			}
			'"' => return self.string(),
			c if c.is_ascii_digit() => return self.number(),
			c if c.is_ascii_alphabetic() || c == '_' => return self.identifier(),
			_ => Illegal,
		};

		Token::new(kind, &self.source[self.start..self.cursor], self.line)
	}

	/// Skip spaces, tabs, carriage returns and newlines, counting lines.
	fn skip_whitespace(&mut self) {
		while let Some(c) = self.peek() {
			match c {
				' ' | '\r' | '\t' => {
					self.advance();
				}
				'\n' => {
					self.line += 1;
					self.advance();
				}
				_ => break,
			}
		}
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	/// Scan a string literal. The token carries the body without its quotes;
	/// an unterminated literal keeps whatever was scanned before end of input.
	fn string(&mut self) -> Token {
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}

		let end = self.cursor;
		if self.peek().is_some() {
			self.advance(); // the closing "
		}
		Token::new(Str, &self.source[self.start + 1..end], self.line)
	}

	/// Scan an integer or float literal. A `.` counts only when a digit
	/// follows, so `1.` lexes as the integer `1` and a stray dot.
	fn number(&mut self) -> Token {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		let mut kind = Integer;
		if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			self.advance(); // consume '.'
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
			kind = Float;
		}

		Token::new(kind, &self.source[self.start..self.cursor], self.line)
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> Token {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		Token::new(TokenKind::keyword_or_identifier(text), text, self.line)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lex(input: &str) -> Vec<Token> {
		let mut lexer = Lexer::new(input);
		let mut tokens = Vec::new();
		loop {
			let token = lexer.next_token();
			let done = token.kind == Eof;
			tokens.push(token);
			if done {
				break;
			}
		}
		tokens
	}

	fn kinds(input: &str) -> Vec<TokenKind> { lex(input).into_iter().map(|t| t.kind).collect() }

	#[test]
	fn lex_operators() {
		assert_eq!(kinds("= + - ! * /"), vec![Equal, Plus, Minus, Bang, Star, Slash, Eof]);
		assert_eq!(kinds("< > <= >= == !="), vec![
			Less,
			Greater,
			LessEqual,
			GreaterEqual,
			EqualEqual,
			BangEqual,
			Eof
		]);
		assert_eq!(kinds(", ; ( ) { } [ ]"), vec![
			Comma,
			Semicolon,
			LeftParen,
			RightParen,
			LeftBrace,
			RightBrace,
			LeftBracket,
			RightBracket,
			Eof
		]);
	}

	#[test]
	fn lex_maximal_munch() {
		// `<=` must not lex as `<` then `=`
		assert_eq!(kinds("<="), vec![LessEqual, Eof]);
		assert_eq!(kinds("1<=2"), vec![Integer, LessEqual, Integer, Eof]);
		assert_eq!(kinds("==="), vec![EqualEqual, Equal, Eof]);
		assert_eq!(kinds("!=="), vec![BangEqual, Equal, Eof]);
	}

	#[test]
	fn lex_numbers() {
		let tokens = lex("0 42 3.14 0.5 123.456");
		let expected =
			[(Integer, "0"), (Integer, "42"), (Float, "3.14"), (Float, "0.5"), (Float, "123.456")];
		for (token, (kind, literal)) in tokens.iter().zip(expected) {
			assert_eq!(token.kind, kind);
			assert_eq!(token.literal, literal);
		}
	}

	#[test]
	fn lex_number_identifier_boundary() {
		// a digit run ends where a letter starts; letters absorb trailing digits
		let tokens = lex("123abc");
		assert_eq!(tokens[0].kind, Integer);
		assert_eq!(tokens[0].literal, "123");
		assert_eq!(tokens[1].kind, Identifier);
		assert_eq!(tokens[1].literal, "abc");
		assert_eq!(kinds("abc123"), vec![Identifier, Eof]);
		assert_eq!(kinds("1.5x"), vec![Float, Identifier, Eof]);
	}

	#[test]
	fn lex_dot_without_fraction() {
		// `1.` is an integer followed by a stray dot, `.5` starts with one
		assert_eq!(kinds("1."), vec![Integer, Illegal, Eof]);
		assert_eq!(kinds(".5"), vec![Illegal, Integer, Eof]);
	}

	#[test]
	fn lex_strings() {
		let tokens = lex(r#""" "hello" "hello world""#);
		assert_eq!(tokens[0].literal, "");
		assert_eq!(tokens[1].literal, "hello");
		assert_eq!(tokens[2].literal, "hello world");
		assert!(tokens.iter().take(3).all(|t| t.kind == Str));
	}

	#[test]
	fn lex_string_with_newlines() {
		let tokens = lex("\"hello\nworld\"");
		assert_eq!(tokens[0].kind, Str);
		assert_eq!(tokens[0].literal, "hello\nworld");
	}

	#[test]
	fn lex_unterminated_string() {
		let tokens = lex("\"abc");
		assert_eq!(tokens[0].kind, Str);
		assert_eq!(tokens[0].literal, "abc");
		assert_eq!(tokens[1].kind, Eof);
	}

	#[test]
	fn lex_keywords() {
		assert_eq!(kinds("fn let true false if else return"), vec![
			Function, Let, True, False, If, Else, Return, Eof
		]);
	}

	#[test]
	fn lex_identifiers() {
		let tokens = lex("x _name myVariable123 snake_case lettuce fnord");
		assert!(tokens.iter().take(6).all(|t| t.kind == Identifier));
		assert_eq!(tokens[4].literal, "lettuce");
		assert_eq!(tokens[5].literal, "fnord");
	}

	#[test]
	fn lex_comments() {
		assert_eq!(kinds("// just a comment"), vec![Comment, Eof]);
		let tokens = lex("1 // one\n2");
		assert_eq!(tokens[0].kind, Integer);
		assert_eq!(tokens[1].kind, Comment);
		assert_eq!(tokens[1].literal, "// one");
		assert_eq!(tokens[2].kind, Integer);
		assert_eq!(tokens[2].line, 2);
	}

	#[test]
	fn lex_illegal() {
		assert_eq!(kinds("@"), vec![Illegal, Eof]);
		let tokens = lex("&");
		assert_eq!(tokens[0].literal, "&");
	}

	#[test]
	fn lex_line_tracking() {
		let tokens = lex("a\nb\n\nc");
		assert_eq!(tokens[0].line, 1);
		assert_eq!(tokens[1].line, 2);
		assert_eq!(tokens[2].line, 4);
	}

	#[test]
	fn lex_eof_forever() {
		let mut lexer = Lexer::new("x");
		assert_eq!(lexer.next_token().kind, Identifier);
		assert_eq!(lexer.next_token().kind, Eof);
		assert_eq!(lexer.next_token().kind, Eof);
	}

	#[test]
	fn lex_program() {
		let input = "let add = fn(x, y) { x + y; };\nlet result = add(5, 10);";
		let expected = [
			(Let, "let"),
			(Identifier, "add"),
			(Equal, "="),
			(Function, "fn"),
			(LeftParen, "("),
			(Identifier, "x"),
			(Comma, ","),
			(Identifier, "y"),
			(RightParen, ")"),
			(LeftBrace, "{"),
			(Identifier, "x"),
			(Plus, "+"),
			(Identifier, "y"),
			(Semicolon, ";"),
			(RightBrace, "}"),
			(Semicolon, ";"),
			(Let, "let"),
			(Identifier, "result"),
			(Equal, "="),
			(Identifier, "add"),
			(LeftParen, "("),
			(Integer, "5"),
			(Comma, ","),
			(Integer, "10"),
			(RightParen, ")"),
			(Semicolon, ";"),
			(Eof, ""),
		];
		for (token, (kind, literal)) in lex(input).iter().zip(expected) {
			assert_eq!(token.kind, kind);
			assert_eq!(token.literal, literal);
		}
	}
}
