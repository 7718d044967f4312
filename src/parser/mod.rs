//! The parser turns the lexer's token stream into an [`ast::Program`].
//!
//! Statements are parsed by recursive descent; expressions use top-down
//! operator precedence (Pratt) parsing over a two-token window (`cur`,
//! `peek`). Each token kind that can start an expression has a prefix rule;
//! each kind that can continue one has a binding power in
//! [`precedence::Precedence`].
//!
//! | Name       | Operators         | Associates |
//! |------------|-------------------|------------|
//! | Equality   | `==` `!=`         | Left       |
//! | Comparison | `<` `>` `<=` `>=` | Left       |
//! | Term       | `+` `-`           | Left       |
//! | Factor     | `*` `/`           | Left       |
//! | Unary      | `!` `-`           | Prefix     |
//! | Call/Index | `f(x)` `a[i]`     | Postfix    |
//!
//! Statement grammar:
//!
//! ``` BNF
//! program    → statement* EOF
//! statement  → "let" IDENT "=" expression ";"
//!            | "return" expression? ";"
//!            | expression ";"?
//! block      → "{" statement* "}"
//! ```
//!
//! Parse faults never abort the run: each one is recorded, the parser skips
//! to the next statement boundary, and parsing continues, so a single pass
//! reports every independent error it can find.

mod precedence;

use std::mem;

use TokenKind::*;
use precedence::Precedence;

use crate::{
	ast::{self, BlockStatement, Expression, Program, Statement},
	error::parser::{ParseError, ParseErrorKind},
	lexer::{Lexer, Token, TokenKind},
};

/// A Pratt parser over a pull lexer.
pub struct Parser<'a> {
	lexer:  Lexer<'a>,
	cur:    Token,
	peek:   Token,
	errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
	pub fn new(mut lexer: Lexer<'a>) -> Self {
		let cur = Self::significant(&mut lexer);
		let peek = Self::significant(&mut lexer);
		Self { lexer, cur, peek, errors: Vec::new() }
	}

	/// Parse the whole input. Returns the program, or every diagnostic
	/// collected along the way (the error list is never empty on `Err`).
	pub fn parse_program(mut self) -> Result<Program, Vec<ParseError>> {
		let mut program = Program::default();
		while self.cur.kind != Eof {
			match self.parse_statement() {
				Ok(statement) => program.statements.push(statement),
				Err(error) => {
					self.errors.push(error);
					self.synchronize();
					continue;
				}
			}
			self.next_token();
		}
		if self.errors.is_empty() { Ok(program) } else { Err(self.errors) }
	}

	/// Pull the next non-comment token from the lexer.
	fn significant(lexer: &mut Lexer) -> Token {
		loop {
			let token = lexer.next_token();
			if token.kind != Comment {
				return token;
			}
		}
	}

	/// Advance the two-token window.
	fn next_token(&mut self) {
		self.cur = mem::replace(&mut self.peek, Self::significant(&mut self.lexer));
	}

	/// Advance past `expected` or record where the grammar was violated.
	fn expect_peek(&mut self, expected: TokenKind) -> Result<(), ParseError> {
		if self.peek.kind == expected {
			self.next_token();
			Ok(())
		} else {
			Err(ParseError::new(
				self.peek.line,
				ParseErrorKind::UnexpectedToken { expected, found: self.peek.kind },
			))
		}
	}

	/// Skip to the start of the next statement after an error.
	fn synchronize(&mut self) {
		while !matches!(self.cur.kind, Eof) {
			if matches!(self.cur.kind, Semicolon) {
				self.next_token();
				return;
			}
			if matches!(self.peek.kind, Let | Return) {
				self.next_token();
				return;
			}
			self.next_token();
		}
	}

	fn parse_statement(&mut self) -> Result<Statement, ParseError> {
		match self.cur.kind {
			Let => self.parse_let(),
			Return => self.parse_return(),
			_ => self.parse_expression_statement(),
		}
	}

	fn parse_let(&mut self) -> Result<Statement, ParseError> {
		self.expect_peek(Identifier)?;
		let name = ast::Identifier::new(self.cur.literal.clone());
		self.expect_peek(Equal)?;
		self.next_token();
		let value = self.parse_expression(Precedence::Lowest)?;
		if matches!(self.peek.kind, Semicolon) {
			self.next_token();
		}
		Ok(Statement::Let { name, value })
	}

	fn parse_return(&mut self) -> Result<Statement, ParseError> {
		if matches!(self.peek.kind, Semicolon) {
			self.next_token();
			return Ok(Statement::Return { value: None });
		}
		if matches!(self.peek.kind, RightBrace | Eof) {
			return Ok(Statement::Return { value: None });
		}
		self.next_token();
		let value = self.parse_expression(Precedence::Lowest)?;
		if matches!(self.peek.kind, Semicolon) {
			self.next_token();
		}
		Ok(Statement::Return { value: Some(value) })
	}

	fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
		let expression = self.parse_expression(Precedence::Lowest)?;
		if matches!(self.peek.kind, Semicolon) {
			self.next_token();
		}
		Ok(Statement::Expression(expression))
	}

	/// The Pratt loop: a prefix term, then infix continuations while the
	/// next operator binds tighter than `precedence`.
	fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
		let mut left = self.parse_prefix()?;
		while precedence < Precedence::of(self.peek.kind) {
			self.next_token();
			left = self.parse_infix(left)?;
		}
		Ok(left)
	}

	fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
		match self.cur.kind {
			Identifier => Ok(Expression::Identifier(ast::Identifier::new(self.cur.literal.clone()))),
			Integer => self.parse_integer(),
			Float => self.parse_float(),
			Str => Ok(Expression::Str(self.cur.literal.clone())),
			True => Ok(Expression::Boolean(true)),
			False => Ok(Expression::Boolean(false)),
			Bang | Minus => self.parse_prefix_expression(),
			LeftParen => self.parse_grouped(),
			If => self.parse_if(),
			Function => self.parse_function(),
			LeftBracket => Ok(Expression::Array(self.parse_expression_list(RightBracket)?)),
			Illegal => Err(ParseError::new(
				self.cur.line,
				ParseErrorKind::UnrecognizedCharacter(self.cur.literal.clone()),
			)),
			kind => Err(ParseError::new(self.cur.line, ParseErrorKind::ExpectedExpression(kind))),
		}
	}

	fn parse_infix(&mut self, left: Expression) -> Result<Expression, ParseError> {
		match self.cur.kind {
			LeftParen => self.parse_call(left),
			LeftBracket => self.parse_index(left),
			_ => {
				let operator = self.cur.kind;
				let precedence = Precedence::of(operator);
				self.next_token();
				let right = self.parse_expression(precedence)?;
				Ok(Expression::Infix { left: Box::new(left), operator, right: Box::new(right) })
			}
		}
	}

	fn parse_integer(&mut self) -> Result<Expression, ParseError> {
		self.cur.literal.parse().map(Expression::Integer).map_err(|_| {
			ParseError::new(self.cur.line, ParseErrorKind::IntegerOutOfRange(self.cur.literal.clone()))
		})
	}

	fn parse_float(&mut self) -> Result<Expression, ParseError> {
		// f64 parsing saturates to inf past its range instead of failing
		match self.cur.literal.parse::<f64>() {
			Ok(value) if value.is_finite() => Ok(Expression::Float(value)),
			_ => Err(ParseError::new(
				self.cur.line,
				ParseErrorKind::FloatOutOfRange(self.cur.literal.clone()),
			)),
		}
	}

	fn parse_prefix_expression(&mut self) -> Result<Expression, ParseError> {
		let operator = self.cur.kind;
		self.next_token();
		let right = self.parse_expression(Precedence::Unary)?;
		Ok(Expression::Prefix { operator, right: Box::new(right) })
	}

	/// Grouping resets to the lowest precedence and leaves no node behind.
	fn parse_grouped(&mut self) -> Result<Expression, ParseError> {
		self.next_token();
		let expression = self.parse_expression(Precedence::Lowest)?;
		self.expect_peek(RightParen)?;
		Ok(expression)
	}

	fn parse_if(&mut self) -> Result<Expression, ParseError> {
		self.expect_peek(LeftParen)?;
		self.next_token();
		let condition = self.parse_expression(Precedence::Lowest)?;
		self.expect_peek(RightParen)?;
		self.expect_peek(LeftBrace)?;
		let consequence = self.parse_block()?;
		let alternative = if matches!(self.peek.kind, Else) {
			self.next_token();
			self.expect_peek(LeftBrace)?;
			Some(self.parse_block()?)
		} else {
			None
		};
		Ok(Expression::If { condition: Box::new(condition), consequence, alternative })
	}

	fn parse_function(&mut self) -> Result<Expression, ParseError> {
		self.expect_peek(LeftParen)?;
		let parameters = self.parse_parameters()?;
		self.expect_peek(LeftBrace)?;
		let body = self.parse_block()?;
		Ok(Expression::Function { parameters: parameters.into(), body: body.into() })
	}

	fn parse_parameters(&mut self) -> Result<Vec<ast::Identifier>, ParseError> {
		let mut parameters = Vec::new();
		if matches!(self.peek.kind, RightParen) {
			self.next_token();
			return Ok(parameters);
		}
		self.expect_peek(Identifier)?;
		parameters.push(ast::Identifier::new(self.cur.literal.clone()));
		while matches!(self.peek.kind, Comma) {
			self.next_token();
			self.expect_peek(Identifier)?;
			parameters.push(ast::Identifier::new(self.cur.literal.clone()));
		}
		self.expect_peek(RightParen)?;
		Ok(parameters)
	}

	/// Parse statements until the matching `}` or end of input.
	fn parse_block(&mut self) -> Result<BlockStatement, ParseError> {
		let mut block = BlockStatement::default();
		self.next_token();
		while !matches!(self.cur.kind, RightBrace | Eof) {
			block.statements.push(self.parse_statement()?);
			self.next_token();
		}
		Ok(block)
	}

	fn parse_call(&mut self, callee: Expression) -> Result<Expression, ParseError> {
		let arguments = self.parse_expression_list(RightParen)?;
		Ok(Expression::Call { callee: Box::new(callee), arguments })
	}

	fn parse_index(&mut self, left: Expression) -> Result<Expression, ParseError> {
		self.next_token();
		let index = self.parse_expression(Precedence::Lowest)?;
		self.expect_peek(RightBracket)?;
		Ok(Expression::Index { left: Box::new(left), index: Box::new(index) })
	}

	fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expression>, ParseError> {
		let mut items = Vec::new();
		if self.peek.kind == end {
			self.next_token();
			return Ok(items);
		}
		self.next_token();
		items.push(self.parse_expression(Precedence::Lowest)?);
		while matches!(self.peek.kind, Comma) {
			self.next_token();
			self.next_token();
			items.push(self.parse_expression(Precedence::Lowest)?);
		}
		self.expect_peek(end)?;
		Ok(items)
	}
}
