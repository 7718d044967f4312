//! AST nodes for tamarin.
//!
//! There is no place in the grammar where both an expression and a statement
//! are allowed, so the two are separate enums. Expressions carry their
//! operator as a [`TokenKind`]; positions are not stored past parsing.
//!
//! Every node can reconstruct source text through `Display`. The output is
//! normalized rather than verbatim: every infix and prefix expression is
//! parenthesized, statements end with `;`, floats keep a decimal point.
//! Feeding the rendering back through the parser yields a structurally equal
//! tree, which the tests rely on.

use std::{fmt::Display, rc::Rc};

use crate::lexer::TokenKind;

/// The root node: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
	pub statements: Vec<Statement>,
}

impl Program {
	pub fn token_literal(&self) -> String {
		self.statements.first().map(Statement::token_literal).unwrap_or_default()
	}
}

impl Display for Program {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let lines = self.statements.iter().map(|s| s.to_string()).collect::<Vec<_>>();
		write!(f, "{}", lines.join("\n"))
	}
}

/// A statement in tamarin.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	/// A let binding, `let x = 5;`.
	Let { name: Identifier, value: Expression },
	/// A return statement, with or without a value.
	Return { value: Option<Expression> },
	/// An expression used as a statement.
	Expression(Expression),
}

impl Statement {
	pub fn token_literal(&self) -> String {
		match self {
			Statement::Let { .. } => "let".into(),
			Statement::Return { .. } => "return".into(),
			Statement::Expression(expression) => expression.token_literal(),
		}
	}
}

impl Display for Statement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Let { name, value } => write!(f, "let {name} = {value};"),
			Statement::Return { value: Some(value) } => write!(f, "return {value};"),
			Statement::Return { value: None } => write!(f, "return;"),
			Statement::Expression(expression) => write!(f, "{expression};"),
		}
	}
}

/// An ordered statement sequence forming a lexical body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
	pub statements: Vec<Statement>,
}

impl Display for BlockStatement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.statements.is_empty() {
			return write!(f, "{{}}");
		}
		let body = self.statements.iter().map(|s| s.to_string()).collect::<Vec<_>>();
		write!(f, "{{ {} }}", body.join(" "))
	}
}

/// A bare name. Shared between expressions and function parameter lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
	pub name: String,
}

impl Identifier {
	pub fn new(name: impl Into<String>) -> Self { Self { name: name.into() } }
}

impl Display for Identifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.name) }
}

/// An expression in tamarin.
///
/// Function literals hold their parameters and body behind `Rc` so that
/// evaluating one builds a function object without copying the subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
	Identifier(Identifier),
	Integer(i64),
	Float(f64),
	Boolean(bool),
	Str(String),
	Prefix { operator: TokenKind, right: Box<Expression> },
	Infix { left: Box<Expression>, operator: TokenKind, right: Box<Expression> },
	If { condition: Box<Expression>, consequence: BlockStatement, alternative: Option<BlockStatement> },
	Function { parameters: Rc<Vec<Identifier>>, body: Rc<BlockStatement> },
	Call { callee: Box<Expression>, arguments: Vec<Expression> },
	Index { left: Box<Expression>, index: Box<Expression> },
	Array(Vec<Expression>),
}

impl Expression {
	pub fn token_literal(&self) -> String {
		match self {
			Expression::Identifier(identifier) => identifier.name.clone(),
			Expression::Integer(value) => value.to_string(),
			Expression::Float(value) => format_float(*value),
			Expression::Boolean(value) => value.to_string(),
			Expression::Str(value) => value.clone(),
			Expression::Prefix { operator, .. } => operator.to_string(),
			Expression::Infix { operator, .. } => operator.to_string(),
			Expression::If { .. } => "if".into(),
			Expression::Function { .. } => "fn".into(),
			Expression::Call { .. } => "(".into(),
			Expression::Index { .. } => "[".into(),
			Expression::Array(_) => "[".into(),
		}
	}
}

impl Display for Expression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Expression::Identifier(identifier) => write!(f, "{identifier}"),
			Expression::Integer(value) => write!(f, "{value}"),
			Expression::Float(value) => write!(f, "{}", format_float(*value)),
			Expression::Boolean(value) => write!(f, "{value}"),
			Expression::Str(value) => write!(f, "\"{value}\""),
			Expression::Prefix { operator, right } => write!(f, "({operator}{right})"),
			Expression::Infix { left, operator, right } => write!(f, "({left} {operator} {right})"),
			Expression::If { condition, consequence, alternative } => {
				write!(f, "if ({condition}) {consequence}")?;
				if let Some(alternative) = alternative {
					write!(f, " else {alternative}")?;
				}
				Ok(())
			}
			Expression::Function { parameters, body } => {
				let parameters = parameters.iter().map(|p| p.to_string()).collect::<Vec<_>>();
				write!(f, "fn({}) {body}", parameters.join(", "))
			}
			Expression::Call { callee, arguments } => {
				let arguments = arguments.iter().map(|a| a.to_string()).collect::<Vec<_>>();
				write!(f, "{callee}({})", arguments.join(", "))
			}
			Expression::Index { left, index } => write!(f, "({left}[{index}])"),
			Expression::Array(elements) => {
				let elements = elements.iter().map(|e| e.to_string()).collect::<Vec<_>>();
				write!(f, "[{}]", elements.join(", "))
			}
		}
	}
}

/// A float rendering that always keeps a decimal point, so the text lexes
/// back as a float and never collapses into an integer literal.
fn format_float(value: f64) -> String {
	if value.fract() == 0.0 && value.is_finite() {
		format!("{value:.1}")
	} else {
		format!("{value}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unparse_let() {
		let program = Program {
			statements: vec![Statement::Let {
				name: Identifier::new("myVar"),
				value: Expression::Identifier(Identifier::new("anotherVar")),
			}],
		};
		assert_eq!(program.to_string(), "let myVar = anotherVar;");
		assert_eq!(program.token_literal(), "let");
	}

	#[test]
	fn unparse_expressions() {
		let infix = Expression::Infix {
			left: Box::new(Expression::Integer(1)),
			operator: TokenKind::Plus,
			right: Box::new(Expression::Prefix {
				operator: TokenKind::Minus,
				right: Box::new(Expression::Integer(2)),
			}),
		};
		assert_eq!(infix.to_string(), "(1 + (-2))");

		let call = Expression::Call {
			callee: Box::new(Expression::Identifier(Identifier::new("add"))),
			arguments: vec![Expression::Integer(1), Expression::Str("two".into())],
		};
		assert_eq!(call.to_string(), "add(1, \"two\")");

		let array = Expression::Array(vec![Expression::Integer(1), Expression::Integer(2)]);
		assert_eq!(array.to_string(), "[1, 2]");
	}

	#[test]
	fn unparse_floats_keep_decimal_point() {
		assert_eq!(Expression::Float(2.5).to_string(), "2.5");
		assert_eq!(Expression::Float(2.0).to_string(), "2.0");
		assert_eq!(Expression::Float(100.0).to_string(), "100.0");
	}

	#[test]
	fn unparse_function() {
		let function = Expression::Function {
			parameters: Rc::new(vec![Identifier::new("x"), Identifier::new("y")]),
			body: Rc::new(BlockStatement {
				statements: vec![Statement::Expression(Expression::Infix {
					left: Box::new(Expression::Identifier(Identifier::new("x"))),
					operator: TokenKind::Plus,
					right: Box::new(Expression::Identifier(Identifier::new("y"))),
				})],
			}),
		};
		assert_eq!(function.to_string(), "fn(x, y) { (x + y); }");
	}

	#[test]
	fn unparse_empty_block() {
		let expression = Expression::If {
			condition: Box::new(Expression::Boolean(true)),
			consequence: BlockStatement::default(),
			alternative: None,
		};
		assert_eq!(expression.to_string(), "if (true) {}");
	}

	#[test]
	fn token_literals() {
		assert_eq!(Expression::Integer(7).token_literal(), "7");
		assert_eq!(Expression::Boolean(true).token_literal(), "true");
		assert_eq!(
			Expression::Prefix { operator: TokenKind::Bang, right: Box::new(Expression::Boolean(true)) }
				.token_literal(),
			"!"
		);
		assert_eq!(Statement::Return { value: None }.token_literal(), "return");
		assert_eq!(Program::default().token_literal(), "");
	}
}
