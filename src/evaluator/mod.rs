//! The tree-walking evaluator.
//!
//! Evaluation is a recursive descent over the AST that produces an
//! [`Object`] for every node. There is no `Result` anywhere in this path:
//! runtime faults are [`Object::Error`] values created at the fault site,
//! and every evaluation step checks its sub-results and returns early when
//! one is an error. `return` works the same way, wrapping its value in
//! [`Object::Return`] which travels up through blocks until the nearest
//! function call (or the program itself) unwraps it.
//!
//! Scoping: evaluating a function literal captures the current environment
//! handle. Calling the function evaluates its body in a fresh scope enclosed
//! by the CAPTURED environment — not the caller's — which is what makes
//! closures and lexical scoping come out right.

mod builtins;

use crate::{
	ast::{BlockStatement, Expression, Identifier, Program, Statement},
	environment::Environment,
	io::Io,
	lexer::{Lexer, TokenKind},
	object::{FunctionValue, Object},
	parser::Parser,
	utils::RcCell,
};

/// Walks the AST and computes [`Object`] results.
///
/// The evaluator owns the [`Io`] handle builtins print through and read
/// from; everything else arrives as arguments, so one evaluator can serve
/// many programs against many environments.
pub struct Evaluator {
	io: Io,
}

impl Default for Evaluator {
	fn default() -> Self { Self::new() }
}

impl Evaluator {
	pub fn new() -> Self { Self { io: Io::stdio() } }

	/// An evaluator whose builtins read and write the given handles.
	pub fn with_io(io: Io) -> Self { Self { io } }

	pub(crate) fn io_mut(&mut self) -> &mut Io { &mut self.io }

	/// Parse `source` and evaluate it in `env`. A parse failure comes back
	/// as a single `Object::Error` joining every diagnostic.
	pub fn evaluate(&mut self, source: &str, env: &RcCell<Environment>) -> Object {
		match Parser::new(Lexer::new(source)).parse_program() {
			Ok(program) => self.eval_program(&program, env),
			Err(errors) => {
				let messages = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>();
				Object::Error(messages.join("; "))
			}
		}
	}

	/// Evaluate a whole program. A `Return` stops execution and unwraps to
	/// its inner value; an `Error` stops execution and propagates as-is.
	pub fn eval_program(&mut self, program: &Program, env: &RcCell<Environment>) -> Object {
		let mut result = Object::None;
		for statement in &program.statements {
			result = self.eval_statement(statement, env);
			match result {
				Object::Return(value) => return *value,
				Object::Error(_) => return result,
				_ => {}
			}
		}
		result
	}

	fn eval_statement(&mut self, statement: &Statement, env: &RcCell<Environment>) -> Object {
		match statement {
			Statement::Let { name, value } => {
				let value = self.eval_expression(value, env);
				if value.is_error() {
					return value;
				}
				env.borrow_mut().set(name.name.clone(), value);
				Object::None
			}
			Statement::Return { value: Some(value) } => {
				let value = self.eval_expression(value, env);
				if value.is_error() {
					return value;
				}
				Object::Return(Box::new(value))
			}
			Statement::Return { value: None } => Object::Return(Box::new(Object::None)),
			Statement::Expression(expression) => self.eval_expression(expression, env),
		}
	}

	/// Evaluate a block. Unlike a program, a `Return` is NOT unwrapped
	/// here: it must travel intact to the nearest call boundary, so a
	/// return nested inside an inner if still escapes the whole function.
	fn eval_block(&mut self, block: &BlockStatement, env: &RcCell<Environment>) -> Object {
		let mut result = Object::None;
		for statement in &block.statements {
			result = self.eval_statement(statement, env);
			if matches!(result, Object::Return(_) | Object::Error(_)) {
				return result;
			}
		}
		result
	}

	fn eval_expression(&mut self, expression: &Expression, env: &RcCell<Environment>) -> Object {
		match expression {
			Expression::Identifier(identifier) => eval_identifier(identifier, env),
			Expression::Integer(value) => Object::Integer(*value),
			Expression::Float(value) => Object::Float(*value),
			Expression::Boolean(value) => Object::Boolean(*value),
			Expression::Str(value) => Object::Str(value.clone()),
			Expression::Prefix { operator, right } => {
				let right = self.eval_expression(right, env);
				if right.is_error() {
					return right;
				}
				eval_prefix(*operator, right)
			}
			Expression::Infix { left, operator, right } => {
				let left = self.eval_expression(left, env);
				if left.is_error() {
					return left;
				}
				let right = self.eval_expression(right, env);
				if right.is_error() {
					return right;
				}
				eval_infix(left, *operator, right)
			}
			Expression::If { condition, consequence, alternative } => {
				let condition = self.eval_expression(condition, env);
				if condition.is_error() {
					return condition;
				}
				if condition.is_truthy() {
					self.eval_block(consequence, env)
				} else if let Some(alternative) = alternative {
					self.eval_block(alternative, env)
				} else {
					Object::Null
				}
			}
			Expression::Function { parameters, body } => Object::Function(FunctionValue {
				parameters: parameters.clone(),
				body: body.clone(),
				env: env.clone(),
			}),
			Expression::Call { callee, arguments } => {
				let callee = self.eval_expression(callee, env);
				if callee.is_error() {
					return callee;
				}
				let arguments = match self.eval_expressions(arguments, env) {
					Ok(arguments) => arguments,
					Err(error) => return error,
				};
				self.apply_function(callee, arguments)
			}
			Expression::Index { left, index } => {
				let left = self.eval_expression(left, env);
				if left.is_error() {
					return left;
				}
				let index = self.eval_expression(index, env);
				if index.is_error() {
					return index;
				}
				eval_index(left, index)
			}
			Expression::Array(elements) => match self.eval_expressions(elements, env) {
				Ok(elements) => Object::Array(RcCell::new(elements)),
				Err(error) => error,
			},
		}
	}

	/// Evaluate left-to-right; the first error aborts the whole list.
	fn eval_expressions(
		&mut self,
		expressions: &[Expression],
		env: &RcCell<Environment>,
	) -> Result<Vec<Object>, Object> {
		let mut values = Vec::with_capacity(expressions.len());
		for expression in expressions {
			let value = self.eval_expression(expression, env);
			if value.is_error() {
				return Err(value);
			}
			values.push(value);
		}
		Ok(values)
	}

	fn apply_function(&mut self, callee: Object, arguments: Vec<Object>) -> Object {
		match callee {
			Object::Function(function) => {
				if arguments.len() != function.parameters.len() {
					return Object::Error(format!(
						"wrong number of arguments: want={}, got={}",
						function.parameters.len(),
						arguments.len()
					));
				}
				let mut scope = Environment::enclosed(function.env.clone());
				for (parameter, argument) in function.parameters.iter().zip(arguments) {
					scope.set(parameter.name.clone(), argument);
				}
				let result = self.eval_block(&function.body, &RcCell::new(scope));
				unwrap_return(result)
			}
			Object::Builtin(builtin) => (builtin.func)(&mut self.io, arguments),
			other => Object::Error(format!("not a function: {}", other.type_name())),
		}
	}
}

/// Environment chain first, builtin table second.
fn eval_identifier(identifier: &Identifier, env: &RcCell<Environment>) -> Object {
	if let Some(value) = env.borrow().get(&identifier.name) {
		return value;
	}
	match builtins::lookup(&identifier.name) {
		Some(builtin) => builtin,
		None => Object::Error(format!("identifier not found: {}", identifier.name)),
	}
}

/// A `Return` escaping a called body stops here and yields its value.
fn unwrap_return(result: Object) -> Object {
	match result {
		Object::Return(value) => *value,
		other => other,
	}
}

fn eval_prefix(operator: TokenKind, right: Object) -> Object {
	match operator {
		TokenKind::Bang => Object::Boolean(!right.is_truthy()),
		TokenKind::Minus => eval_minus(right),
		_ => Object::Error(format!("unknown operator: {operator}{}", right.type_name())),
	}
}

fn eval_minus(right: Object) -> Object {
	match right {
		Object::Integer(value) => Object::Integer(value.wrapping_neg()),
		Object::Float(value) => Object::Float(-value),
		other => Object::Error(format!("unknown operator: -{}", other.type_name())),
	}
}

/// Operator dispatch on the operand pair. Integer pairs stay exact, any
/// integer/float mix promotes to float, strings concatenate and compare,
/// and `==`/`!=` compare variant identity across the singleton values.
/// Everything else is a type mismatch (different tags) or an unknown
/// operator (same tag, no semantics).
fn eval_infix(left: Object, operator: TokenKind, right: Object) -> Object {
	use TokenKind::*;
	match (left, right) {
		(Object::Integer(l), Object::Integer(r)) => eval_integer_infix(l, operator, r),
		(Object::Integer(l), Object::Float(r)) => eval_float_infix(l as f64, operator, r),
		(Object::Float(l), Object::Integer(r)) => eval_float_infix(l, operator, r as f64),
		(Object::Float(l), Object::Float(r)) => eval_float_infix(l, operator, r),
		(Object::Str(l), Object::Str(r)) => eval_string_infix(&l, operator, &r),
		(left, right) => {
			if matches!(operator, EqualEqual | BangEqual) && is_singleton(&left) && is_singleton(&right) {
				let equal = left == right;
				return Object::Boolean(if matches!(operator, EqualEqual) { equal } else { !equal });
			}
			if left.type_name() != right.type_name() {
				Object::Error(format!(
					"type mismatch: {} {operator} {}",
					left.type_name(),
					right.type_name()
				))
			} else {
				Object::Error(format!(
					"unknown operator: {} {operator} {}",
					left.type_name(),
					right.type_name()
				))
			}
		}
	}
}

/// The only values `==` compares across by identity.
fn is_singleton(value: &Object) -> bool {
	matches!(value, Object::Boolean(_) | Object::Null | Object::None)
}

fn eval_integer_infix(left: i64, operator: TokenKind, right: i64) -> Object {
	use TokenKind::*;
	match operator {
		Plus => Object::Integer(left.wrapping_add(right)),
		Minus => Object::Integer(left.wrapping_sub(right)),
		Star => Object::Integer(left.wrapping_mul(right)),
		Slash => {
			if right == 0 {
				Object::Error("division by zero".into())
			} else {
				Object::Integer(left.wrapping_div(right))
			}
		}
		Less => Object::Boolean(left < right),
		Greater => Object::Boolean(left > right),
		LessEqual => Object::Boolean(left <= right),
		GreaterEqual => Object::Boolean(left >= right),
		EqualEqual => Object::Boolean(left == right),
		BangEqual => Object::Boolean(left != right),
		_ => Object::Error(format!("unknown operator: INTEGER {operator} INTEGER")),
	}
}

fn eval_float_infix(left: f64, operator: TokenKind, right: f64) -> Object {
	use TokenKind::*;
	match operator {
		Plus => Object::Float(left + right),
		Minus => Object::Float(left - right),
		Star => Object::Float(left * right),
		Slash => Object::Float(left / right),
		Less => Object::Boolean(left < right),
		Greater => Object::Boolean(left > right),
		LessEqual => Object::Boolean(left <= right),
		GreaterEqual => Object::Boolean(left >= right),
		EqualEqual => Object::Boolean(left == right),
		BangEqual => Object::Boolean(left != right),
		_ => Object::Error(format!("unknown operator: FLOAT {operator} FLOAT")),
	}
}

fn eval_string_infix(left: &str, operator: TokenKind, right: &str) -> Object {
	use TokenKind::*;
	match operator {
		Plus => Object::Str(format!("{left}{right}")),
		EqualEqual => Object::Boolean(left == right),
		BangEqual => Object::Boolean(left != right),
		_ => Object::Error(format!("unknown operator: STRING {operator} STRING")),
	}
}

/// Plain index reads are forgiving: out of bounds on either side yields
/// Null. The `set` builtin is the strict counterpart.
fn eval_index(left: Object, index: Object) -> Object {
	match (&left, &index) {
		(Object::Array(elements), Object::Integer(index)) => {
			let elements = elements.borrow();
			usize::try_from(*index).ok().and_then(|i| elements.get(i).cloned()).unwrap_or(Object::Null)
		}
		(Object::Str(text), Object::Integer(index)) => usize::try_from(*index)
			.ok()
			.and_then(|i| text.chars().nth(i))
			.map(|c| Object::Str(c.to_string()))
			.unwrap_or(Object::Null),
		_ => Object::Error(format!("index operator not supported: {}", left.type_name())),
	}
}
