//! Runtime values.
//!
//! Everything a tamarin program can produce is one [`Object`] variant,
//! including the two control-flow sentinels: [`Object::Return`] carries a
//! value out of a block toward the nearest call boundary, and
//! [`Object::Error`] carries a runtime fault through the ordinary value
//! channel. Neither is a Rust error; the evaluator checks for them at each
//! propagation point instead of unwinding.
//!
//! Scalars behave as values. Arrays and the captured environment of a
//! function are intentionally aliased: cloning an `Object` clones handles,
//! so a mutation through one handle is visible through all of them.

use std::{fmt::Display, rc::Rc};

use crate::{ast::{BlockStatement, Identifier}, environment::Environment, io::Io, utils::RcCell};

/// Signature shared by every builtin function.
pub type BuiltinFn = fn(&mut Io, Vec<Object>) -> Object;

#[derive(Debug, Clone)]
pub enum Object {
	Integer(i64),
	Float(f64),
	Boolean(bool),
	Str(String),
	Array(RcCell<Vec<Object>>),
	Function(FunctionValue),
	Builtin(BuiltinValue),
	/// The in-language absent value: unmatched `if`, out-of-bounds reads.
	Null,
	/// The void result of statements like `let` and builtins like `print`.
	/// Falsy like `Null`, but rendered as nothing and suppressed by the REPL.
	None,
	Return(Box<Object>),
	Error(String),
}

impl Object {
	/// The type tag surfaced to programs by the `type` builtin.
	pub fn type_name(&self) -> &'static str {
		match self {
			Object::Integer(_) => "INTEGER",
			Object::Float(_) => "FLOAT",
			Object::Boolean(_) => "BOOLEAN",
			Object::Str(_) => "STRING",
			Object::Array(_) => "ARRAY",
			Object::Function(_) => "FUNCTION",
			Object::Builtin(_) => "BUILTIN",
			Object::Null => "NULL",
			Object::None => "NONE",
			Object::Return(_) => "RETURN_VALUE",
			Object::Error(_) => "ERROR",
		}
	}

	/// Everything is truthy except `false`, `Null` and `None`. Zero, the
	/// empty string and the empty array all count as true.
	pub fn is_truthy(&self) -> bool { !matches!(self, Object::Boolean(false) | Object::Null | Object::None) }

	pub fn is_error(&self) -> bool { matches!(self, Object::Error(_)) }

	/// Rendering used inside array listings, where strings keep their quotes.
	fn display_quoted(&self, open: &mut Vec<RcCell<Vec<Object>>>) -> String {
		match self {
			Object::Str(value) => format!("\"{value}\""),
			Object::Array(elements) => render_array(elements, open),
			other => other.to_string(),
		}
	}
}

/// Render an array listing. `open` holds the arrays currently being rendered
/// on this path; `append(a, a)` makes an array reachable from itself, and the
/// repeated cell prints as `[...]` instead of recursing.
fn render_array(elements: &RcCell<Vec<Object>>, open: &mut Vec<RcCell<Vec<Object>>>) -> String {
	if open.iter().any(|o| o.ptr_eq(elements)) {
		return "[...]".into();
	}
	open.push(elements.clone());
	let rendered = elements.borrow().iter().map(|e| e.display_quoted(open)).collect::<Vec<_>>();
	open.pop();
	format!("[{}]", rendered.join(", "))
}

impl Display for Object {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Object::Integer(value) => write!(f, "{value}"),
			Object::Float(value) => {
				if value.fract() == 0.0 && value.is_finite() {
					write!(f, "{value:.1}")
				} else {
					write!(f, "{value}")
				}
			}
			Object::Boolean(value) => write!(f, "{value}"),
			Object::Str(value) => write!(f, "{value}"),
			Object::Array(elements) => write!(f, "{}", render_array(elements, &mut Vec::new())),
			Object::Function(function) => write!(f, "{function}"),
			Object::Builtin(_) => write!(f, "builtin function"),
			Object::Null => write!(f, "null"),
			Object::None => Ok(()),
			Object::Return(value) => write!(f, "{value}"),
			Object::Error(message) => write!(f, "ERROR: {message}"),
		}
	}
}

/// Equality for the `==` operator and for tests: scalars by value, arrays
/// element-wise (aliases are trivially equal), functions by body identity,
/// builtins by name.
impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Object::Integer(l), Object::Integer(r)) => l == r,
			(Object::Float(l), Object::Float(r)) => l == r,
			(Object::Boolean(l), Object::Boolean(r)) => l == r,
			(Object::Str(l), Object::Str(r)) => l == r,
			(Object::Array(l), Object::Array(r)) => l.ptr_eq(r) || *l.borrow() == *r.borrow(),
			(Object::Function(l), Object::Function(r)) => l.same_body(r),
			(Object::Builtin(l), Object::Builtin(r)) => l.name == r.name,
			(Object::Null, Object::Null) => true,
			(Object::None, Object::None) => true,
			(Object::Return(l), Object::Return(r)) => l == r,
			(Object::Error(l), Object::Error(r)) => l == r,
			_ => false,
		}
	}
}

/// A user function: parameter list, shared body, and the environment that
/// was active at the definition site. The environment handle IS the closure
/// capture; no copy is taken.
#[derive(Clone)]
pub struct FunctionValue {
	pub parameters: Rc<Vec<Identifier>>,
	pub body:       Rc<BlockStatement>,
	pub env:        RcCell<Environment>,
}

impl FunctionValue {
	/// Body identity. Two handles to the same literal's evaluation are equal;
	/// structurally identical but separate functions are not.
	fn same_body(&self, other: &Self) -> bool { Rc::ptr_eq(&self.body, &other.body) }
}

impl Display for FunctionValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let parameters = self.parameters.iter().map(|p| p.to_string()).collect::<Vec<_>>();
		write!(f, "fn({}) {}", parameters.join(", "), self.body)
	}
}

/// Debug skips the captured environment: a closure stored in the scope it
/// captured forms a cycle, and deriving would recurse through it.
impl std::fmt::Debug for FunctionValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FunctionValue")
			.field("parameters", &self.parameters)
			.field("body", &self.body)
			.finish_non_exhaustive()
	}
}

/// A native function exposed to programs by name.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinValue {
	pub name: &'static str,
	pub func: BuiltinFn,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn array(elements: Vec<Object>) -> Object { Object::Array(RcCell::new(elements)) }

	#[test]
	fn type_names() {
		assert_eq!(Object::Integer(1).type_name(), "INTEGER");
		assert_eq!(Object::Float(1.5).type_name(), "FLOAT");
		assert_eq!(Object::Str("x".into()).type_name(), "STRING");
		assert_eq!(Object::Null.type_name(), "NULL");
		assert_eq!(Object::None.type_name(), "NONE");
		assert_eq!(Object::Error("boom".into()).type_name(), "ERROR");
	}

	#[test]
	fn truthiness() {
		assert!(Object::Integer(0).is_truthy());
		assert!(Object::Str(String::new()).is_truthy());
		assert!(array(vec![]).is_truthy());
		assert!(Object::Boolean(true).is_truthy());
		assert!(!Object::Boolean(false).is_truthy());
		assert!(!Object::Null.is_truthy());
		assert!(!Object::None.is_truthy());
	}

	#[test]
	fn rendering() {
		assert_eq!(Object::Integer(42).to_string(), "42");
		assert_eq!(Object::Float(2.0).to_string(), "2.0");
		assert_eq!(Object::Float(2.5).to_string(), "2.5");
		assert_eq!(Object::Boolean(true).to_string(), "true");
		assert_eq!(Object::Null.to_string(), "null");
		assert_eq!(Object::None.to_string(), "");
		assert_eq!(Object::Error("type mismatch".into()).to_string(), "ERROR: type mismatch");
	}

	#[test]
	fn strings_are_bare_alone_and_quoted_in_arrays() {
		assert_eq!(Object::Str("hello".into()).to_string(), "hello");
		let value = array(vec![Object::Str("a".into()), Object::Integer(1)]);
		assert_eq!(value.to_string(), "[\"a\", 1]");
	}

	#[test]
	fn rendering_self_referential_arrays_terminates() {
		let elements = RcCell::new(vec![Object::Integer(1)]);
		let cycle = Object::Array(elements.clone());
		elements.borrow_mut().push(cycle.clone());
		assert_eq!(cycle.to_string(), "[1, [...]]");
		// sharing without a cycle still renders in full
		let shared = array(vec![cycle.clone(), cycle]);
		assert_eq!(shared.to_string(), "[[1, [...]], [1, [...]]]");
	}

	#[test]
	fn array_equality_is_element_wise_and_alias_aware() {
		let a = RcCell::new(vec![Object::Integer(1)]);
		let alias = Object::Array(a.clone());
		assert_eq!(Object::Array(a), alias);
		assert_eq!(array(vec![Object::Integer(1)]), array(vec![Object::Integer(1)]));
		assert_ne!(array(vec![Object::Integer(1)]), array(vec![Object::Integer(2)]));
		assert_ne!(array(vec![]), Object::Null);
	}
}
