//! Lexical scopes.
//!
//! Scopes form a chain: each environment holds its own bindings plus a
//! shared handle on the enclosing scope. Lookups walk outward; writes always
//! land in the innermost scope, so an inner `let` shadows an outer binding
//! without touching it. Function calls are the only operation that extends
//! the chain — plain blocks evaluate in the scope they appear in.
//!
//! The chain is shared through [`RcCell`], which is what makes closures
//! work: a function object keeps its defining environment alive and sees
//! every later mutation of it.

use std::collections::HashMap;

use crate::{object::Object, utils::RcCell};

#[derive(Debug, Default)]
pub struct Environment {
	store: HashMap<String, Object>,
	outer: Option<RcCell<Environment>>,
}

impl Environment {
	/// A fresh global scope.
	pub fn new() -> Self { Self::default() }

	/// A scope nested inside `outer`. This is the sole nesting mechanism.
	pub fn enclosed(outer: RcCell<Environment>) -> Self {
		Self { store: HashMap::new(), outer: Some(outer) }
	}

	/// Look a name up here or in any enclosing scope.
	pub fn get(&self, name: &str) -> Option<Object> {
		match self.store.get(name) {
			Some(value) => Some(value.clone()),
			None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
		}
	}

	/// Bind a name in this scope, shadowing any outer binding of the same
	/// name, and hand the stored value back.
	pub fn set(&mut self, name: impl Into<String>, value: Object) -> Object {
		self.store.insert(name.into(), value.clone());
		value
	}
}
