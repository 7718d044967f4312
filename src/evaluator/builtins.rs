//! Native functions.
//!
//! Builtins live in a static table consulted when an identifier misses the
//! whole environment chain, so `let len = 5;` shadows the builtin without
//! touching it. Each builtin validates its own arguments and reports faults
//! as [`Object::Error`] like any other runtime fault.

use crate::{
	io::Io,
	object::{BuiltinFn, BuiltinValue, Object},
	utils::RcCell,
};

const BUILTINS: &[(&str, BuiltinFn)] = &[
	("len", len),
	("print", print),
	("println", println),
	("input", input),
	("str", to_str),
	("int", to_int),
	("type", type_of),
	("set", set),
	("append", append),
	("split", split),
	("exit", exit),
];

pub(crate) fn lookup(name: &str) -> Option<Object> {
	BUILTINS
		.iter()
		.find(|(builtin, _)| *builtin == name)
		.map(|&(name, func)| Object::Builtin(BuiltinValue { name, func }))
}

fn wrong_arguments(got: usize, want: &str) -> Object {
	Object::Error(format!("wrong number of arguments. got={got}, want={want}"))
}

/// Element count for arrays, character count for strings.
fn len(_io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.len() != 1 {
		return wrong_arguments(arguments.len(), "1");
	}
	match &arguments[0] {
		Object::Array(elements) => Object::Integer(elements.borrow().len() as i64),
		Object::Str(text) => Object::Integer(text.chars().count() as i64),
		other => Object::Error(format!("argument to `len` not supported, got {}", other.type_name())),
	}
}

fn print(io: &mut Io, arguments: Vec<Object>) -> Object {
	io.print(&render(&arguments));
	Object::None
}

fn println(io: &mut Io, arguments: Vec<Object>) -> Object {
	io.print_line(&render(&arguments));
	Object::None
}

/// Arguments joined by single spaces, rendered the way the REPL renders
/// results.
fn render(arguments: &[Object]) -> String {
	arguments.iter().map(|argument| argument.to_string()).collect::<Vec<_>>().join(" ")
}

/// Read one line, with an optional prompt. End of input reads as `""`.
fn input(io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.len() > 1 {
		return wrong_arguments(arguments.len(), "0 or 1");
	}
	if let Some(prompt) = arguments.first() {
		io.print(&prompt.to_string());
	}
	match io.read_line() {
		Some(line) => Object::Str(line),
		None => Object::Str(String::new()),
	}
}

fn to_str(_io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.len() != 1 {
		return wrong_arguments(arguments.len(), "1");
	}
	match &arguments[0] {
		Object::Str(_) => arguments[0].clone(),
		other => Object::Str(other.to_string()),
	}
}

fn to_int(_io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.len() != 1 {
		return wrong_arguments(arguments.len(), "1");
	}
	match &arguments[0] {
		Object::Integer(_) => arguments[0].clone(),
		Object::Str(text) => match text.parse() {
			Ok(value) => Object::Integer(value),
			Err(_) => Object::Error("could not convert type STRING to INTEGER".into()),
		},
		Object::Boolean(value) => Object::Integer(i64::from(*value)),
		other => Object::Error(format!("argument to `int` not supported, got {}", other.type_name())),
	}
}

fn type_of(_io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.len() != 1 {
		return wrong_arguments(arguments.len(), "1");
	}
	Object::Str(arguments[0].type_name().into())
}

/// In-place element write. Unlike a plain index read this one is strict
/// about bounds, since silently dropping a write would hide bugs.
fn set(_io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.len() != 3 {
		return wrong_arguments(arguments.len(), "3");
	}
	match &arguments[0] {
		Object::Array(elements) => {
			let index = match &arguments[1] {
				Object::Integer(index) => *index,
				other => {
					return Object::Error(format!(
						"invalid index type. got={}, want=INTEGER",
						other.type_name()
					));
				}
			};
			let mut elements = elements.borrow_mut();
			match usize::try_from(index).ok().filter(|&i| i < elements.len()) {
				Some(i) => {
					elements[i] = arguments[2].clone();
					Object::None
				}
				None => Object::Error(format!("index {index} out of range")),
			}
		}
		other => Object::Error(format!("invalid array type. got={}, want=ARRAY", other.type_name())),
	}
}

fn append(_io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.len() != 2 {
		return wrong_arguments(arguments.len(), "2");
	}
	match &arguments[0] {
		Object::Array(elements) => {
			elements.borrow_mut().push(arguments[1].clone());
			Object::None
		}
		other => Object::Error(format!("invalid array type. got={}, want=ARRAY", other.type_name())),
	}
}

/// Split a string into an array of strings. The separator defaults to a
/// single space; an empty separator splits between every character.
fn split(_io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.is_empty() || arguments.len() > 2 {
		return wrong_arguments(arguments.len(), "1 or 2");
	}
	let text = match &arguments[0] {
		Object::Str(text) => text,
		other => {
			return Object::Error(format!("invalid string type. got={}, want=STRING", other.type_name()));
		}
	};
	let separator = match arguments.get(1) {
		Some(Object::Str(separator)) => separator.clone(),
		Some(other) => {
			return Object::Error(format!(
				"invalid separator type. got={}, want=STRING",
				other.type_name()
			));
		}
		None => " ".into(),
	};
	let parts = if separator.is_empty() {
		text.chars().map(|c| Object::Str(c.to_string())).collect()
	} else {
		text.split(separator.as_str()).map(|part| Object::Str(part.into())).collect()
	};
	Object::Array(RcCell::new(parts))
}

fn exit(_io: &mut Io, arguments: Vec<Object>) -> Object {
	if arguments.len() > 1 {
		return wrong_arguments(arguments.len(), "1 (optional)");
	}
	match arguments.first() {
		None => std::process::exit(0),
		Some(Object::Integer(code)) => std::process::exit(*code as i32),
		Some(other) => Object::Error(format!("argument to `exit` not supported, got {}", other.type_name())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{environment::Environment, evaluator::Evaluator};

	fn eval(input: &str) -> Object {
		let env = RcCell::new(Environment::new());
		Evaluator::new().evaluate(input, &env)
	}

	fn error(message: &str) -> Object { Object::Error(message.into()) }

	fn strings(parts: &[&str]) -> Object {
		Object::Array(RcCell::new(parts.iter().map(|p| Object::Str((*p).into())).collect()))
	}

	#[test]
	fn builtin_len() {
		assert_eq!(eval("len([1, 2, 3])"), Object::Integer(3));
		assert_eq!(eval("len([])"), Object::Integer(0));
		assert_eq!(eval("len(\"hello\")"), Object::Integer(5));
		assert_eq!(eval("len(\"héllo\")"), Object::Integer(5));
		assert_eq!(eval("len(\"\")"), Object::Integer(0));
		assert_eq!(eval("len(1)"), error("argument to `len` not supported, got INTEGER"));
		assert_eq!(eval("len(\"a\", \"b\")"), error("wrong number of arguments. got=2, want=1"));
	}

	#[test]
	fn builtin_type() {
		let cases = [
			("type(1)", "INTEGER"),
			("type(1.5)", "FLOAT"),
			("type(\"x\")", "STRING"),
			("type(true)", "BOOLEAN"),
			("type([])", "ARRAY"),
			("type(fn() {})", "FUNCTION"),
			("type(len)", "BUILTIN"),
			("type(if (false) { 1 })", "NULL"),
			("type(append([], 1))", "NONE"),
		];
		for (input, expected) in cases {
			assert_eq!(eval(input), Object::Str(expected.into()), "input: {input}");
		}
	}

	#[test]
	fn builtin_str() {
		assert_eq!(eval("str(\"s\")"), Object::Str("s".into()));
		assert_eq!(eval("str(5)"), Object::Str("5".into()));
		assert_eq!(eval("str(2.0)"), Object::Str("2.0".into()));
		assert_eq!(eval("str(true)"), Object::Str("true".into()));
		assert_eq!(eval("str([1, \"a\"])"), Object::Str("[1, \"a\"]".into()));
		assert_eq!(eval("str(if (false) { 1 })"), Object::Str("null".into()));
	}

	#[test]
	fn builtin_int() {
		assert_eq!(eval("int(5)"), Object::Integer(5));
		assert_eq!(eval("int(\"42\")"), Object::Integer(42));
		assert_eq!(eval("int(\"-7\")"), Object::Integer(-7));
		assert_eq!(eval("int(true)"), Object::Integer(1));
		assert_eq!(eval("int(false)"), Object::Integer(0));
		assert_eq!(eval("int(\"abc\")"), error("could not convert type STRING to INTEGER"));
		assert_eq!(eval("int(2.5)"), error("argument to `int` not supported, got FLOAT"));
		assert_eq!(eval("int([])"), error("argument to `int` not supported, got ARRAY"));
	}

	#[test]
	fn builtin_set() {
		assert_eq!(eval("let a = [1, 2, 3]; set(a, 0, 9); a[0];"), Object::Integer(9));
		assert_eq!(eval("let a = [1, 2, 3]; set(a, 2, \"x\"); a[2];"), Object::Str("x".into()));
		assert_eq!(eval("let a = [1, 2, 3]; set(a, 1, 0);"), Object::None);
		assert_eq!(eval("set([1], 1, 0)"), error("index 1 out of range"));
		assert_eq!(eval("set([1], -1, 0)"), error("index -1 out of range"));
		assert_eq!(eval("set(5, 0, 0)"), error("invalid array type. got=INTEGER, want=ARRAY"));
		assert_eq!(eval("set([1], \"0\", 0)"), error("invalid index type. got=STRING, want=INTEGER"));
		assert_eq!(eval("set([1], 0)"), error("wrong number of arguments. got=2, want=3"));
	}

	#[test]
	fn builtin_append() {
		assert_eq!(eval("let a = []; append(a, 1); append(a, 2); len(a);"), Object::Integer(2));
		assert_eq!(eval("let a = [1]; append(a, 2); a[1];"), Object::Integer(2));
		assert_eq!(eval("append(1, 2)"), error("invalid array type. got=INTEGER, want=ARRAY"));
		assert_eq!(eval("append([1])"), error("wrong number of arguments. got=1, want=2"));
	}

	#[test]
	fn builtin_append_self_reference_still_renders() {
		assert_eq!(eval("let a = [1]; append(a, a); str(a);"), Object::Str("[1, [...]]".into()));
	}

	#[test]
	fn builtin_mutation_is_visible_through_aliases() {
		assert_eq!(eval("let a = [1, 2]; let b = a; append(a, 3); len(b);"), Object::Integer(3));
		assert_eq!(eval("let a = [1, 2]; let b = a; set(b, 0, 9); a[0];"), Object::Integer(9));
	}

	#[test]
	fn builtin_split() {
		assert_eq!(eval("split(\"a b c\")"), strings(&["a", "b", "c"]));
		assert_eq!(eval("split(\"a,b\", \",\")"), strings(&["a", "b"]));
		assert_eq!(eval("split(\"abc\", \"\")"), strings(&["a", "b", "c"]));
		assert_eq!(eval("split(\"a\")"), strings(&["a"]));
		assert_eq!(eval("split(1)"), error("invalid string type. got=INTEGER, want=STRING"));
		assert_eq!(eval("split(\"a\", 1)"), error("invalid separator type. got=INTEGER, want=STRING"));
	}

	#[test]
	fn builtin_exit_rejects_bad_arguments() {
		assert_eq!(eval("exit(\"now\")"), error("argument to `exit` not supported, got STRING"));
		assert_eq!(eval("exit(1, 2)"), error("wrong number of arguments. got=2, want=1 (optional)"));
	}

	#[test]
	fn builtins_are_shadowable() {
		assert_eq!(eval("let len = 5; len;"), Object::Integer(5));
		assert_eq!(eval("let f = fn(len) { len + 1 }; f(2);"), Object::Integer(3));
	}
}
