#[cfg(test)]
mod tests {
	use std::{io::Cursor, path::PathBuf};

	use tamarin::{Environment, Io, Object, RcCell, Session};

	fn eval(input: &str) -> Object {
		let env = RcCell::new(Environment::new());
		tamarin::evaluate_source(input, &env)
	}

	fn captured_session(stdin: &str) -> (Session, RcCell<Vec<u8>>) {
		let output = RcCell::new(Vec::new());
		let io = Io::new(Box::new(Cursor::new(stdin.to_string())), Box::new(output.clone()));
		(Session::with_io(io), output)
	}

	fn printed(output: &RcCell<Vec<u8>>) -> String { String::from_utf8(output.borrow().clone()).unwrap() }

	#[test]
	fn test_tamarin_file() {
		let (mut session, output) = captured_session("");
		let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("test.tam");
		let result = session.run_file(&path);
		assert!(result.is_ok());
		assert_eq!(printed(&output), "[2, 4, 6, 8]\nhello tamarin\n55\n4\nfox\n3.5\n42\n");
	}

	#[test]
	fn test_repl_session_keeps_state() {
		let stdin = "let x = 5;\nlet addFive = fn(y) { x + y };\naddFive(37);\n";
		let (mut session, output) = captured_session(stdin);
		session.run_prompt();
		let printed = printed(&output);
		assert!(printed.contains(">> 42\n"), "output: {printed}");
		assert!(printed.ends_with("Exited tamarin repl\n"), "output: {printed}");
	}

	#[test]
	fn test_closures_and_builtins_end_to_end() {
		assert_eq!(eval("let newAdder = fn(x) { fn(y) { x + y } }; newAdder(2)(3);"), Object::Integer(5));
		assert_eq!(eval("len(split(\"a b c\"))"), Object::Integer(3));
		assert_eq!(eval("let a = [1]; append(a, 2); set(a, 0, 9); a[0] + a[1];"), Object::Integer(11));
	}

	#[test]
	fn test_runtime_faults_are_values() {
		assert_eq!(eval("5 + true;"), Object::Error("type mismatch: INTEGER + BOOLEAN".into()));
		assert_eq!(eval("missing;"), Object::Error("identifier not found: missing".into()));
	}

	#[test]
	fn test_parse_failures_surface_every_diagnostic() {
		match eval("let x 5;\nlet y = @;") {
			Object::Error(message) => {
				assert!(message.contains("line 1"), "message: {message}");
				assert!(message.contains("line 2"), "message: {message}");
			}
			other => panic!("expected an error, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_diagnostics_in_order() {
		let errors = tamarin::parse_errors("let x 5;\nlet y = @;");
		assert_eq!(errors.len(), 2, "errors: {errors:?}");
		assert!(errors[0].starts_with("line 1:"), "errors: {errors:?}");
		assert!(errors[1].starts_with("line 2:"), "errors: {errors:?}");
		assert!(tamarin::parse_errors("let x = 5;").is_empty());
	}
}
