use palc::Parser;
use tamarin::cli::*;

fn main() {
	let mut session = tamarin::Session::new();

	match Cli::parse().mode {
		Mode::File { path } => {
			if let Err(e) = session.run_file(&path) {
				eprintln!("Failed run file: {e}");
			}
		}
		Mode::Repl => session.run_prompt(),
	}
}
