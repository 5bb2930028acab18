//! The entry-point shell: reads a program path from the command line,
//! loads it through [`ls8::loader`], and runs it to halt or fatal
//! error. Kept separate from the library so the core never depends on
//! `std::env` or process exit codes.

use ls8::Machine;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);

    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: ls8 <program.ls8>");
            return ExitCode::FAILURE;
        }
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: could not read {path}: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut machine = Machine::new();

    if let Err(error) = ls8::loader::load_into(&mut machine, &source) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }

    match machine.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
