use std::io;
use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Error;

use finch_lexer::{Lexer, Token};

use finch_interpreter::invokable::Return;
use finch_interpreter::universe::Universe;

/// Launches an interactive Read-Eval-Print-Loop within the given universe.
pub fn interactive(universe: &mut Universe, verbose: bool) -> Result<(), Error> {
    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut counter = 0;
    let mut line = String::new();
    loop {
        write!(&mut stdout, "({}) Finch Shell | ", counter)?;
        stdout.flush()?;
        line.clear();
        stdin.read_line(&mut line)?;
        if line.is_empty() {
            writeln!(&mut stdout, "exit")?;
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        let start = Instant::now();
        let tokens: Vec<Token> = Lexer::new(line).collect();
        let elapsed = start.elapsed();
        if verbose {
            writeln!(
                &mut stdout,
                "Lexing time: {} ms ({} µs)",
                elapsed.as_millis(),
                elapsed.as_micros(),
            )?;
        }

        let start = Instant::now();
        let program = match finch_parser::parse_program(tokens.as_slice()) {
            Ok(program) => program,
            Err(err) => {
                writeln!(&mut stdout, "ERROR: {}", err)?;
                continue;
            }
        };
        let elapsed = start.elapsed();
        if verbose {
            writeln!(
                &mut stdout,
                "Parsing time: {} ms ({} µs)",
                elapsed.as_millis(),
                elapsed.as_micros(),
            )?;
        }

        let start = Instant::now();
        let output = universe.run(&program);
        let elapsed = start.elapsed();
        if verbose {
            writeln!(
                &mut stdout,
                "Execution time: {} ms ({} µs)",
                elapsed.as_millis(),
                elapsed.as_micros(),
            )?;
            writeln!(&mut stdout)?;
        }

        match output {
            Return::Local(value) | Return::Early(value) => {
                writeln!(&mut stdout, "returned: {} ({:?})", value, value)?;
                universe.define_global("it", value);
            }
            Return::Exception(exception) => writeln!(&mut stdout, "ERROR: {}", exception)?,
        }
        counter += 1;
    }

    Ok(())
}
