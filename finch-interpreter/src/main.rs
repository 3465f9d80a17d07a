//!
//! This is the interpreter for the Finch language.
//!
#![warn(missing_docs)]

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
#[cfg(feature = "jemalloc")]
use jemallocator::Jemalloc;

mod shell;

use finch_interpreter::invokable::Return;
use finch_interpreter::universe::Universe;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, Clone, PartialEq, Parser)]
#[clap(about, version)]
struct Options {
    /// File to evaluate (starts an interactive shell if absent).
    #[clap(name = "FILE")]
    file: Option<PathBuf>,

    /// Evaluate the given expression and print its value.
    #[clap(short, long)]
    eval: Option<String>,

    /// Enable verbose output (with timing information and debug logs).
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let opts: Options = Options::parse();

    let default_level = if opts.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut universe = Universe::new();

    if let Some(source) = opts.eval {
        let output = universe.run_source(&source)?;
        return report(output, true);
    }

    match opts.file {
        None => shell::interactive(&mut universe, opts.verbose)?,
        Some(file) => {
            let contents = fs::read_to_string(&file)
                .with_context(|| format!("could not read '{}'", file.display()))?;
            let output = universe
                .run_source(&contents)
                .with_context(|| format!("could not parse '{}'", file.display()))?;
            report(output, false)?;
        }
    }

    Ok(())
}

fn report(output: Return, print_value: bool) -> anyhow::Result<()> {
    match output {
        Return::Local(value) | Return::Early(value) => {
            if print_value {
                println!("{}", value);
            }
            Ok(())
        }
        Return::Exception(exception) => Err(anyhow!("ERROR: {}", exception)),
    }
}
