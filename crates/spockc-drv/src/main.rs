//! The `spockc` binary: read Spock source, run the pipeline, print the
//! result. On a pipeline error the structured report goes to stderr and
//! the process exits with the diagnostic's numeric exit code.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;

use spockc_drv::{prepare_source, Config, Session};

const USAGE: &str = "usage: spockc [OPTIONS] [FILE]

Reads Spock source from FILE (or stdin), appends the '$$' terminator,
and evaluates it.

Options:
  --emit-tokens   print the scanner's token stream instead of evaluating
  --emit-rpn      print the planner's RPN lines instead of evaluating
  -v, --verbose   enable debug logging
";

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("spockc: {}\n\n{}", message, USAGE);
            return ExitCode::from(2);
        }
    };

    let level = if config.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let _ = simple_logger::SimpleLogger::new().with_level(level).init();

    match run(config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("spockc: error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> anyhow::Result<ExitCode> {
    let raw = match &config.input {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let source = prepare_source(&raw);
    let session = Session::new(config);

    match session.execute(&source) {
        Ok(output) => {
            print!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(diag) => {
            eprint!("{}", diag.report());
            Ok(ExitCode::from(diag.code.number() as u8))
        }
    }
}
