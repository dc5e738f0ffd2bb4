use mipsim::config::Config;
use mipsim::error::{Contextualize, Error};
use mipsim::parser;
use mipsim::report::TextReporter;
use mipsim::simulator::{memory::Memory, Simulator, SimulatorError};
use owo_colors::OwoColorize;
use std::io;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MIPSIM_LOG=debug`
const LOG_ENV: &str = "MIPSIM_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let config = match Config::get() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n{}\n", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("An error occurred while running your code:\n{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Error> {
    let parsed = parser::tokenize_file(&config.file)?;

    if config.print_tokens {
        print_tokens(&parsed.code, !config.no_color);
    }

    let mut sim = Simulator::new()
        .with_memory(Memory::with_size(config.memory_words))
        .with_trace(config.debug);
    sim.load(parsed);

    let stdout = io::stdout();
    let mut reporter = TextReporter::new(stdout.lock())
        .with_signals(config.debug)
        .with_color(!config.no_color);

    let start_time = std::time::Instant::now();
    sim.run(&mut reporter)
        .map_err(|e| with_source_context(&sim, e))?;
    info!(
        steps = sim.steps(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "finished"
    );

    Ok(())
}

fn print_tokens(code: &[String], color: bool) {
    let rule = |text: &str| {
        if color {
            text.bright_blue().to_string()
        } else {
            text.to_owned()
        }
    };

    eprintln!("{}", rule("Tokens: ---------------------"));
    for (i, token) in code.iter().enumerate() {
        eprintln!("{:>5} {}", i, token);
    }
    eprintln!("{}", rule("-----------------------------"));
}

/// Points the error at the source line of the token that caused it
fn with_source_context(sim: &Simulator, e: SimulatorError) -> Error {
    let tip = match e {
        SimulatorError::TruncatedInstruction { .. } => {
            Some("every instruction except `nop` takes three operands (`j` takes one)")
        }
        SimulatorError::OutOfRangeAddress { .. } => {
            Some("addresses index words directly, try `--memory-words` for a bigger memory")
        }
        _ => None,
    };

    let ctx = e.position().and_then(|pos| sim.context_of(pos)).cloned();
    let e = match ctx {
        Some(ctx) => e.with_context(ctx),
        None => Error::from(e),
    };

    match tip {
        Some(tip) => e.with_tip(tip),
        None => e,
    }
}
