use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip8_vm::emulator::driver::Driver;
use chip8_vm::emulator::random::{Entropy, RandomSource};
use chip8_vm::emulator::Emulator;

mod crossterm_io;
mod key_latch;
use crossterm_io::{CrosstermInput, CrosstermOutput};

/// Run a CHIP-8 program in the terminal.
#[derive(StructOpt, Debug)]
#[structopt(name = "crossterm_frontend")]
struct Opt {
    /// Milliseconds to wait between cycles. Timers count down once per cycle.
    #[structopt(short, long, default_value = "2")]
    delay: u64,

    /// Seed for the random number generator, for reproducible runs
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    ///
    /// Log lines go to stderr, which shares the terminal with the screen.
    /// Redirect it when logging, e.g. `2> chip8.log`.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    program: PathBuf,
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    init_logging(opt.verbose);

    log::info!("Executing {:?}", &opt.program);

    match opt.seed {
        Some(seed) => run(Emulator::with_random(Entropy::seeded(seed)), &opt),
        None => run(Emulator::new(), &opt),
    }
}

fn run<R: RandomSource>(mut emulator: Emulator<R>, opt: &Opt) -> Result<(), Box<dyn Error>> {
    // Load before touching the terminal, so a bad program fails cleanly
    emulator.load_file(&opt.program)?;

    let mut driver = Driver::new(
        emulator,
        CrosstermInput::new(),
        CrosstermOutput::new()?,
        Duration::from_millis(opt.delay),
    );
    driver.run()?;

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_explains_where_logs_go() {
        let mut help = Vec::new();
        Opt::clap().write_long_help(&mut help).unwrap();
        let help = String::from_utf8(help).unwrap();
        assert!(help.contains("stderr"));
    }
}
