use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip8_vm::emulator::driver::Driver;
use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::instruction::Instruction;
use chip8_vm::emulator::memory::PROGRAM_START;
use chip8_vm::emulator::output::DummyOutput;
use chip8_vm::emulator::random::{Entropy, RandomSource};
use chip8_vm::emulator::Emulator;

/// Run a CHIP-8 program without any input, then print the screen.
#[derive(StructOpt, Debug)]
#[structopt(name = "no_frontend")]
struct Opt {
    /// Number of cycles to run
    #[structopt(short, long, default_value = "1000")]
    cycles: usize,

    /// Seed for the random number generator, for reproducible runs
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Print the decoded program instead of running it
    #[structopt(long)]
    disassemble: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
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

    if opt.disassemble {
        let program = std::fs::read(&opt.program).map_err(chip8_vm::emulator::Error::from)?;
        disassemble(&program);
        return Ok(());
    }

    match opt.seed {
        Some(seed) => run(Emulator::with_random(Entropy::seeded(seed)), &opt),
        None => run(Emulator::new(), &opt),
    }
}

fn run<R: RandomSource>(mut emulator: Emulator<R>, opt: &Opt) -> Result<(), Box<dyn Error>> {
    emulator.load_file(&opt.program)?;
    let cycles = opt.cycles;

    let mut driver = Driver::new(emulator, DummyInput, DummyOutput::new(), Duration::from_millis(0));
    let result = driver.run_cycles(cycles);

    // Show where we got to even if the program failed
    print!("{}", driver.emulator.screen());
    println!(
        "PC={:#05x} I={:#05x} V={:02x?}",
        driver.emulator.program_counter(),
        driver.emulator.index(),
        driver.emulator.registers()
    );

    let ran = result?;
    log::info!("Ran {} cycles, {} screen refreshes", ran, driver.output.refreshes);
    Ok(())
}

fn disassemble(program: &[u8]) {
    for (n, chunk) in program.chunks(2).enumerate() {
        let address = PROGRAM_START as usize + 2 * n;
        match *chunk {
            [left, right] => {
                let instruction = Instruction::from_two_u8(left, right);
                println!("{:#05x}  {:02X}{:02X}  {}", address, left, right, instruction);
            }
            [byte] => println!("{:#05x}  {:02X}    (data)", address, byte),
            _ => unreachable!("chunks(2) yields one or two bytes"),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}
