//! `triad` - run a triad program from standard input
//!
//! The stream starts with the program (optional `#` selector, instruction
//! bytes, terminator); everything after the terminator is runtime input.
//! Output bytes go to standard output, diagnostics to standard error.

use anyhow::Context;
use clap::Parser;
use std::io::{BufWriter, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use triad_loader::load_program;
use triad_runtime::{HaltReason, Vm, VmConfig};

#[derive(Debug, Parser)]
#[command(name = "triad", about = "Triad bytecode interpreter", version)]
struct Args {
    /// Stop after this many instructions instead of running to HALT
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Heap capacity in cells
    #[arg(long, default_value_t = 1 << 20)]
    heap_limit: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(HaltReason::Halt) => ExitCode::SUCCESS,
        Ok(HaltReason::CycleLimit) => {
            eprintln!("triad: cycle limit reached before HALT");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("triad: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<HaltReason> {
    let mut stdin = std::io::stdin().lock();
    let stdout = BufWriter::new(std::io::stdout().lock());

    let (program, _mode) = load_program(&mut stdin).context("loading program")?;

    let config = VmConfig {
        max_cycles: args.max_cycles,
        heap_limit_cells: args.heap_limit,
    };
    let mut vm = Vm::new(program, stdin, stdout, config);
    let summary = vm.run().context("executing program")?;
    debug!(cycles = summary.cycles, reason = ?summary.reason, "run finished");

    // BufWriter flushes on drop, but surface any error instead of
    // swallowing it there.
    vm.into_output().flush().context("flushing output")?;

    Ok(summary.reason)
}
