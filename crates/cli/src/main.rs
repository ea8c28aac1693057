//! LC-2K pipeline simulator CLI.
//!
//! This binary is the command-line front end of the simulator. It performs:
//! 1. **Run:** Load a machine-code file, echo it, print the machine state
//!    before every cycle, and print the halt trailer with the final state.
//! 2. **Disassemble:** Print the loader listing of a machine-code file without simulating.
//!
//! Simulation output goes to stdout; logs and fatal errors go to stderr.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pipesim_core::config::{Config, LoadConsumerForwarding};
use pipesim_core::sim::report::{HaltReport, ProgramListing, StateReport};
use pipesim_core::sim::{Checkpoint, Program, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate LC-2K five-stage pipeline simulator",
    long_about = "Simulate an LC-2K machine-code program on a five-stage pipeline with forwarding, load-use stalls and branch squashing.\n\nExamples:\n  pipesim run program.mc\n  pipesim run program.mc --quiet --stats\n  pipesim run program.mc --config legacy.json -vv\n  pipesim disasm program.mc"
)]
struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a machine-code file until it halts.
    Run {
        /// Machine-code file: one decimal word per line.
        file: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print only the halt trailer and final state.
        #[arg(short, long)]
        quiet: bool,

        /// Use the legacy forwarding policy for `lw` consumers (overrides the config file).
        #[arg(long)]
        legacy_forwarding: bool,

        /// Abort after this many cycles (overrides the config file).
        #[arg(long)]
        max_cycles: Option<u32>,

        /// Print pipeline statistics after the run.
        #[arg(long)]
        stats: bool,

        /// Print pipeline statistics as JSON after the run.
        #[arg(long, conflicts_with = "stats")]
        stats_json: bool,
    },

    /// Print the instruction-memory listing of a machine-code file.
    Disasm {
        /// Machine-code file: one decimal word per line.
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            file,
            config,
            quiet,
            legacy_forwarding,
            max_cycles,
            stats,
            stats_json,
        } => cmd_run(&RunArgs {
            file,
            config,
            quiet,
            legacy_forwarding,
            max_cycles,
            stats: StatsFormat::from_flags(stats, stats_json),
        }),
        Commands::Disasm { file } => cmd_disasm(&file),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

struct RunArgs {
    file: PathBuf,
    config: Option<PathBuf>,
    quiet: bool,
    legacy_forwarding: bool,
    max_cycles: Option<u32>,
    stats: Option<StatsFormat>,
}

/// How statistics are printed after a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatsFormat {
    Text,
    Json,
}

impl StatsFormat {
    const fn from_flags(text: bool, json: bool) -> Option<Self> {
        match (text, json) {
            (true, _) => Some(Self::Text),
            (false, true) => Some(Self::Json),
            (false, false) => None,
        }
    }
}

/// Loads, simulates and reports a program.
///
/// On a simulation error the last committed state is dumped to stderr
/// before the error is returned.
fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if args.legacy_forwarding {
        config.pipeline.load_consumer_forwarding = LoadConsumerForwarding::Legacy;
    }
    if args.max_cycles.is_some() {
        config.general.max_cycles = args.max_cycles;
    }
    if args.quiet {
        config.general.print_program = false;
        config.general.print_states = false;
    }
    debug!(?config, "configuration");

    let program = Program::from_file(&args.file)?;
    info!(file = %args.file.display(), words = program.len(), "program loaded");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if config.general.print_program {
        write!(out, "{}", ProgramListing(&program))?;
    }

    let mut sim = Simulator::new(&program, &config);
    let mut write_err = None;
    let run = sim.run_with(|checkpoint| {
        if write_err.is_some() {
            return;
        }
        let written = match checkpoint {
            Checkpoint::BeforeCycle(state) if config.general.print_states => {
                write!(out, "{}", StateReport(state))
            }
            Checkpoint::BeforeCycle(_) => Ok(()),
            Checkpoint::Halted(state) => write!(out, "{}", HaltReport(state)),
        };
        if let Err(e) = written {
            write_err = Some(e);
        }
    });
    if let Some(e) = write_err {
        return Err(e.into());
    }
    if let Err(e) = run {
        out.flush()?;
        eprint!("{}", StateReport(sim.state()));
        return Err(e.into());
    }

    out.flush()?;
    drop(out);

    match args.stats {
        Some(StatsFormat::Text) => sim.stats().print(),
        Some(StatsFormat::Json) => {
            let json = serde_json::to_string_pretty(sim.stats())?;
            println!("{json}");
        }
        None => {}
    }
    Ok(())
}

/// Prints the loader listing of a program.
fn cmd_disasm(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::from_file(file)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", ProgramListing(&program))?;
    out.flush()?;
    Ok(())
}
