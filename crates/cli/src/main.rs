//! SDRAM controller simulator CLI.
//!
//! This binary drives the controller and device model from the command line. It performs:
//! 1. **Workload run:** Initialize the system, run a client workload, verify read-back data.
//! 2. **Mode report:** Decode the fixed mode-register word and print the timing profile.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sdramsim_core::common::WordAddr;
use sdramsim_core::common::constants::{
    CAS_LATENCY, INIT_COUNT_MAX, INIT_LOAD_MODE_AT, INIT_PRECHARGE_AT, MODE_REGISTER,
    RAS_TO_CAS_DELAY, SEQUENCER_POSITIONS, STATE_CMD_CONT, STATE_CMD_READ, STATE_CMD_START,
};
use sdramsim_core::config::Config;
use sdramsim_core::device::ModeRegister;
use sdramsim_core::sim::{System, Transaction};
use sdramsim_core::stats::SimStats;

#[derive(Parser, Debug)]
#[command(
    name = "sdram-sim",
    author,
    version,
    about = "Cycle-exact SDR SDRAM controller simulator",
    long_about = "Run client workloads against the SDRAM controller and a datasheet-checked device model.\n\nExamples:\n  sdram-sim run --workload write-read --periods 1000 --stats\n  sdram-sim run --workload saturate --periods 200 --vcd bus.vcd\n  sdram-sim mode"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize the controller and run a workload.
    Run {
        /// Client traffic pattern.
        #[arg(short, long, value_enum, default_value_t = Workload::WriteRead)]
        workload: Workload,

        /// Reference periods to run after initialization.
        #[arg(short, long, default_value_t = 256)]
        periods: u64,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<String>,

        /// Write a VCD waveform here (overrides the configuration).
        #[arg(long)]
        vcd: Option<String>,

        /// Print statistics at the end.
        #[arg(long)]
        stats: bool,

        /// Print statistics as JSON instead of the text report.
        #[arg(long, requires = "stats")]
        json: bool,
    },

    /// Print the mode-register word and the fixed timing profile.
    Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Workload {
    /// No client traffic; every period refreshes.
    Idle,
    /// Alternating write and read-back of scattered addresses.
    WriteRead,
    /// A request in every period; refresh starves.
    Saturate,
    /// Partial-word writes checked through read-back.
    ByteLanes,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            workload,
            periods,
            config,
            vcd,
            stats,
            json,
        } => cmd_run(workload, periods, config, vcd, stats, json),
        Commands::Mode => cmd_mode(),
    }
}

/// Runs a workload and reports the outcome through the exit code.
///
/// Exits with 1 on a configuration error, a protocol violation, or a read-back mismatch.
fn cmd_run(
    workload: Workload,
    periods: u64,
    config_path: Option<String>,
    vcd: Option<String>,
    print_stats: bool,
    json: bool,
) -> ExitCode {
    let loaded = match config_path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if vcd.is_some() {
        config.general.vcd_path = vcd;
    }

    let mut system = match System::new(&config) {
        Ok(system) => system,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(?workload, periods, sync = ?config.controller.sync_policy, "starting");
    let outcome = system
        .initialize()
        .map_err(|e| e.to_string())
        .and_then(|_| run_workload(&mut system, workload, periods));

    let stats = system.finish();
    if print_stats {
        report(&stats, json);
    }

    match outcome {
        Ok(mismatches) if mismatches == 0 => {
            info!(ticks = stats.ticks, "workload complete");
            ExitCode::SUCCESS
        }
        Ok(mismatches) => {
            error!(mismatches, "read-back mismatches");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Drives `periods` reference periods of `workload`.
///
/// # Returns
///
/// The number of read-back mismatches, or the first simulation error as text.
fn run_workload(system: &mut System, workload: Workload, periods: u64) -> Result<u64, String> {
    let mut mismatches = 0;
    let mut check = |addr: WordAddr, expected: u16, got: Option<u16>| {
        if got != Some(expected) {
            error!(%addr, expected, ?got, "read-back mismatch");
            mismatches += 1;
        }
    };

    let mut period = 0;
    while period < periods {
        let addr = scatter(period);
        match workload {
            Workload::Idle => {
                let _ = system.run_period(&Transaction::Idle).map_err(|e| e.to_string())?;
                period += 1;
            }
            Workload::WriteRead | Workload::Saturate => {
                let data = pattern(addr);
                let _ = system
                    .run_period(&Transaction::write(addr, data))
                    .map_err(|e| e.to_string())?;
                let read = system
                    .run_period(&Transaction::Read { addr })
                    .map_err(|e| e.to_string())?;
                check(addr, data, read.data.map(|d| d.value));
                period += 2;
                if workload == Workload::WriteRead {
                    let _ = system.run_period(&Transaction::Idle).map_err(|e| e.to_string())?;
                    period += 1;
                }
            }
            Workload::ByteLanes => {
                let data = pattern(addr);
                let _ = system
                    .run_period(&Transaction::write(addr, data))
                    .map_err(|e| e.to_string())?;
                let _ = system
                    .run_period(&Transaction::Write {
                        addr,
                        data: !data,
                        strobes: 0b10,
                    })
                    .map_err(|e| e.to_string())?;
                let read = system
                    .run_period(&Transaction::Read { addr })
                    .map_err(|e| e.to_string())?;
                check(addr, (!data & 0xFF00) | (data & 0x00FF), read.data.map(|d| d.value));
                period += 3;
            }
        }
    }
    Ok(mismatches)
}

/// Spreads consecutive indices over every bank, row and column.
const fn scatter(i: u64) -> WordAddr {
    WordAddr::new((i.wrapping_mul(0x9E37_79B9) as u32) & WordAddr::MASK)
}

/// Address-derived test word.
const fn pattern(addr: WordAddr) -> u16 {
    (addr.val() ^ (addr.val() >> 16)) as u16 ^ 0xA5C3
}

fn report(stats: &SimStats, json: bool) {
    if json {
        match serde_json::to_string_pretty(stats) {
            Ok(text) => println!("{text}"),
            Err(e) => error!("cannot serialize statistics: {e}"),
        }
    } else {
        stats.print();
    }
}

fn cmd_mode() -> ExitCode {
    let mode = match ModeRegister::decode(MODE_REGISTER) {
        Ok(mode) => mode,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("MODE REGISTER            {MODE_REGISTER:#06x}");
    println!("  burst_length           {}", mode.burst_length);
    println!(
        "  burst_type             {}",
        if mode.interleaved { "interleaved" } else { "sequential" }
    );
    println!("  cas_latency            {}", mode.cas_latency);
    println!(
        "  write_burst            {}",
        if mode.single_write { "single location" } else { "programmed burst" }
    );
    println!("TIMING PROFILE");
    println!("  positions/period       {SEQUENCER_POSITIONS}");
    println!("  command_start          {STATE_CMD_START}");
    println!("  ras_to_cas             {RAS_TO_CAS_DELAY}");
    println!("  read_write_issue       {STATE_CMD_CONT}");
    println!("  cas_latency            {CAS_LATENCY}");
    println!("  data_capture           {STATE_CMD_READ}");
    println!("INITIALIZATION");
    println!("  init_count             {INIT_COUNT_MAX}");
    println!("  precharge_all_at       {INIT_PRECHARGE_AT}");
    println!("  load_mode_at           {INIT_LOAD_MODE_AT}");
    ExitCode::SUCCESS
}
