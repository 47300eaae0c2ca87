//! Simulation statistics collection and reporting.
//!
//! This module tracks what the controller did on the bus. It provides:
//! 1. **Time:** Ticks and completed reference periods.
//! 2. **Command mix:** Counts of every command driven on the bus.
//! 3. **Service:** Client reads and writes serviced versus idle (refresh) periods.
//! 4. **Refresh:** Interval metrics copied from the refresh monitor.

use std::time::Instant;

use serde::Serialize;

use crate::controller::signals::{Command, PendingRequest};
use crate::sim::monitor::RefreshMonitor;

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"commands"`, `"service"`, `"refresh"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "commands", "service", "refresh"];

/// Statistics for one simulation run.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Controller ticks elapsed.
    pub ticks: u64,
    /// Period boundaries crossed.
    pub periods: u64,

    /// Commands driven on the bus, indexed by opcode.
    pub commands: [u64; 8],

    /// Periods that serviced a client read.
    pub reads: u64,
    /// Periods that serviced a client write.
    pub writes: u64,
    /// Periods with no client request after initialization.
    pub idle_periods: u64,
    /// Read captures that found the data bus released.
    pub floating_captures: u64,

    /// Longest interval between Auto-Refresh commands, in ticks.
    pub longest_refresh_gap: u64,
    /// Intervals that exceeded the configured bound.
    pub refresh_violations: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            ticks: 0,
            periods: 0,
            commands: [0; 8],
            reads: 0,
            writes: 0,
            idle_periods: 0,
            floating_captures: 0,
            longest_refresh_gap: 0,
            refresh_violations: 0,
        }
    }
}

impl SimStats {
    /// Counts one command on the bus; `Nop` included.
    pub fn record_command(&mut self, command: Command) {
        self.commands[command.encode() as usize] += 1;
    }

    /// Number of times `command` was driven.
    pub const fn count(&self, command: Command) -> u64 {
        self.commands[command.encode() as usize]
    }

    /// Classifies a period by the request latched at its command-start.
    pub fn record_service(&mut self, pending: PendingRequest) {
        if pending.write {
            self.writes += 1;
        } else if pending.read {
            self.reads += 1;
        } else {
            self.idle_periods += 1;
        }
    }

    /// Copies the refresh interval metrics.
    pub const fn absorb_monitor(&mut self, monitor: &RefreshMonitor) {
        self.longest_refresh_gap = monitor.longest_gap;
        self.refresh_violations = monitor.violations;
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let ticks = self.ticks.max(1) as f64;

        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.ticks as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("SDRAM CONTROLLER SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_ticks                {}", self.ticks);
            println!("sim_periods              {}", self.periods);
            println!("sim_freq                 {khz:.2} kHz");
            println!("----------------------------------------------------------");
        }
        if want("commands") {
            println!("COMMAND MIX");
            for command in Command::ALL {
                let n = self.count(command);
                println!(
                    "  cmd.{:<18} {} ({:.2}%)",
                    command.mnemonic(),
                    n,
                    (n as f64 / ticks) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("service") {
            let serviced = (self.reads + self.writes + self.idle_periods).max(1) as f64;
            println!("PERIOD SERVICE");
            println!(
                "  period.read            {} ({:.2}%)",
                self.reads,
                (self.reads as f64 / serviced) * 100.0
            );
            println!(
                "  period.write           {} ({:.2}%)",
                self.writes,
                (self.writes as f64 / serviced) * 100.0
            );
            println!(
                "  period.refresh         {} ({:.2}%)",
                self.idle_periods,
                (self.idle_periods as f64 / serviced) * 100.0
            );
            println!("  capture.floating       {}", self.floating_captures);
            println!("----------------------------------------------------------");
        }
        if want("refresh") {
            println!("REFRESH");
            println!("  refresh.count          {}", self.count(Command::AutoRefresh));
            println!("  refresh.longest_gap    {} ticks", self.longest_refresh_gap);
            println!("  refresh.violations     {}", self.refresh_violations);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
