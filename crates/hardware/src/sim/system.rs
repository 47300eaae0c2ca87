//! Controller and device wired to one bus.
//!
//! `System` owns both sides of the SDRAM bus and clocks them on the same edge. Each tick it
//! samples what both sides drive before the edge, checks the data bus for contention, then
//! advances the controller and lets the device sample the controller's registered outputs.

use std::fmt;
use std::fs;
use std::io;

use serde::Serialize;
use tracing::{debug, info};

use crate::common::constants::{STATE_CMD_START, STATE_FIRST};
use crate::common::{ProtocolViolation, SimError, SimResult};
use crate::config::Config;
use crate::controller::SdramController;
use crate::controller::signals::{BusState, ClientInputs, ClientOutputs, Command};
use crate::device::{MemoryDevice, Sdram};
use crate::sim::client::{ReferenceClock, Transaction};
use crate::sim::monitor::RefreshMonitor;
use crate::sim::trace::{TraceSample, VcdTrace};
use crate::stats::SimStats;

/// What happened on one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Tick number, starting at zero.
    pub tick: u64,
    /// Sequencer position before the edge.
    pub position: u8,
    /// Bus lines the device sampled on this edge.
    pub bus: BusState,
    /// Data bus value seen by both sides before the edge.
    pub dq: Option<u16>,
    /// Client outputs after the edge.
    pub outputs: ClientOutputs,
}

/// A command the device sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IssuedCommand {
    /// Tick on which the device sampled it.
    pub tick: u64,
    /// The command.
    pub command: Command,
    /// Bank lines.
    pub bank: u8,
    /// Address lines.
    pub addr: u16,
}

impl IssuedCommand {
    fn sampled(tick: u64, bus: &BusState) -> Self {
        Self {
            tick,
            command: bus.command,
            bank: bus.bank,
            addr: bus.addr,
        }
    }
}

/// A word loaded into the client's data-out register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReadData {
    /// Tick on which `data_valid` was asserted.
    pub tick: u64,
    /// Captured value.
    pub value: u16,
}

/// Outcome of one reference period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PeriodReport {
    /// Request the client held.
    pub transaction: Transaction,
    /// First tick of the period.
    pub start_tick: u64,
    /// Ticks the period lasted.
    pub ticks: u64,
    /// Every non-No-Op command in sampling order.
    pub commands: Vec<IssuedCommand>,
    /// Captured read data, if any.
    pub data: Option<ReadData>,
}

impl PeriodReport {
    /// Commands only, without ticks or address lines.
    pub fn command_kinds(&self) -> Vec<Command> {
        self.commands.iter().map(|c| c.command).collect()
    }

    /// Tick offset of `command` from the start of the period.
    pub fn offset_of(&self, command: Command) -> Option<u64> {
        self.commands
            .iter()
            .find(|c| c.command == command)
            .map(|c| c.tick - self.start_tick)
    }
}

/// Controller, device and observers sharing one bus.
pub struct System<D: MemoryDevice = Sdram> {
    controller: SdramController,
    device: D,
    clock: ReferenceClock,
    monitor: RefreshMonitor,
    stats: SimStats,
    trace: Option<VcdTrace<io::BufWriter<fs::File>>>,
    trace_commands: bool,
    tick: u64,
}

impl System<Sdram> {
    /// Builds a system around the bundled SDRAM model.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the VCD file cannot be created.
    pub fn new(config: &Config) -> SimResult<Self> {
        Self::with_device(config, Sdram::new(&config.device))
    }
}

impl<D: MemoryDevice> System<D> {
    /// Builds a system around an arbitrary bus responder.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the VCD file cannot be created.
    pub fn with_device(config: &Config, device: D) -> SimResult<Self> {
        config.validate()?;
        let trace = match &config.general.vcd_path {
            Some(path) => {
                info!(path = %path, "writing VCD trace");
                Some(VcdTrace::create(path)?)
            }
            None => None,
        };
        Ok(Self {
            controller: SdramController::new(&config.controller),
            device,
            clock: ReferenceClock::new(&config.controller),
            monitor: RefreshMonitor::new(config.device.max_refresh_gap),
            stats: SimStats::default(),
            trace,
            trace_commands: config.general.trace_commands,
            tick: 0,
        })
    }

    /// Advances both sides of the bus by one edge.
    ///
    /// `inputs.sync` is passed through unchanged; use [`tick_synced`](Self::tick_synced) to have
    /// the reference clock drive it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Protocol`] if both sides drive the data bus or the device rejects the
    /// bus state, and [`SimError::Trace`] if the VCD write fails.
    pub fn tick(&mut self, inputs: &ClientInputs) -> SimResult<TickReport> {
        let tick = self.tick;
        let bus = *self.controller.bus();
        let position = self.controller.position();
        let init_count = self.controller.init_counter();
        let ready = self.controller.is_ready();

        let device_dq = self.device.drive();
        if bus.dq.is_some() && device_dq.is_some() {
            return Err(SimError::Protocol {
                tick,
                violation: ProtocolViolation::BusConflict,
            });
        }
        let dq = bus.dq.or(device_dq);

        let outputs = self.controller.tick(inputs, dq);
        self.device
            .clk(&bus)
            .map_err(|violation| SimError::Protocol { tick, violation })?;

        self.observe(tick, position, ready, &bus, dq, outputs);
        if let Some(trace) = self.trace.as_mut() {
            trace.record(&TraceSample {
                bus: &bus,
                dq,
                position,
                init_count,
                data_out: outputs.data_out,
            })?;
        }

        self.tick += 1;
        Ok(TickReport {
            tick,
            position,
            bus,
            dq,
            outputs,
        })
    }

    fn observe(
        &mut self,
        tick: u64,
        position: u8,
        ready: bool,
        bus: &BusState,
        dq: Option<u16>,
        outputs: ClientOutputs,
    ) {
        self.stats.ticks += 1;
        self.stats.record_command(bus.command);
        if bus.command == Command::AutoRefresh {
            self.monitor.record(tick);
        }
        if bus.command != Command::Nop && self.trace_commands {
            info!(
                tick,
                command = bus.command.mnemonic(),
                bank = bus.bank,
                addr = format_args!("{:#06x}", bus.addr),
                "bus"
            );
        }

        if position == STATE_CMD_START && ready {
            self.stats.record_service(self.controller.pending());
        }
        if outputs.data_valid && dq.is_none() {
            self.stats.floating_captures += 1;
        }
        if position != STATE_FIRST && self.controller.position() == STATE_FIRST {
            self.stats.periods += 1;
            debug!(tick, periods = self.stats.periods, "period boundary");
        }
    }

    /// Like [`tick`](Self::tick), with `sync` taken from the reference clock.
    ///
    /// # Errors
    ///
    /// As [`tick`](Self::tick).
    pub fn tick_synced(&mut self, inputs: &ClientInputs) -> SimResult<TickReport> {
        let inputs = inputs.with_sync(self.clock.sync(self.tick));
        self.tick(&inputs)
    }

    /// Runs until the next period boundary with the client holding `transaction`.
    ///
    /// # Errors
    ///
    /// As [`tick`](Self::tick).
    pub fn run_period(&mut self, transaction: &Transaction) -> SimResult<PeriodReport> {
        self.run_period_with(transaction, false)
    }

    fn run_period_with(
        &mut self,
        transaction: &Transaction,
        init: bool,
    ) -> SimResult<PeriodReport> {
        let inputs = transaction.inputs().with_init(init);
        let mut report = PeriodReport {
            transaction: *transaction,
            start_tick: self.tick,
            ticks: 0,
            commands: Vec::new(),
            data: None,
        };

        loop {
            let step = self.tick_synced(&inputs)?;
            report.ticks += 1;
            if step.bus.command != Command::Nop {
                report
                    .commands
                    .push(IssuedCommand::sampled(step.tick, &step.bus));
            }
            if step.outputs.data_valid {
                report.data = Some(ReadData {
                    tick: step.tick,
                    value: step.outputs.data_out,
                });
            }
            if step.position != STATE_FIRST && self.controller.position() == STATE_FIRST {
                return Ok(report);
            }
        }
    }

    /// Requests initialization for one period, then idles until the controller is ready.
    ///
    /// # Returns
    ///
    /// Every non-No-Op command sampled while initializing.
    ///
    /// # Errors
    ///
    /// As [`tick`](Self::tick).
    pub fn initialize(&mut self) -> SimResult<Vec<IssuedCommand>> {
        let mut commands = self.run_period_with(&Transaction::Idle, true)?.commands;
        while !self.controller.is_ready() {
            commands.extend(self.run_period(&Transaction::Idle)?.commands);
        }
        info!(tick = self.tick, "controller initialized");
        Ok(commands)
    }

    /// Statistics so far, with the refresh metrics folded in.
    pub fn stats(&self) -> SimStats {
        let mut stats = self.stats.clone();
        stats.absorb_monitor(&self.monitor);
        stats
    }

    /// Ends the run: closes the open refresh interval and the VCD file.
    pub fn finish(mut self) -> SimStats {
        self.monitor.finish(self.tick);
        drop(self.trace.take());
        self.stats()
    }

    /// The controller.
    pub const fn controller(&self) -> &SdramController {
        &self.controller
    }

    /// The bus responder.
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Mutable access to the bus responder, for back-door setup.
    pub const fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Refresh interval measurements.
    pub const fn monitor(&self) -> &RefreshMonitor {
        &self.monitor
    }

    /// Ticks elapsed.
    pub const fn now(&self) -> u64 {
        self.tick
    }
}

impl<D: MemoryDevice + fmt::Debug> fmt::Debug for System<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("tick", &self.tick)
            .field("controller", &self.controller)
            .field("device", &self.device)
            .field("tracing_vcd", &self.trace.is_some())
            .finish_non_exhaustive()
    }
}
