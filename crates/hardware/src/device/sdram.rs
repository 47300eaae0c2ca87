//! SDR SDRAM device model.
//!
//! 16-bit wide, 4 banks of 8192 rows x 512 columns (32 MiB), single-word bursts.
//! The model is a passive responder: on every clock edge it samples the command bus, updates
//! its banks and output pipeline, and reports any protocol or timing violation it observes.

use tracing::trace;

use crate::common::ProtocolViolation;
use crate::common::WordAddr;
use crate::common::constants::{AUTO_PRECHARGE, COL_ADDR_MASK, NUM_BANKS, ROW_ADDR_MASK};
use crate::config::DeviceConfig;
use crate::controller::signals::{BusState, Command};
use crate::device::MemoryDevice;
use crate::device::bank::Bank;
use crate::device::mode::ModeRegister;
use crate::device::timing::SpacingTimer;

/// The device: banks, mode register, output pipeline and device-wide timing.
#[derive(Clone, Debug)]
pub struct Sdram {
    banks: Box<[Bank]>,
    mode: Option<ModeRegister>,

    // Data scheduled for the bus; the last slot is what drives DQ after this edge.
    dq_out_pipeline: Vec<Option<u16>>,
    dq_out: Option<u16>,

    t_rfc: SpacingTimer,
    t_mrd: SpacingTimer,

    refreshes: u64,
}

impl Sdram {
    /// Creates a powered-up device with no mode programmed and all banks idle.
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            banks: (0..NUM_BANKS as u8)
                .map(|i| Bank::new(i, config))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
            mode: None,
            dq_out_pipeline: Vec::new(),
            dq_out: None,
            t_rfc: SpacingTimer::new("tRFC", config.t_rfc),
            t_mrd: SpacingTimer::new("tMRD", config.t_mrd),
            refreshes: 0,
        }
    }

    /// Programmed mode register, once Load-Mode has been seen.
    pub const fn mode(&self) -> Option<ModeRegister> {
        self.mode
    }

    /// Number of Auto-Refresh commands accepted.
    pub const fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Row open in `bank`, if any.
    pub fn open_row(&self, bank: u8) -> Option<u16> {
        self.banks.get(bank as usize).and_then(Bank::open_row)
    }

    /// Back-door read of one word.
    pub fn peek(&self, addr: WordAddr) -> u16 {
        self.banks[addr.bank() as usize].peek(addr.row(), addr.column())
    }

    /// Back-door write of one word.
    pub fn poke(&mut self, addr: WordAddr, value: u16) {
        self.banks[addr.bank() as usize].poke(addr.row(), addr.column(), value);
    }

    fn check_spacing(&self) -> Result<(), ProtocolViolation> {
        self.t_rfc.check()?;
        self.t_mrd.check()
    }

    const fn require_mode(&self, command: Command) -> Result<(), ProtocolViolation> {
        match self.mode {
            Some(_) => Ok(()),
            None => Err(ProtocolViolation::ModeNotLoaded { command }),
        }
    }

    fn require_all_idle(&self, command: Command) -> Result<(), ProtocolViolation> {
        self.banks.iter().try_for_each(|b| b.check_idle(command))
    }

    fn execute(&mut self, bus: &BusState) -> Result<Option<u16>, ProtocolViolation> {
        if bus.command != Command::Nop {
            self.check_spacing()?;
        }

        let bank = bus.bank as usize % self.banks.len();
        match bus.command {
            Command::Nop | Command::BurstTerminate => {}
            Command::LoadMode => {
                self.require_all_idle(Command::LoadMode)?;
                let mode = ModeRegister::decode(bus.addr)?;
                self.dq_out_pipeline = vec![None; mode.cas_latency.saturating_sub(1) as usize];
                self.mode = Some(mode);
                self.t_mrd.start();
            }
            Command::Precharge => {
                if bus.addr & AUTO_PRECHARGE != 0 {
                    self.banks.iter_mut().for_each(Bank::precharge);
                } else {
                    self.banks[bank].precharge();
                }
            }
            Command::AutoRefresh => {
                self.require_mode(Command::AutoRefresh)?;
                self.require_all_idle(Command::AutoRefresh)?;
                self.refreshes += 1;
                self.t_rfc.start();
            }
            Command::Activate => {
                self.require_mode(Command::Activate)?;
                self.banks[bank].activate((bus.addr as u32 & ROW_ADDR_MASK) as u16)?;
            }
            Command::Read => {
                self.require_mode(Command::Read)?;
                let col = (bus.addr as u32 & COL_ADDR_MASK) as u16;
                let data = self.banks[bank].read(col)?;
                if bus.addr & AUTO_PRECHARGE != 0 {
                    self.banks[bank].precharge();
                }
                return Ok(Some(data));
            }
            Command::Write => {
                self.require_mode(Command::Write)?;
                let data = bus.dq.ok_or(ProtocolViolation::MissingWriteData { bank: bus.bank })?;
                let col = (bus.addr as u32 & COL_ADDR_MASK) as u16;
                self.banks[bank].write(col, data, bus.dqm)?;
                if bus.addr & AUTO_PRECHARGE != 0 {
                    self.banks[bank].precharge();
                }
            }
        }
        Ok(None)
    }
}

impl MemoryDevice for Sdram {
    fn drive(&self) -> Option<u16> {
        self.dq_out
    }

    fn clk(&mut self, bus: &BusState) -> Result<(), ProtocolViolation> {
        if bus.dq.is_some() && self.dq_out.is_some() {
            return Err(ProtocolViolation::BusConflict);
        }

        for bank in &mut *self.banks {
            bank.clk();
        }
        self.t_rfc.clk();
        self.t_mrd.clk();

        if bus.command != Command::Nop {
            trace!(
                command = bus.command.mnemonic(),
                addr = bus.addr,
                bank = bus.bank,
                "device sampled"
            );
        }
        let next_dq_out = self.execute(bus)?;

        // With CL=1 the pipeline is empty and read data drives the bus right after this edge.
        match self.dq_out_pipeline.len() {
            0 => self.dq_out = next_dq_out,
            n => {
                self.dq_out = self.dq_out_pipeline[n - 1];
                self.dq_out_pipeline.rotate_right(1);
                self.dq_out_pipeline[0] = next_dq_out;
            }
        }
        Ok(())
    }
}
