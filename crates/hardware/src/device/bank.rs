//! One SDRAM bank: sparse row storage, the open-row register and per-bank timing.

use std::collections::HashMap;

use crate::common::ProtocolViolation;
use crate::common::constants::{COL_ADDR_MASK, NUM_COLS};
use crate::config::DeviceConfig;
use crate::controller::signals::{ByteMask, Command};
use crate::device::timing::SpacingTimer;

/// Bank state and contents.
///
/// Rows are allocated on first write; a row that was never written reads as zero.
#[derive(Clone, Debug)]
pub struct Bank {
    index: u8,
    rows: HashMap<u16, Box<[u16]>>,
    open_row: Option<u16>,

    t_rcd: SpacingTimer,
    t_rp: SpacingTimer,
    t_rc: SpacingTimer,
}

impl Bank {
    /// Creates an idle, empty bank.
    pub fn new(index: u8, config: &DeviceConfig) -> Self {
        Self {
            index,
            rows: HashMap::new(),
            open_row: None,
            t_rcd: SpacingTimer::new("tRCD", config.t_rcd),
            t_rp: SpacingTimer::new("tRP", config.t_rp),
            t_rc: SpacingTimer::new("tRC", config.t_rc),
        }
    }

    /// Ages every per-bank timer by one cycle.
    pub fn clk(&mut self) {
        self.t_rcd.clk();
        self.t_rp.clk();
        self.t_rc.clk();
    }

    /// Row currently open, if any.
    pub const fn open_row(&self) -> Option<u16> {
        self.open_row
    }

    /// Fails unless the bank is closed and precharge recovery (tRP) has finished.
    ///
    /// # Errors
    ///
    /// [`ProtocolViolation::BankNotIdle`] for an open row, otherwise the tRP violation.
    pub const fn check_idle(&self, command: Command) -> Result<(), ProtocolViolation> {
        if self.open_row.is_some() {
            return Err(ProtocolViolation::BankNotIdle {
                bank: self.index,
                command,
            });
        }
        self.t_rp.check()
    }

    /// Opens `row`.
    ///
    /// # Errors
    ///
    /// Fails if a row is already open or tRP/tRC are not yet satisfied.
    pub fn activate(&mut self, row: u16) -> Result<(), ProtocolViolation> {
        if let Some(open_row) = self.open_row {
            return Err(ProtocolViolation::BankAlreadyActive {
                bank: self.index,
                row,
                open_row,
            });
        }
        self.t_rp.check()?;
        self.t_rc.check()?;

        self.open_row = Some(row);
        self.t_rcd.start();
        self.t_rc.start();
        Ok(())
    }

    /// Closes the open row, if any.
    pub fn precharge(&mut self) {
        if self.open_row.take().is_some() {
            self.t_rp.start();
        }
    }

    /// Reads one column of the open row.
    ///
    /// # Errors
    ///
    /// Fails if no row is open or tRCD is not yet satisfied.
    pub fn read(&mut self, col: u16) -> Result<u16, ProtocolViolation> {
        let row = self.access_row(Command::Read)?;
        Ok(self.peek(row, col))
    }

    /// Writes one column of the open row, leaving masked byte lanes untouched.
    ///
    /// # Errors
    ///
    /// Fails if no row is open or tRCD is not yet satisfied.
    pub fn write(&mut self, col: u16, data: u16, mask: ByteMask) -> Result<(), ProtocolViolation> {
        let row = self.access_row(Command::Write)?;
        let old = self.peek(row, col);
        self.poke(row, col, merge(old, data, mask));
        Ok(())
    }

    fn access_row(&self, command: Command) -> Result<u16, ProtocolViolation> {
        let row = self.open_row.ok_or(ProtocolViolation::BankNotActive {
            bank: self.index,
            command,
        })?;
        self.t_rcd.check()?;
        Ok(row)
    }

    /// Back-door read that ignores bank state and timing.
    pub fn peek(&self, row: u16, col: u16) -> u16 {
        self.rows
            .get(&row)
            .map_or(0, |cols| cols[(col as u32 & COL_ADDR_MASK) as usize])
    }

    /// Back-door write that ignores bank state and timing.
    pub fn poke(&mut self, row: u16, col: u16, value: u16) {
        let cols = self
            .rows
            .entry(row)
            .or_insert_with(|| vec![0; NUM_COLS as usize].into_boxed_slice());
        cols[(col as u32 & COL_ADDR_MASK) as usize] = value;
    }
}

/// Merges `data` into `old` byte lane by byte lane, keeping lanes set in `mask`.
pub const fn merge(old: u16, data: u16, mask: ByteMask) -> u16 {
    let mut keep = 0u16;
    if mask.masks(0) {
        keep |= 0x00FF;
    }
    if mask.masks(1) {
        keep |= 0xFF00;
    }
    (old & keep) | (data & !keep)
}
