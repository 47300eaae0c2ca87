//! Client Word Addresses.
//!
//! This module defines the strong type for client-supplied word addresses and the fixed bit
//! ranges that split them across the SDRAM geometry. It provides the following:
//! 1. **Type Safety:** Keeps client word addresses apart from raw address-bus values.
//! 2. **Decode:** Column, row and bank extraction by fixed bit ranges.
//! 3. **Encode:** Reassembly from (bank, row, column) for device back-door access and tests.

use std::fmt;

use serde::Serialize;

use super::constants::{
    BANK_ADDR_MASK, COL_ADDR_MASK, NUM_COL_ADDR_BITS, NUM_ROW_ADDR_BITS, ROW_ADDR_MASK,
    WORD_ADDR_BITS,
};

/// A 24-bit client word address (one 16-bit word per address).
///
/// Layout: `column = addr[8:0]`, `row = addr[21:9]`, `bank = addr[23:22]`.
/// Bits above the word-address width are ignored by every accessor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WordAddr(pub u32);

impl WordAddr {
    /// Mask covering every meaningful address bit.
    pub const MASK: u32 = (1 << WORD_ADDR_BITS) - 1;

    /// Creates a new word address from a raw value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw address value; high bits are kept but ignored.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Builds a word address from its geometric components.
    ///
    /// # Arguments
    ///
    /// * `bank` - Bank index (2 bits).
    /// * `row` - Row index (13 bits).
    /// * `col` - Column index (9 bits).
    pub const fn from_parts(bank: u8, row: u16, col: u16) -> Self {
        let bank = (bank as u32) & BANK_ADDR_MASK;
        let row = (row as u32) & ROW_ADDR_MASK;
        let col = (col as u32) & COL_ADDR_MASK;
        Self(
            (bank << (NUM_ROW_ADDR_BITS + NUM_COL_ADDR_BITS)) | (row << NUM_COL_ADDR_BITS) | col,
        )
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Column index within the open row.
    #[inline(always)]
    pub const fn column(self) -> u16 {
        (self.0 & COL_ADDR_MASK) as u16
    }

    /// Row index within the bank.
    #[inline(always)]
    pub const fn row(self) -> u16 {
        ((self.0 >> NUM_COL_ADDR_BITS) & ROW_ADDR_MASK) as u16
    }

    /// Bank index.
    #[inline(always)]
    pub const fn bank(self) -> u8 {
        ((self.0 >> (NUM_COL_ADDR_BITS + NUM_ROW_ADDR_BITS)) & BANK_ADDR_MASK) as u8
    }
}

impl From<u32> for WordAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl fmt::Display for WordAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#08x} (bank {}, row {:#x}, col {:#x})",
            self.0 & Self::MASK,
            self.bank(),
            self.row(),
            self.column()
        )
    }
}
