//! Fixed Timing Profile and Bus Geometry.
//!
//! This module defines the constants shared by the controller and the device model. It includes:
//! 1. **Sequencer Constants:** The eight sub-states of a reference period and their roles.
//! 2. **Timing Constants:** RAS-to-CAS delay, CAS latency and the mode-register word that encodes them.
//! 3. **Initialization Constants:** InitCounter load value and its two reserved trigger points.
//! 4. **Geometry Constants:** Row/column/bank widths of the reference 16-bit, 4-bank part.
//!
//! The timing constants and `MODE_REGISTER` form one contract with the memory part; changing one
//! without the other desynchronizes the controller's capture slot from the device's output pipeline.

/// Number of sequencer positions per reference period.
pub const SEQUENCER_POSITIONS: u8 = 8;

/// First position of a reference period.
pub const STATE_FIRST: u8 = 0;

/// Position at which the arbiter samples the client and issues Activate/Auto-Refresh.
pub const STATE_CMD_START: u8 = 1;

/// Minimum ticks between Activate and the following Read/Write (tRCD).
pub const RAS_TO_CAS_DELAY: u8 = 2;

/// Position at which Read/Write continues the period's transaction.
pub const STATE_CMD_CONT: u8 = STATE_CMD_START + RAS_TO_CAS_DELAY;

/// Ticks between the device sampling Read and driving the data (CL).
pub const CAS_LATENCY: u8 = 2;

/// Position at which read data is latched into the client-visible register.
///
/// One tick later than `STATE_CMD_CONT + CAS_LATENCY` because the command bus is registered.
pub const STATE_CMD_READ: u8 = STATE_CMD_CONT + CAS_LATENCY + 1;

/// Terminal position of a reference period.
pub const STATE_LAST: u8 = SEQUENCER_POSITIONS - 1;

/// Value loaded into the InitCounter on an initialization request (5-bit register).
pub const INIT_COUNT_MAX: u8 = 31;

/// InitCounter value at which Precharge-All is issued.
pub const INIT_PRECHARGE_AT: u8 = 13;

/// InitCounter value at which Load-Mode is issued.
pub const INIT_LOAD_MODE_AT: u8 = 2;

/// Burst length field: single location (`000`).
pub const MODE_BURST_LENGTH_1: u16 = 0x0000;

/// Burst type field: sequential ordering.
pub const MODE_BURST_SEQUENTIAL: u16 = 0x0000;

/// CAS latency field shift.
pub const MODE_CAS_LATENCY_SHIFT: u16 = 4;

/// Operating mode field: standard operation.
pub const MODE_OP_STANDARD: u16 = 0x0000;

/// Write burst mode field: single-location writes.
pub const MODE_WRITE_BURST_SINGLE: u16 = 0x0200;

/// Mode-register word presented on the address bus during Load-Mode.
pub const MODE_REGISTER: u16 = MODE_BURST_LENGTH_1
    | MODE_BURST_SEQUENTIAL
    | ((CAS_LATENCY as u16) << MODE_CAS_LATENCY_SHIFT)
    | MODE_OP_STANDARD
    | MODE_WRITE_BURST_SINGLE;

/// Address line that selects "all banks" on Precharge and auto-precharge on Read/Write.
pub const AUTO_PRECHARGE: u16 = 1 << 10;

/// Width of the multiplexed row/column address bus.
pub const ADDR_BUS_BITS: u32 = 13;

/// Mask for the multiplexed address bus.
pub const ADDR_BUS_MASK: u16 = (1 << ADDR_BUS_BITS) - 1;

/// Width of one data word in bits.
pub const DATA_BITS: u32 = 16;

/// Number of byte lanes on the data bus.
pub const BYTE_LANES: u32 = DATA_BITS / 8;

/// Row address width.
pub const NUM_ROW_ADDR_BITS: u32 = 13;

/// Column address width.
pub const NUM_COL_ADDR_BITS: u32 = 9;

/// Bank address width.
pub const NUM_BANK_ADDR_BITS: u32 = 2;

/// Rows per bank.
pub const NUM_ROWS: u32 = 1 << NUM_ROW_ADDR_BITS;

/// Columns per row.
pub const NUM_COLS: u32 = 1 << NUM_COL_ADDR_BITS;

/// Banks per device.
pub const NUM_BANKS: u32 = 1 << NUM_BANK_ADDR_BITS;

/// Row address mask.
pub const ROW_ADDR_MASK: u32 = NUM_ROWS - 1;

/// Column address mask.
pub const COL_ADDR_MASK: u32 = NUM_COLS - 1;

/// Bank address mask.
pub const BANK_ADDR_MASK: u32 = NUM_BANKS - 1;

/// Width of a client word address.
pub const WORD_ADDR_BITS: u32 = NUM_COL_ADDR_BITS + NUM_ROW_ADDR_BITS + NUM_BANK_ADDR_BITS;

/// Both byte strobes set.
pub const STROBE_ALL: u8 = 0b11;
