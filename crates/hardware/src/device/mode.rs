//! Mode register decode.
//!
//! Field layout of the SDR SDRAM mode register as presented on the address bus during
//! Load-Mode:
//!
//! * `[2:0]` burst length (`000` = 1, `001` = 2, `010` = 4, `011` = 8, `111` = full page)
//! * `[3]` burst type (0 = sequential, 1 = interleaved)
//! * `[6:4]` CAS latency (`010` = 2, `011` = 3)
//! * `[8:7]` operating mode (`00` = standard)
//! * `[9]` write burst mode (0 = programmed burst, 1 = single location)
//! * `[12:10]` reserved, must be zero

use serde::Serialize;

use crate::common::ProtocolViolation;
use crate::common::constants::{MODE_CAS_LATENCY_SHIFT, MODE_WRITE_BURST_SINGLE};

const BURST_LENGTH_MASK: u16 = 0b111;
const BURST_TYPE_BIT: u16 = 1 << 3;
const CAS_LATENCY_MASK: u16 = 0b111;
const OP_MODE_SHIFT: u16 = 7;
const OP_MODE_MASK: u16 = 0b11;
const RESERVED_MASK: u16 = 0b111 << 10;

/// Decoded mode register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ModeRegister {
    /// Words per burst.
    pub burst_length: u16,
    /// Interleaved (rather than sequential) burst ordering.
    pub interleaved: bool,
    /// Cycles from Read to data.
    pub cas_latency: u8,
    /// Writes are single-location regardless of the burst length.
    pub single_write: bool,
}

impl ModeRegister {
    /// Decodes a Load-Mode address word, accepting only what this device model supports:
    /// burst length 1, CAS latency 2 or 3, standard operation, reserved bits clear.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolViolation::UnsupportedMode`] for anything else.
    pub const fn decode(value: u16) -> Result<Self, ProtocolViolation> {
        let burst_length = match value & BURST_LENGTH_MASK {
            0b000 => 1,
            _ => return Err(ProtocolViolation::UnsupportedMode { value }),
        };
        let cas_latency = match (value >> MODE_CAS_LATENCY_SHIFT) & CAS_LATENCY_MASK {
            0b010 => 2,
            0b011 => 3,
            _ => return Err(ProtocolViolation::UnsupportedMode { value }),
        };
        if (value >> OP_MODE_SHIFT) & OP_MODE_MASK != 0 || value & RESERVED_MASK != 0 {
            return Err(ProtocolViolation::UnsupportedMode { value });
        }

        Ok(Self {
            burst_length,
            interleaved: value & BURST_TYPE_BIT != 0,
            cas_latency,
            single_write: value & MODE_WRITE_BURST_SINGLE != 0,
        })
    }
}
