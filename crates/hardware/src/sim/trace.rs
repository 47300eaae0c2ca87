//! VCD waveform trace of the SDRAM bus.
//!
//! Each controller tick becomes one full clock cycle in the dump: the signals change while `clk`
//! is low and the rising edge follows half a period later, which is where the device samples.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use vcd::{IdCode, TimescaleUnit, Value, VarType};

use crate::common::constants::{ADDR_BUS_BITS, DATA_BITS, NUM_BANK_ADDR_BITS};
use crate::controller::signals::BusState;

/// Half of the 100 MHz controller clock period.
const HALF_PERIOD_NS: u32 = 5;

/// Values sampled for one tick.
#[derive(Clone, Copy, Debug)]
pub struct TraceSample<'a> {
    /// Bus lines sampled on this edge.
    pub bus: &'a BusState,
    /// Data bus as seen by both sides (controller or device drive).
    pub dq: Option<u16>,
    /// Sequencer position before the edge.
    pub position: u8,
    /// InitCounter before the edge.
    pub init_count: u8,
    /// Client data-out register after the edge.
    pub data_out: u16,
}

/// Open VCD writer with the handles of every traced signal.
pub struct VcdTrace<W: Write> {
    w: vcd::Writer<W>,

    clk_id: IdCode,
    command_id: IdCode,
    cmd_id: IdCode,
    bank_id: IdCode,
    a_id: IdCode,
    dqm_id: IdCode,
    dq_id: IdCode,
    seq_id: IdCode,
    init_count_id: IdCode,
    data_out_id: IdCode,

    time_stamp: u64,
}

impl VcdTrace<io::BufWriter<fs::File>> {
    /// Creates `path` and writes the trace header.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be created or the header cannot be written.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = fs::File::create(path)?;
        Self::new(io::BufWriter::new(file))
    }
}

impl<W: Write> VcdTrace<W> {
    /// Writes the trace header to `out`.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn new(out: W) -> io::Result<Self> {
        let mut w = vcd::Writer::new(out);

        w.timescale(HALF_PERIOD_NS, TimescaleUnit::NS)?;
        w.add_module("sdram")?;

        let clk_id = w.add_wire(1, "clk")?;
        let command_id = w.add_var(VarType::String, 4, "command", None)?;
        let cmd_id = w.add_wire(3, "cmd")?;
        let bank_id = w.add_wire(NUM_BANK_ADDR_BITS, "bank")?;
        let a_id = w.add_wire(ADDR_BUS_BITS, "a")?;
        let dqm_id = w.add_wire(2, "dqm")?;
        let dq_id = w.add_wire(DATA_BITS, "dq")?;
        let seq_id = w.add_wire(3, "seq")?;
        let init_count_id = w.add_wire(5, "init_count")?;
        let data_out_id = w.add_wire(DATA_BITS, "data_out")?;

        w.upscope()?;
        w.enddefinitions()?;

        let time_stamp = 0;
        w.timestamp(time_stamp)?;

        Ok(Self {
            w,
            clk_id,
            command_id,
            cmd_id,
            bank_id,
            a_id,
            dqm_id,
            dq_id,
            seq_id,
            init_count_id,
            data_out_id,
            time_stamp,
        })
    }

    /// Emits one clock cycle.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn record(&mut self, sample: &TraceSample<'_>) -> io::Result<()> {
        self.w.change_scalar(self.clk_id, false)?;

        let bus = sample.bus;
        self.w.change_string(self.command_id, bus.command.mnemonic())?;
        self.w
            .change_vector(self.cmd_id, &bits(u32::from(bus.command.encode()), 3))?;
        self.w
            .change_vector(self.bank_id, &bits(u32::from(bus.bank), NUM_BANK_ADDR_BITS))?;
        self.w
            .change_vector(self.a_id, &bits(u32::from(bus.addr), ADDR_BUS_BITS))?;
        self.w
            .change_vector(self.dqm_id, &bits(u32::from(bus.dqm.0), 2))?;
        match sample.dq {
            Some(dq) => self.w.change_vector(self.dq_id, &bits(u32::from(dq), DATA_BITS))?,
            None => self
                .w
                .change_vector(self.dq_id, &vec![Value::Z; DATA_BITS as usize])?,
        }
        self.w
            .change_vector(self.seq_id, &bits(u32::from(sample.position), 3))?;
        self.w
            .change_vector(self.init_count_id, &bits(u32::from(sample.init_count), 5))?;
        self.w.change_vector(
            self.data_out_id,
            &bits(u32::from(sample.data_out), DATA_BITS),
        )?;

        self.time_stamp += 1;
        self.w.timestamp(self.time_stamp)?;
        self.w.change_scalar(self.clk_id, true)?;
        self.time_stamp += 1;
        self.w.timestamp(self.time_stamp)
    }
}

impl<W: Write> fmt::Debug for VcdTrace<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VcdTrace")
            .field("time_stamp", &self.time_stamp)
            .finish_non_exhaustive()
    }
}

/// MSB-first bit vector of the low `width` bits of `value`.
fn bits(value: u32, width: u32) -> Vec<Value> {
    (0..width)
        .rev()
        .map(|i| {
            if (value >> i) & 1 == 0 {
                Value::V0
            } else {
                Value::V1
            }
        })
        .collect()
}
