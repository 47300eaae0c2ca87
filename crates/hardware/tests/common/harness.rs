use sdramsim_core::common::WordAddr;
use sdramsim_core::config::Config;
use sdramsim_core::device::MemoryDevice;
use sdramsim_core::sim::{IssuedCommand, PeriodReport, System, Transaction};
use sdramsim_core::Sdram;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// An initialized system plus convenience drivers for client periods.
pub struct TestContext<D: MemoryDevice = Sdram> {
    pub system: System<D>,
    pub init_commands: Vec<IssuedCommand>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let system = System::new(config).unwrap();
        Self::start(system)
    }
}

impl<D: MemoryDevice> TestContext<D> {
    pub fn with_device(config: &Config, device: D) -> Self {
        init_tracing();
        let system = System::with_device(config, device).unwrap();
        Self::start(system)
    }

    fn start(mut system: System<D>) -> Self {
        let init_commands = system.initialize().unwrap();
        Self {
            system,
            init_commands,
        }
    }

    pub fn period(&mut self, transaction: Transaction) -> PeriodReport {
        self.system.run_period(&transaction).unwrap()
    }

    pub fn write(&mut self, addr: u32, data: u16) -> PeriodReport {
        self.period(Transaction::write(WordAddr::new(addr), data))
    }

    pub fn write_strobed(&mut self, addr: u32, data: u16, strobes: u8) -> PeriodReport {
        self.period(Transaction::Write {
            addr: WordAddr::new(addr),
            data,
            strobes,
        })
    }

    /// Reads `addr` and returns the captured word.
    pub fn read(&mut self, addr: u32) -> u16 {
        let report = self.period(Transaction::Read {
            addr: WordAddr::new(addr),
        });
        report.data.expect("read period captured no data").value
    }

    pub fn idle(&mut self, periods: usize) -> Vec<PeriodReport> {
        (0..periods).map(|_| self.period(Transaction::Idle)).collect()
    }
}
