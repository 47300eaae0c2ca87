//! Refresh interval monitor.
//!
//! Refresh in this controller is opportunistic: it only happens in periods the client leaves
//! idle, so a saturating client can starve it. The monitor measures the resulting intervals and
//! reports them against the part's retention bound. It observes only and never changes what the
//! controller issues.

use serde::Serialize;
use tracing::warn;

/// Auto-Refresh interval measurements.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RefreshMonitor {
    max_gap: u64,
    last_refresh: Option<u64>,
    /// Ticks between the two most recent refreshes.
    pub last_gap: Option<u64>,
    /// Largest gap seen so far.
    pub longest_gap: u64,
    /// Number of gaps that exceeded the bound.
    pub violations: u64,
    /// Total refreshes observed.
    pub refreshes: u64,
}

impl RefreshMonitor {
    /// Creates a monitor that flags gaps longer than `max_gap` ticks.
    pub fn new(max_gap: u64) -> Self {
        Self {
            max_gap,
            ..Self::default()
        }
    }

    /// Records an Auto-Refresh issued on `tick`.
    pub fn record(&mut self, tick: u64) {
        self.refreshes += 1;
        if let Some(last) = self.last_refresh {
            let gap = tick.saturating_sub(last);
            self.last_gap = Some(gap);
            self.longest_gap = self.longest_gap.max(gap);
            self.check_gap(gap, tick);
        }
        self.last_refresh = Some(tick);
    }

    /// Gap from the last refresh (or from tick zero) to `now`, counting an open interval.
    pub fn pending_gap(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_refresh.unwrap_or(0))
    }

    /// Closes the measurement at `now`, so a run that ends while starved is still reported.
    pub fn finish(&mut self, now: u64) {
        let gap = self.pending_gap(now);
        self.longest_gap = self.longest_gap.max(gap);
        self.check_gap(gap, now);
    }

    fn check_gap(&mut self, gap: u64, tick: u64) {
        if gap > self.max_gap {
            if self.violations == 0 {
                warn!(
                    tick,
                    gap,
                    bound = self.max_gap,
                    "refresh interval exceeded; the client left too few idle periods"
                );
            }
            self.violations += 1;
        }
    }

    /// Configured bound in ticks.
    pub const fn max_gap(&self) -> u64 {
        self.max_gap
    }
}
