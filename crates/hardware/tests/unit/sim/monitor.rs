use pretty_assertions::assert_eq;

use sdramsim_core::config::Config;
use sdramsim_core::controller::signals::Command;
use sdramsim_core::sim::Transaction;

use crate::common::harness::TestContext;

fn tight_bound() -> Config {
    let mut config = Config::default();
    config.device.max_refresh_gap = 20;
    config
}

#[test]
fn idle_traffic_refreshes_every_period() {
    let mut ctx = TestContext::with_config(&tight_bound());
    let _ = ctx.idle(6);
    let monitor = ctx.system.monitor();
    assert_eq!(monitor.refreshes, 6);
    assert_eq!(monitor.last_gap, Some(8));
    assert_eq!(monitor.longest_gap, 8);
    assert_eq!(monitor.violations, 0);
}

#[test]
fn saturating_client_starves_refresh() {
    let mut ctx = TestContext::with_config(&tight_bound());
    let first = ctx.idle(1).remove(0);
    assert_eq!(first.offset_of(Command::AutoRefresh), Some(2));
    assert_eq!(first.commands[0].tick, 258);

    for i in 0..10 {
        let report = ctx.write(i, 0);
        assert!(!report.command_kinds().contains(&Command::AutoRefresh));
    }
    let last = ctx.idle(1).remove(0);
    assert_eq!(last.commands[0].tick, 346);

    let monitor = ctx.system.monitor();
    assert_eq!(monitor.last_gap, Some(88));
    assert_eq!(monitor.longest_gap, 88);
    assert_eq!(monitor.violations, 1);
}

#[test]
fn starvation_does_not_change_the_command_stream() {
    let mut ctx = TestContext::with_config(&tight_bound());
    for i in 0..20 {
        let report = ctx.period(Transaction::Read {
            addr: sdramsim_core::common::WordAddr::new(i),
        });
        assert_eq!(report.command_kinds(), vec![Command::Activate, Command::Read]);
    }
}

#[test]
fn finish_reports_an_open_interval() {
    let mut ctx = TestContext::with_config(&tight_bound());
    let _ = ctx.idle(1);
    for i in 0..4 {
        let _ = ctx.write(i, 1);
    }
    let stats = ctx.system.finish();
    assert_eq!(stats.refresh_violations, 1);
    assert!(stats.longest_refresh_gap > 20);
}
