use pretty_assertions::assert_eq;

use sdramsim_core::controller::signals::Command;
use sdramsim_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::harness::TestContext;

fn short_run() -> SimStats {
    let mut ctx = TestContext::new();
    let _ = ctx.write(0x10, 0xBEEF);
    assert_eq!(ctx.read(0x10), 0xBEEF);
    let _ = ctx.idle(2);
    ctx.system.finish()
}

#[test]
fn counts_commands_and_service() {
    let stats = short_run();
    assert_eq!(stats.ticks, 288);
    assert_eq!(stats.periods, 36);
    assert_eq!(stats.writes, 1);
    assert_eq!(stats.reads, 1);
    assert_eq!(stats.idle_periods, 2);
    assert_eq!(stats.count(Command::Precharge), 1);
    assert_eq!(stats.count(Command::LoadMode), 1);
    assert_eq!(stats.count(Command::Activate), 2);
    assert_eq!(stats.count(Command::Read), 1);
    assert_eq!(stats.count(Command::Write), 1);
    assert_eq!(stats.count(Command::AutoRefresh), 2);
    assert_eq!(stats.count(Command::Nop), 280);
    assert_eq!(stats.floating_captures, 0);
}

#[test]
fn command_counts_sum_to_ticks() {
    let stats = short_run();
    assert_eq!(stats.commands.iter().sum::<u64>(), stats.ticks);
}

#[test]
fn json_report_omits_host_time() {
    let stats = short_run();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["ticks"], 288);
    assert!(json.get("commands").is_some());
    assert!(json.get("start_time").is_none());
}

#[test]
fn printing_every_section_succeeds() {
    let stats = short_run();
    stats.print();
    let sections: Vec<String> = STATS_SECTIONS.iter().map(|s| (*s).to_string()).collect();
    stats.print_sections(&sections[1..2]);
}
