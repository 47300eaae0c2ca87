//! # Mode Register Tests

use rstest::rstest;

use sdramsim_core::common::ProtocolViolation;
use sdramsim_core::common::constants::MODE_REGISTER;
use sdramsim_core::device::ModeRegister;

#[test]
fn fixed_profile_decodes() {
    let mode = ModeRegister::decode(MODE_REGISTER).unwrap();
    assert_eq!(mode.burst_length, 1);
    assert_eq!(mode.cas_latency, 2);
    assert!(!mode.interleaved);
    assert!(mode.single_write);
}

#[rstest]
#[case(0x030, 3)]
#[case(0x020, 2)]
#[case(0x228, 2)]
fn accepted_values(#[case] value: u16, #[case] cas_latency: u8) {
    assert_eq!(ModeRegister::decode(value).unwrap().cas_latency, cas_latency);
}

#[rstest]
#[case::burst_of_four(0x222)]
#[case::full_page(0x227)]
#[case::cas_latency_one(0x210)]
#[case::reserved_latency(0x240)]
#[case::test_mode(0x0A0)]
#[case::reserved_bits(0x1020)]
fn rejected_values(#[case] value: u16) {
    assert_eq!(
        ModeRegister::decode(value),
        Err(ProtocolViolation::UnsupportedMode { value })
    );
}
