//! Shared test helpers for `hl7_toolchain_core` integration tests.

#![allow(unreachable_pub)]

use hl7_toolchain_core::{ParsedMessage, parse_str};

// ─── Fixture segments ───────────────────────────────────────────────────────

#[allow(dead_code)]
pub const MSH: &str = "MSH|^~\\&|SNDAPPL|snd_fac|RECAPPL|rec_fac|20070208165451.447- 0500||ADT^A03|110A35A09B785|P|2.5";
#[allow(dead_code)]
pub const EVN: &str = "EVN|A03|200702080406|||PointClickCare|200702080406";
#[allow(dead_code)]
pub const PID: &str = "PID|1||99269^^^^FI~123321^^^^PI||Berk^Ailsa||19400503|F|||579 5 PointClickCare Street^^Lakeview^OH^90210||^PRN^PH^^^^^^^^^(937) 8432794|||||04254|275-32-9550";
#[allow(dead_code)]
pub const ZEV: &str = "ZEV|2001|200702080406|PointClickCare";

/// PV1 line with the given set ID.
#[allow(dead_code)]
pub fn pv1(set_id: &str) -> String {
    format!(
        "PV1|{set_id}|N|100^104^A^ABC2PREV0021^^N^100^1||||G45670 ^Haenel^Mary- Ann|||||||||||0||||||||||||||||||||||||||20070207 0403-0500|200702080406-0500"
    )
}

/// Join segment lines with carriage returns.
#[allow(dead_code)]
pub fn join_cr<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<&str>>()
        .join("\r")
}

// ─── Fixture messages ───────────────────────────────────────────────────────

/// MSH, EVN, PID, PV1, ZEV.
#[allow(dead_code)]
pub fn adt_message() -> String {
    join_cr(&[MSH.to_string(), EVN.into(), PID.into(), pv1("1"), ZEV.into()])
}

/// MSH, EVN, PID, three PV1 with set IDs 1..3, ZEV.
#[allow(dead_code)]
pub fn three_visits_message() -> String {
    join_cr(&[
        MSH.to_string(),
        EVN.into(),
        PID.into(),
        pv1("1"),
        pv1("2"),
        pv1("3"),
        ZEV.into(),
    ])
}

/// MSH, two EVN, PID, PV1, ZEV.
#[allow(dead_code)]
pub fn double_event_message() -> String {
    join_cr(&[
        MSH.to_string(),
        EVN.into(),
        EVN.into(),
        PID.into(),
        pv1("1"),
        ZEV.into(),
    ])
}

// ─── Parse helpers ──────────────────────────────────────────────────────────

/// Parse with the built-in schemas, panicking with the error on failure.
#[allow(dead_code)]
pub fn parse_ok(input: &str) -> ParsedMessage {
    parse_str(input).unwrap_or_else(|e| panic!("expected {input:?} to parse: {e}"))
}

/// Segment type codes of a message as `&str`s.
#[allow(dead_code)]
pub fn types(message: &ParsedMessage) -> Vec<&str> {
    message.segment_types().iter().map(String::as_str).collect()
}
