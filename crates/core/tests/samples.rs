//! Sample-based integration tests: parse every message under `samples/`.

mod common;

use std::fs;
use std::path::PathBuf;

use hl7_toolchain_core::{
    EmitConfig, ParseOptions, SchemaSet, SegmentTerminator, check_message, emit_hl7,
    get_segment_of_type, parse_with_options,
};

fn samples_dir() -> PathBuf {
    let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/core -> repo root
    root.pop();
    root.pop();
    root.join("samples")
}

fn sample_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(samples_dir())
        .expect("samples")
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("hl7"))
        .collect();
    files.sort();
    files
}

#[test]
fn samples_directory_parses_cleanly() {
    let schemas = SchemaSet::default();
    let files = sample_files();
    assert!(!files.is_empty(), "no samples found");
    for path in files {
        let input = fs::read_to_string(&path).expect("read hl7");
        let opts = ParseOptions {
            segment_separator: SegmentTerminator::detect(&input),
        };
        let msg = parse_with_options(&input, &schemas, &opts)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert_eq!(msg.segment_types()[0], "MSH", "{}", path.display());
        assert!(msg.message_type().is_some(), "{}", path.display());

        let issues = check_message(&msg, &schemas);
        assert!(
            issues.iter().all(|d| !d.is_error()),
            "{}: {issues:?}",
            path.display()
        );

        let config = EmitConfig {
            terminator: opts.segment_separator,
            trailing_terminator: true,
        };
        assert_eq!(emit_hl7(&msg, &config), input, "{}", path.display());
    }
}

#[test]
fn lf_sample_needs_detection() {
    let input = fs::read_to_string(samples_dir().join("adt_a01_admit_lf.hl7")).unwrap();
    let cr = parse_with_options(&input, &SchemaSet::default(), &ParseOptions::default()).unwrap();
    assert_eq!(cr.len(), 1);

    let lf = ParseOptions {
        segment_separator: SegmentTerminator::Lf,
    };
    let msg = parse_with_options(&input, &SchemaSet::default(), &lf).unwrap();
    assert_eq!(common::types(&msg), ["MSH", "EVN", "PID", "PV1"]);
    let pid = get_segment_of_type("PID", &msg).unwrap();
    assert_eq!(pid.get("PatientName"), Some("EVERYWOMAN^EVE^E^^^^L"));
    assert_eq!(msg.version(), Some("2.5.1"));
}

#[test]
fn custom_delimiter_sample() {
    let input = fs::read_to_string(samples_dir().join("custom_delimiters.hl7")).unwrap();
    let msg = common::parse_ok(&input);
    assert_eq!(msg.message_type(), Some("ORU$R01"));
    let pid = get_segment_of_type("PID", &msg).unwrap();
    let ids = hl7_toolchain_core::split::split_with_delimiters(
        pid.get("PatientIdentifierList").unwrap(),
        msg.delimiters(),
    );
    assert_eq!(ids.len(), 2);
}
