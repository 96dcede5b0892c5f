mod common;

use common::{EVN, MSH, PID, ZEV, join_cr, parse_ok, pv1, types};
use hl7_toolchain_core::grammar::lexer::tokenize;
use hl7_toolchain_core::{
    Delimiters, ParseError, ParseOptions, SchemaSet, SegmentTerminator, parse_str,
    parse_with_options, parse_with_schemas,
};

// ─── Whole messages ─────────────────────────────────────────────────────────

#[test]
fn parses_adt_message() {
    let msg = parse_ok(&common::adt_message());
    assert_eq!(types(&msg), ["MSH", "EVN", "PID", "PV1", "ZEV"]);
    assert_eq!(msg.len(), 5);
    assert_eq!(msg.delimiters(), &Delimiters::default());
}

#[test]
fn parses_message_without_optional_segments() {
    let msg = parse_ok(&join_cr(&[MSH, PID, ZEV]));
    assert_eq!(types(&msg), ["MSH", "PID", "ZEV"]);
}

#[test]
fn garbage_line_fails_whole_parse() {
    let input = join_cr(&[MSH, EVN, PID, "blaaaaaah", ZEV]);
    let err = parse_str(&input).unwrap_err();
    match err {
        ParseError::MalformedSegment {
            line, line_index, ..
        } => {
            assert_eq!(line, "blaaaaaah");
            assert_eq!(line_index, 3);
        }
        other => panic!("expected MalformedSegment, got {other:?}"),
    }
}

#[test]
fn parsing_is_deterministic() {
    let input = common::three_visits_message();
    assert_eq!(parse_ok(&input), parse_ok(&input));
}

#[test]
fn segment_types_mirror_segments() {
    let msg = parse_ok(&common::three_visits_message());
    let from_segments: Vec<&str> = msg.segments().iter().map(|s| s.segment_type()).collect();
    assert_eq!(types(&msg), from_segments);
    for seg in msg.segments() {
        assert_eq!(seg.get("SegmentType"), Some(seg.segment_type()));
    }
}

// ─── Field mapping ──────────────────────────────────────────────────────────

#[test]
fn msh_positions_follow_standard_numbering() {
    let msg = parse_ok(&common::adt_message());
    let msh = msg.header();
    assert_eq!(msh.get("FieldSeparator"), Some("|"));
    assert_eq!(msh.get("EncodingCharacters"), Some("^~\\&"));
    assert_eq!(msh.get("SendingApplication"), Some("SNDAPPL"));
    assert_eq!(msh.get("Security"), Some(""));
    assert_eq!(msh.get("MessageType"), Some("ADT^A03"));
    assert_eq!(msh.field(9), Some("ADT^A03"));
    assert_eq!(msg.message_type(), Some("ADT^A03"));
    assert_eq!(msg.control_id(), Some("110A35A09B785"));
    assert_eq!(msg.version(), Some("2.5"));
}

#[test]
fn pid_fields_are_raw_strings() {
    let msg = parse_ok(&common::adt_message());
    let pid = &msg.segments()[2];
    assert_eq!(pid.get("SetID"), Some("1"));
    assert_eq!(pid.get("PatientID"), Some(""));
    assert_eq!(
        pid.get("PatientIdentifierList"),
        Some("99269^^^^FI~123321^^^^PI")
    );
    assert_eq!(pid.get("PatientName"), Some("Berk^Ailsa"));
    assert_eq!(pid.get("AdministrativeSex"), Some("F"));
}

#[test]
fn attributes_keep_schema_order() {
    let msg = parse_ok(&common::adt_message());
    let evn = &msg.segments()[1];
    let keys: Vec<&str> = evn.parsed().keys().collect();
    assert_eq!(
        keys,
        [
            "SegmentType",
            "EventTypeCode",
            "RecordedDateTime",
            "DateTimePlannedEvent",
            "EventReasonCode",
            "OperatorID",
            "EventOccurred",
        ]
    );
}

#[test]
fn short_segment_omits_trailing_names() {
    let msg = parse_ok(&join_cr(&[MSH, "EVN|A03"]));
    let evn = &msg.segments()[1];
    assert_eq!(evn.parsed().len(), 2);
    assert_eq!(evn.get("EventTypeCode"), Some("A03"));
    assert!(!evn.parsed().contains_key("RecordedDateTime"));
}

#[test]
fn extra_fields_stay_raw_only() {
    let msg = parse_ok(&join_cr(&[MSH, "EVN|A03|1|2|3|4|5|6|extra"]));
    let evn = &msg.segments()[1];
    assert_eq!(evn.parsed().len(), 8);
    assert_eq!(evn.fields().len(), 9);
    assert_eq!(evn.field(8), Some("extra"));
}

#[test]
fn unregistered_segment_gets_only_type() {
    let msg = parse_ok(&common::adt_message());
    let zev = msg.segments().last().unwrap();
    assert_eq!(zev.parsed().len(), 1);
    assert_eq!(zev.get("SegmentType"), Some("ZEV"));
    assert_eq!(zev.field(3), Some("PointClickCare"));
}

#[test]
fn pv1_set_id() {
    let msg = parse_ok(&join_cr(&[MSH.to_string(), pv1("7")]));
    assert_eq!(msg.segments()[1].get("SetID"), Some("7"));
}

// ─── Delimiters and separators ──────────────────────────────────────────────

#[test]
fn custom_delimiters_apply_to_every_segment() {
    let msg = parse_ok("MSH#$%\\@#APP#FAC\rPID#1##X$Y");
    let d = msg.delimiters();
    assert_eq!((d.field, d.component, d.repetition), ('#', '$', '%'));
    assert_eq!(msg.header().get("FieldSeparator"), Some("#"));
    assert_eq!(msg.header().get("SendingApplication"), Some("APP"));
    assert_eq!(msg.segments()[1].get("PatientIdentifierList"), Some("X$Y"));
}

#[test]
fn lf_separated_input_with_options() {
    let input = [MSH, EVN, ZEV].join("\n");
    let opts = ParseOptions {
        segment_separator: SegmentTerminator::Lf,
    };
    let msg = parse_with_options(&input, &SchemaSet::default(), &opts).unwrap();
    assert_eq!(types(&msg), ["MSH", "EVN", "ZEV"]);
}

#[test]
fn crlf_input_parses_with_default_separator() {
    let input = [MSH, EVN, ZEV].join("\r\n");
    let msg = parse_ok(&input);
    assert_eq!(types(&msg), ["MSH", "EVN", "ZEV"]);
    assert_eq!(msg.segments()[2].field(3), Some("PointClickCare"));
}

#[test]
fn lf_input_with_cr_separator_is_one_line() {
    // Without a CR the whole text is a single MSH line.
    let input = [MSH, EVN].join("\n");
    let msg = parse_ok(&input);
    assert_eq!(types(&msg), ["MSH"]);
}

#[test]
fn blank_lines_are_skipped() {
    let input = format!("\r{MSH}\r\r{EVN}\r");
    let msg = parse_ok(&input);
    assert_eq!(types(&msg), ["MSH", "EVN"]);
    assert_eq!(msg.segments()[0].line_index(), 1);
    assert_eq!(msg.segments()[1].line_index(), 3);
}

#[test]
fn spans_point_at_source_lines() {
    let input = common::adt_message();
    let msg = parse_ok(&input);
    for seg in msg.segments() {
        let span = seg.span();
        assert!(input[span.start..span.end].starts_with(seg.segment_type()));
    }
}

// ─── Header errors ──────────────────────────────────────────────────────────

#[test]
fn empty_input_is_missing_header() {
    for input in ["", "\r\r", "   "] {
        let err = parse_str(input).unwrap_err();
        assert!(
            matches!(err, ParseError::MissingHeader { .. }),
            "{input:?}: {err:?}"
        );
    }
}

#[test]
fn first_segment_must_be_msh() {
    let err = parse_str(&join_cr(&[EVN, MSH])).unwrap_err();
    assert!(matches!(err, ParseError::MissingHeader { .. }));
    assert!(err.to_string().contains("\"EVN\""));
}

#[test]
fn truncated_header_is_missing_header() {
    for input in ["MSH", "MSH|^~", "MSH|^~\\"] {
        let err = parse_str(input).unwrap_err();
        assert!(
            matches!(err, ParseError::MissingHeader { .. }),
            "{input:?}: {err:?}"
        );
    }
}

#[test]
fn three_encoding_characters_still_parse() {
    let msg = parse_ok("MSH|^~\\|APP|FAC\rPID|1");
    assert_eq!(types(&msg), ["MSH", "PID"]);
    assert_eq!(msg.delimiters().subcomponent, '|');

    let msg = parse_ok("MSH|^~\\|SNDAPPL|FAC||||||ADT^A03|1|P|2.5\rPID|1");
    assert_eq!(types(&msg), ["MSH", "PID"]);
}

#[test]
fn odd_delimiters_are_taken_as_declared() {
    for header in ["MSH|^^\\&|X", "MSH|A~\\&", "MSH| ~\\&|X"] {
        let input = format!("{header}\rPID|1");
        let msg = parse_ok(&input);
        assert_eq!(types(&msg), ["MSH", "PID"], "{header:?}");
    }
}

#[test]
fn errors_map_to_diagnostics() {
    let err = parse_str("PID|1").unwrap_err();
    let diag = err.to_diagnostic();
    assert_eq!(diag.id, "HL71001");
    assert!(diag.is_error());

    let err = parse_str(&join_cr(&[MSH, "pid|1"])).unwrap_err();
    let diag = err.to_diagnostic();
    assert_eq!(diag.id, "HL71002");
    assert_eq!(
        diag.context.as_ref().and_then(|c| c.get("line")).map(String::as_str),
        Some("2")
    );
}

#[test]
fn lowercase_and_long_codes_are_malformed() {
    for bad in ["pid|1", "PIDX|1", "PI|1", "1ID|1", "P-D|1"] {
        let err = parse_str(&join_cr(&[MSH, bad])).unwrap_err();
        assert!(
            matches!(err, ParseError::MalformedSegment { .. }),
            "{bad:?}: {err:?}"
        );
    }
}

#[test]
fn digits_allowed_after_first_letter() {
    let msg = parse_ok(&join_cr(&[MSH, "ZZ9|a", "Z12|b"]));
    assert_eq!(types(&msg), ["MSH", "ZZ9", "Z12"]);
}

// ─── Schemas ────────────────────────────────────────────────────────────────

#[test]
fn custom_schema_maps_z_segment() {
    let mut schemas = SchemaSet::default();
    schemas
        .register("ZEV", ["EventCode", "EventTime", "Source"])
        .unwrap();
    let msg = parse_with_schemas(&common::adt_message(), &schemas).unwrap();
    let zev = msg.segments().last().unwrap();
    assert_eq!(zev.get("EventCode"), Some("2001"));
    assert_eq!(zev.get("Source"), Some("PointClickCare"));
}

#[test]
fn empty_schema_set_maps_type_only() {
    let msg = parse_with_schemas(&common::adt_message(), &SchemaSet::empty()).unwrap();
    for seg in msg.segments() {
        assert_eq!(seg.parsed().len(), 1);
    }
}

#[test]
fn replacing_a_schema_changes_names() {
    let mut schemas = SchemaSet::default();
    let previous = schemas.register("EVN", ["Code"]).unwrap();
    assert!(previous.is_some());
    let msg = parse_with_schemas(&join_cr(&[MSH, EVN]), &schemas).unwrap();
    let evn = &msg.segments()[1];
    assert_eq!(evn.get("Code"), Some("A03"));
    assert!(!evn.parsed().contains_key("EventTypeCode"));
}

#[test]
fn schemas_from_json() {
    let mut schemas = SchemaSet::default();
    let n = schemas
        .extend_from_json_str(
            r#"{"schemas":[{"code":"ZEV","description":"Custom event","fields":["A","B"]}]}"#,
        )
        .unwrap();
    assert_eq!(n, 1);
    let msg = parse_with_schemas(&join_cr(&[MSH, ZEV]), &schemas).unwrap();
    let zev = &msg.segments()[1];
    assert_eq!(zev.get("A"), Some("2001"));
    assert_eq!(zev.get("B"), Some("200702080406"));
    assert!(!zev.parsed().contains_key("C"));
}

// ─── Tokenizer ──────────────────────────────────────────────────────────────

#[test]
fn tokenizer_borrows_input() {
    let input = join_cr(&[MSH, PID]);
    let toks = tokenize(&input).unwrap();
    assert_eq!(toks.segments.len(), 2);
    assert_eq!(toks.segments[0].fields[1], "|");
    assert_eq!(toks.segments[1].fields[0], "PID");
    assert_eq!(toks.segments[1].segment_type(), "PID");
}

// ─── JSON ───────────────────────────────────────────────────────────────────

#[test]
fn json_shape() {
    let msg = parse_ok(&join_cr(&[MSH, "EVN|A03"]));
    let json: serde_json::Value = serde_json::from_str(&hl7_toolchain_core::to_pretty_json(&msg))
        .unwrap();
    assert_eq!(json["segmentTypes"], serde_json::json!(["MSH", "EVN"]));
    assert_eq!(
        json["segments"][1]["parsed"],
        serde_json::json!({"SegmentType": "EVN", "EventTypeCode": "A03"})
    );
    assert_eq!(json["delimiters"]["field"], "|");
}

#[test]
fn parsed_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<hl7_toolchain_core::ParsedMessage>();
    assert_send_sync::<SchemaSet>();
    assert_send_sync::<ParseError>();
}

#[test]
fn segment_count_matches_non_empty_lines() {
    let input = format!("{}\r\r", common::three_visits_message());
    let non_empty = input.split('\r').filter(|l| !l.trim().is_empty()).count();
    assert_eq!(parse_ok(&input).segment_types().len(), non_empty);
}
