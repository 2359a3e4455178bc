//! Fixture tests for the script scanner and serializer.
//!
//! Fixtures (.lub) live in `fixtures/` next to this module.

use pretty_assertions::assert_eq;

use crate::models::{FieldValue, ItemId};
use crate::script::{DiagnosticKind, parse_script, serialize};

fn fixture(name: &str) -> String {
    let fixtures_dir = format!("{}/src/script/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(format!("{fixtures_dir}/{name}.lub")).unwrap()
}

fn id(s: &str) -> ItemId {
    ItemId::parse(s).unwrap()
}

#[test]
fn fixture_sample_parses_every_item() {
    let parsed = parse_script(&fixture("iteminfo_sample"));

    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let ids: Vec<&str> = parsed.document.records.keys().map(ItemId::as_str).collect();
    assert_eq!(ids, vec!["501", "502", "1201"]);

    let potion = parsed.document.get(&id("501")).unwrap();
    assert_eq!(potion.len(), 8);
    assert_eq!(
        potion.get("identifiedDescriptionName"),
        Some(&FieldValue::List(vec![
            r#""A potion made from red herbs.""#.into(),
            r#"-- "Restores ^00000045^000000 HP.""#.into(),
            r#""Weight: ^7777777^000000""#.into(),
        ]))
    );

    let knife = parsed.document.get(&id("1201")).unwrap();
    assert_eq!(
        knife.get("identifiedDescriptionName"),
        Some(&FieldValue::List(vec![]))
    );
    assert_eq!(knife.get("costume"), Some(&FieldValue::scalar("")));
    assert_eq!(knife.get("slotCount"), Some(&FieldValue::scalar("3")));
}

#[test]
fn fixture_sample_keeps_preamble_and_trailer() {
    let text = fixture("iteminfo_sample");
    let parsed = parse_script(&text);

    assert_eq!(
        parsed.document.preamble,
        "-- Item info table\n-- generated by hand, edit with care\ntbl = {\n"
    );
    let trailer_start = text.find("function main()").unwrap();
    assert_eq!(parsed.document.trailer, &text[trailer_start..]);
}

#[test]
fn fixture_sample_round_trips() {
    let parsed = parse_script(&fixture("iteminfo_sample"));
    let written = serialize(&parsed.document);
    let reparsed = parse_script(&written);

    assert!(reparsed.diagnostics.is_empty());
    assert_eq!(reparsed.document, parsed.document);
    assert_eq!(serialize(&reparsed.document), written);
}

#[test]
fn fixture_sample_orders_items_numerically() {
    let written = serialize(&parse_script(&fixture("iteminfo_sample")).document);
    let p501 = written.find("[501] = {").unwrap();
    let p502 = written.find("[502] = {").unwrap();
    let p1201 = written.find("[1201] = {").unwrap();
    assert!(p501 < p502 && p502 < p1201);
}

#[test]
fn fixture_without_end_marker_keeps_body() {
    let parsed = parse_script(&fixture("no_end_marker"));

    let kinds: Vec<DiagnosticKind> = parsed.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::MalformedLine, DiagnosticKind::MissingEndMarker]
    );
    assert_eq!(parsed.diagnostics[0].line, 6);
    assert_eq!(parsed.document.trailer, "");
    assert_eq!(parsed.document.item_count(), 1);
    assert_eq!(parsed.lines_read, 7);
}

#[test]
fn input_without_trailing_newline() {
    let parsed = parse_script("    [501] = {\n        slotCount = 0,\nfunction main()");
    assert_eq!(parsed.document.trailer, "function main()");
    assert_eq!(
        parsed.document.get(&id("501")).unwrap().get("slotCount"),
        Some(&FieldValue::scalar("0"))
    );
}

#[test]
fn crlf_input_is_classified() {
    let parsed = parse_script("tbl = {\r\n    [501] = {\r\n        slotCount = 0,\r\n    },\r\n}\r\nfunction main()\r\nend\r\n");
    assert!(parsed.diagnostics.is_empty());
    assert_eq!(parsed.document.preamble, "tbl = {\r\n");
    assert_eq!(parsed.document.trailer, "function main()\r\nend\r\n");
}

#[test]
fn example_scenario_round_trip() {
    let text = "-- header\n    [501] = {\n        identifiedDisplayName = \"Red Potion\",\n        slotCount = 0\n    },\n}\nfunction main()\n  print(1)\n";
    let parsed = parse_script(text);
    assert!(parsed.diagnostics.is_empty());
    assert_eq!(parsed.document.preamble, "-- header\n");
    assert_eq!(parsed.document.trailer, "function main()\n  print(1)\n");

    let record = parsed.document.get(&id("501")).unwrap();
    assert_eq!(
        record.get("identifiedDisplayName"),
        Some(&FieldValue::scalar("Red Potion"))
    );
    assert_eq!(record.get("slotCount"), Some(&FieldValue::scalar("0")));
}

#[test]
fn parsed_records_snapshot() {
    let parsed = parse_script(
        "tbl = {\n    [0501] = {\n        identifiedDisplayName = \"Red Potion\",\n        identifiedDescriptionName = {\n            \"Red herbs\",\n            -- \"Heals\",\n        },\n        slotCount = 0\n    },\n}\nfunction main()\nend\n",
    );
    assert!(parsed.diagnostics.is_empty());

    insta::assert_yaml_snapshot!(parsed.document.records, @r#"
    "0501":
      identifiedDescriptionName:
        List:
          - "\"Red herbs\""
          - "-- \"Heals\""
      identifiedDisplayName:
        Scalar: Red Potion
      slotCount:
        Scalar: "0"
    "#);
}
