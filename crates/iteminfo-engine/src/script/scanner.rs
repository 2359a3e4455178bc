use crate::models::{Document, FieldValue, ItemId, ItemMap};

use super::{
    classify::{LineKind, ScriptLineClassifier, strip_line_ending},
    diagnostics::{Diagnostic, DiagnosticKind},
};

/// Where the scanner is within the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Before the first item header; lines are kept verbatim.
    Preamble,
    /// Inside the item table.
    InBody {
        item: ItemId,
        /// Key of the multi-line list currently receiving values.
        embed_key: Option<String>,
    },
    /// Past the end-of-data marker; lines are kept verbatim.
    InTrailer,
}

/// Result of scanning one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScript {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
    pub lines_read: usize,
}

impl ParsedScript {
    pub fn flagged(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

/// Line-at-a-time scanner for item-info scripts.
///
/// Feed lines (with or without their line endings) through [`push`](Self::push)
/// and collect the result with [`finish`](Self::finish).
pub struct ScriptParser {
    classifier: ScriptLineClassifier,
    state: ScanState,
    doc: Document,
    diagnostics: Vec<Diagnostic>,
    line_no: usize,
}

impl ScriptParser {
    pub fn new() -> Self {
        Self::with_records(ItemMap::new())
    }

    /// Starts from records gathered elsewhere. Items that reappear in this
    /// script are reopened and their fields assigned as usual.
    pub fn with_records(records: ItemMap) -> Self {
        Self {
            classifier: ScriptLineClassifier,
            state: ScanState::Preamble,
            doc: Document {
                records,
                ..Document::default()
            },
            diagnostics: vec![],
            line_no: 0,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn push(&mut self, line: &str) {
        self.line_no += 1;

        if self.state == ScanState::InTrailer {
            self.doc.trailer.push_str(line);
            return;
        }

        let kind = self.classifier.classify(line);
        if self.state == ScanState::Preamble {
            self.preamble_line(kind, line);
        } else {
            self.body_line(kind, line);
        }
    }

    pub fn finish(mut self) -> ParsedScript {
        if self.state != ScanState::InTrailer {
            self.flag(DiagnosticKind::MissingEndMarker, "");
        }
        log::info!(
            "Scanned {} lines: {} items, {} flagged",
            self.line_no,
            self.doc.records.len(),
            self.diagnostics.len()
        );
        ParsedScript {
            document: self.doc,
            diagnostics: self.diagnostics,
            lines_read: self.line_no,
        }
    }

    fn preamble_line(&mut self, kind: LineKind<'_>, line: &str) {
        match kind {
            LineKind::ItemHeader(id) => self.open_item(id),
            LineKind::KeyValue { .. } | LineKind::EmbedOpen { .. } | LineKind::EmbedValue { .. } => {
                // Keep it so the rewritten script still loads.
                self.flag(DiagnosticKind::OrphanField, line);
                self.doc.preamble.push_str(line);
            }
            LineKind::EndMarker | LineKind::Other => self.doc.preamble.push_str(line),
        }
    }

    fn body_line(&mut self, kind: LineKind<'_>, line: &str) {
        match kind {
            LineKind::ItemHeader(id) => self.open_item(id),
            LineKind::KeyValue { key, value } => self.set_scalar(key, value),
            LineKind::EmbedOpen { key } => self.open_embed(key),
            LineKind::EmbedValue { raw } => self.push_embed_value(raw, line),
            LineKind::EndMarker => {
                self.doc.trailer.push_str(line);
                self.state = ScanState::InTrailer;
            }
            LineKind::Other => {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('}') {
                    self.flag(DiagnosticKind::MalformedLine, line);
                }
            }
        }
    }

    fn open_item(&mut self, id: ItemId) {
        log::debug!("line {}: item {}", self.line_no, id);
        self.doc.open_record(id.clone());
        self.state = ScanState::InBody {
            item: id,
            embed_key: None,
        };
    }

    fn set_scalar(&mut self, key: &str, value: &str) {
        if let ScanState::InBody { item, embed_key } = &mut self.state {
            *embed_key = None;
            self.doc
                .open_record(item.clone())
                .set(key, FieldValue::scalar(value));
        }
    }

    fn open_embed(&mut self, key: &str) {
        if let ScanState::InBody { item, embed_key } = &mut self.state {
            *embed_key = Some(key.to_string());
            self.doc
                .open_record(item.clone())
                .set(key, FieldValue::List(vec![]));
        }
    }

    fn push_embed_value(&mut self, raw: &str, line: &str) {
        let target = match &self.state {
            ScanState::InBody {
                item,
                embed_key: Some(key),
            } => self
                .doc
                .records
                .get_mut(item)
                .and_then(|record| record.get_mut(key)),
            _ => None,
        };

        match target {
            Some(FieldValue::List(items)) => items.push(raw.to_string()),
            _ => self.flag(DiagnosticKind::OrphanEmbedValue, line),
        }
    }

    fn flag(&mut self, kind: DiagnosticKind, line: &str) {
        let diagnostic = Diagnostic {
            line: self.line_no,
            kind,
            text: strip_line_ending(line).to_string(),
        };
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemRecord;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    fn feed(parser: &mut ScriptParser, lines: &[&str]) {
        for line in lines {
            parser.push(&format!("{line}\n"));
        }
    }

    fn in_item(s: &str) -> ScanState {
        ScanState::InBody {
            item: id(s),
            embed_key: None,
        }
    }

    #[test]
    fn starts_in_preamble_and_keeps_lines_verbatim() {
        let mut parser = ScriptParser::new();
        parser.push("-- header\r\n");
        parser.push("tbl = {\n");
        assert_eq!(parser.state(), &ScanState::Preamble);
        assert_eq!(parser.document().preamble, "-- header\r\ntbl = {\n");
    }

    #[test]
    fn header_moves_into_body() {
        let mut parser = ScriptParser::new();
        feed(&mut parser, &["tbl = {", "    [501] = {"]);
        assert_eq!(parser.state(), &in_item("501"));
        assert!(parser.document().get(&id("501")).unwrap().is_empty());
    }

    #[test]
    fn key_value_sets_scalar_on_current_item() {
        let mut parser = ScriptParser::new();
        feed(
            &mut parser,
            &["    [501] = {", r#"        identifiedDisplayName = "Red Potion","#],
        );
        let record = parser.document().get(&id("501")).unwrap();
        assert_eq!(
            record.get("identifiedDisplayName"),
            Some(&FieldValue::scalar("Red Potion"))
        );
    }

    #[test]
    fn embed_open_collects_following_values() {
        let mut parser = ScriptParser::new();
        feed(
            &mut parser,
            &[
                "    [501] = {",
                "        identifiedDescriptionName = {",
                r#"            "A potion made from red herbs.","#,
                r#"            "Weight: ^7777777^000000""#,
                "        },",
            ],
        );
        assert_eq!(
            parser.state(),
            &ScanState::InBody {
                item: id("501"),
                embed_key: Some("identifiedDescriptionName".into()),
            }
        );
        let record = parser.document().get(&id("501")).unwrap();
        assert_eq!(
            record.get("identifiedDescriptionName"),
            Some(&FieldValue::List(vec![
                r#""A potion made from red herbs.""#.into(),
                r#""Weight: ^7777777^000000""#.into(),
            ]))
        );
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn key_value_closes_open_embed() {
        let mut parser = ScriptParser::new();
        feed(
            &mut parser,
            &[
                "    [501] = {",
                "        identifiedDescriptionName = {",
                "        },",
                "        slotCount = 0,",
            ],
        );
        assert_eq!(parser.state(), &in_item("501"));
    }

    #[test]
    fn embed_value_without_open_list_is_flagged() {
        let mut parser = ScriptParser::new();
        feed(&mut parser, &["    [501] = {", r#"            "stray","#]);
        let parsed = parser.finish();
        assert_eq!(parsed.flagged(DiagnosticKind::OrphanEmbedValue), 1);
        assert_eq!(parsed.diagnostics[0].line, 2);
        assert_eq!(parsed.document.get(&id("501")), Some(&ItemRecord::new()));
    }

    #[test]
    fn new_header_ends_open_embed() {
        let mut parser = ScriptParser::new();
        feed(
            &mut parser,
            &[
                "    [501] = {",
                "        identifiedDescriptionName = {",
                "    [502] = {",
                r#"            "stray","#,
            ],
        );
        let parsed = parser.finish();
        assert_eq!(parsed.flagged(DiagnosticKind::OrphanEmbedValue), 1);
    }

    #[test]
    fn repeated_header_merges_fields() {
        let mut parser = ScriptParser::new();
        feed(
            &mut parser,
            &[
                "    [501] = {",
                "        slotCount = 0,",
                r#"        identifiedDisplayName = "Old","#,
                "    },",
                "    [501] = {",
                r#"        identifiedDisplayName = "New","#,
                "    },",
            ],
        );
        let record = parser.document().get(&id("501")).unwrap();
        assert_eq!(record.get("slotCount"), Some(&FieldValue::scalar("0")));
        assert_eq!(
            record.get("identifiedDisplayName"),
            Some(&FieldValue::scalar("New"))
        );
    }

    #[test]
    fn end_marker_switches_to_trailer() {
        let mut parser = ScriptParser::new();
        feed(
            &mut parser,
            &["    [501] = {", "    },", "}", "", "function main()", "    [999] = {"],
        );
        let parsed = parser.finish();
        assert_eq!(parsed.document.trailer, "function main()\n    [999] = {\n");
        assert_eq!(parsed.document.item_count(), 1);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.lines_read, 6);
    }

    #[test]
    fn unrecognized_body_lines_are_flagged_but_braces_and_blanks_are_not() {
        let mut parser = ScriptParser::new();
        feed(
            &mut parser,
            &["    [501] = {", "", "    },", "}", "        slotCount = -1,"],
        );
        let parsed = parser.finish();
        let kinds: Vec<DiagnosticKind> = parsed.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::MalformedLine, DiagnosticKind::MissingEndMarker]
        );
        assert_eq!(parsed.diagnostics[0].line, 5);
        assert_eq!(parsed.diagnostics[0].text, "        slotCount = -1,");
    }

    #[test]
    fn field_before_any_header_stays_in_preamble() {
        let mut parser = ScriptParser::new();
        feed(&mut parser, &["        slotCount = 0,"]);
        let parsed = parser.finish();
        assert_eq!(parsed.flagged(DiagnosticKind::OrphanField), 1);
        assert_eq!(parsed.document.preamble, "        slotCount = 0,\n");
        assert!(parsed.document.records.is_empty());
    }

    #[test]
    fn missing_end_marker_is_reported_not_fatal() {
        let mut parser = ScriptParser::new();
        feed(&mut parser, &["    [501] = {", "        slotCount = 0,"]);
        let parsed = parser.finish();
        assert_eq!(parsed.flagged(DiagnosticKind::MissingEndMarker), 1);
        assert_eq!(parsed.document.trailer, "");
        assert_eq!(parsed.document.item_count(), 1);
    }

    #[test]
    fn seeded_records_are_extended() {
        let mut seed = ItemMap::new();
        let mut record = ItemRecord::new();
        record.set("slotCount", FieldValue::scalar("1"));
        seed.insert(id("501"), record);

        let mut parser = ScriptParser::with_records(seed);
        feed(
            &mut parser,
            &["    [501] = {", "        ClassNum = 2,", "    [502] = {"],
        );
        let doc = parser.finish().document;
        let record = doc.get(&id("501")).unwrap();
        assert_eq!(record.get("slotCount"), Some(&FieldValue::scalar("1")));
        assert_eq!(record.get("ClassNum"), Some(&FieldValue::scalar("2")));
        assert_eq!(doc.item_count(), 2);
    }
}
