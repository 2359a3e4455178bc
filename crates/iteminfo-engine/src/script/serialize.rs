use crate::models::{Document, FieldValue, ItemId, ItemRecord};

/// Width of one indentation level in generated item blocks.
pub const INDENT: &str = "    ";

/// Renders a document back into script text.
///
/// The preamble and trailer are written verbatim. Items are written in
/// ascending numeric id order with their fields sorted by name, so the
/// output of this function is a fixed point of parse-then-serialize.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::with_capacity(doc.preamble.len() + doc.trailer.len() + doc.records.len() * 256);
    out.push_str(&doc.preamble);
    for (id, record) in &doc.records {
        write_item(&mut out, id, record);
    }
    out.push_str("}\n");
    out.push_str(&doc.trailer);
    out
}

fn write_item(out: &mut String, id: &ItemId, record: &ItemRecord) {
    out.push_str(&format!("{INDENT}[{}] = {{\n", id.canonical()));
    for (key, value) in record.iter() {
        match value {
            FieldValue::Scalar(text) => {
                out.push_str(&format!("{INDENT}{INDENT}{key} = {},\n", render_scalar(text)));
            }
            FieldValue::List(items) => {
                out.push_str(&format!("{INDENT}{INDENT}{key} = {{\n"));
                for item in items {
                    out.push_str(&format!("{INDENT}{INDENT}{INDENT}{item},\n"));
                }
                out.push_str(&format!("{INDENT}{INDENT}}},\n"));
            }
        }
    }
    out.push_str(&format!("{INDENT}}},\n"));
}

/// Bare integers stay bare; everything else is wrapped in double quotes.
///
/// Scalars are stored without their quotes, so any escapes inside them are
/// still in source form and are not escaped again.
pub fn render_scalar(text: &str) -> String {
    if is_bare_integer(text) {
        text.to_string()
    } else {
        format!("\"{text}\"")
    }
}

fn is_bare_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
