//! Tab-separated dump of item records for spreadsheet review.

use std::collections::HashSet;

use crate::models::{ItemId, ItemRecord};

pub const ID_COLUMN: &str = "item_id";

/// Column names: `item_id`, then every field name in first-seen order.
pub fn tsv_headers<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a ItemId, &'a ItemRecord)>,
{
    let mut headers = vec![ID_COLUMN];
    let mut seen: HashSet<&str> = HashSet::from([ID_COLUMN]);
    for (_, record) in records {
        for key in record.keys() {
            if seen.insert(key) {
                headers.push(key);
            }
        }
    }
    headers
}

/// Renders records as TSV with one row per item. Missing fields are empty
/// cells and list values are joined with spaces.
pub fn write_tsv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = (&'a ItemId, &'a ItemRecord)>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    let headers = tsv_headers(records.clone());

    let mut out = headers.join("\t");
    out.push('\n');
    for (id, record) in records {
        let row: Vec<String> = headers
            .iter()
            .map(|&header| {
                if header == ID_COLUMN {
                    id.to_string()
                } else {
                    record
                        .get(header)
                        .map(|v| cell(&v.flatten()))
                        .unwrap_or_default()
                }
            })
            .collect();
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

fn cell(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}
