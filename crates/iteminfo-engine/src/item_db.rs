//! Reader for the comma-delimited flat item table.
//!
//! Rows look like
//! `501,Red_Potion,Red Potion,0,50,,70,,,,,0xFFFFFFFF,63,2,,,,,,{ itemheal 45,0; },{},{}`:
//! nineteen plain attributes followed by three brace-wrapped script blocks.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{FlatItem, FlatTable, ItemId};

/// Plain attributes every row must carry before its script blocks.
pub const ATTRIBUTE_COUNT: usize = 19;

/// A row that looked like an item but could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDbScan {
    pub items: FlatTable,
    /// Rows that matched the item pattern, including skipped ones.
    pub rows: usize,
    pub skipped: Vec<SkippedRow>,
}

fn row_pattern() -> &'static Regex {
    static ROW: OnceLock<Regex> = OnceLock::new();
    ROW.get_or_init(|| Regex::new(r"^\d{3,5},").expect("Invalid item row regex"))
}

/// Reads every item row of a flat table. Comment and blank lines are ignored;
/// a repeated id replaces the earlier row.
pub fn parse_item_db(text: &str) -> ItemDbScan {
    parse_item_db_into(text, FlatTable::new())
}

/// Like [`parse_item_db`], adding to items read from earlier tables.
pub fn parse_item_db_into(text: &str, items: FlatTable) -> ItemDbScan {
    let mut scan = ItemDbScan {
        items,
        ..ItemDbScan::default()
    };

    for (idx, line) in text.lines().enumerate() {
        if !row_pattern().is_match(line) {
            continue;
        }
        scan.rows += 1;
        match parse_row(line) {
            Ok((id, item)) => {
                scan.items.insert(id, item);
            }
            Err(reason) => {
                log::warn!("Skipping item row {}: {reason}", idx + 1);
                scan.skipped.push(SkippedRow {
                    line: idx + 1,
                    reason,
                });
            }
        }
    }

    log::info!(
        "Found {} items in item table ({} rows skipped)",
        scan.items.len(),
        scan.skipped.len()
    );
    scan
}

fn parse_row(line: &str) -> Result<(ItemId, FlatItem), String> {
    let mut segments = line.split(",{");
    let attribute_line = segments.next().unwrap_or_default();
    let attrs: Vec<&str> = attribute_line.split(',').map(str::trim).collect();
    if attrs.len() < ATTRIBUTE_COUNT {
        return Err(format!(
            "expected {ATTRIBUTE_COUNT} attributes, found {}",
            attrs.len()
        ));
    }

    let id = ItemId::parse(attrs[0]).map_err(|e| e.to_string())?;
    let mut script_block = || {
        segments
            .next()
            .map(|s| s.replace('}', "").trim().to_string())
            .unwrap_or_default()
    };
    let script = script_block();
    let script_on_equip = script_block();
    let script_on_unequip = script_block();

    let item = FlatItem {
        display_name: attrs[2].to_string(),
        item_type: attrs[3].to_string(),
        buy_price: attrs[4].to_string(),
        weight: attrs[6].to_string(),
        weapon_atk: attrs[7].to_string(),
        defense: attrs[8].to_string(),
        weapon_range: attrs[9].to_string(),
        slots: attrs[10].to_string(),
        job: attrs[11].to_string(),
        upper: attrs[12].to_string(),
        gender: attrs[13].to_string(),
        loc: attrs[14].to_string(),
        weapon_lvl: attrs[15].to_string(),
        required_lvl: attrs[16].to_string(),
        refineable_lvl: attrs[17].to_string(),
        view_id: attrs[18].to_string(),
        script,
        script_on_equip,
        script_on_unequip,
    };
    Ok((id, item))
}
