use std::collections::BTreeMap;

use super::{FieldValue, ItemId, ItemRecord};

/// Items read from the flat item table, keyed by id.
pub type FlatTable = BTreeMap<ItemId, FlatItem>;

/// One row of the flat item table. Every attribute is the trimmed text of its
/// column; nothing is interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatItem {
    pub display_name: String,
    pub item_type: String,
    pub buy_price: String,
    pub weight: String,
    pub weapon_atk: String,
    pub defense: String,
    pub weapon_range: String,
    pub slots: String,
    pub job: String,
    pub upper: String,
    pub gender: String,
    pub loc: String,
    pub weapon_lvl: String,
    pub required_lvl: String,
    pub refineable_lvl: String,
    pub view_id: String,
    pub script: String,
    pub script_on_equip: String,
    pub script_on_unequip: String,
}

impl FlatItem {
    /// Attribute names paired with their values, in table column order.
    pub fn attributes(&self) -> [(&'static str, &str); 19] {
        [
            ("display_name", &self.display_name),
            ("item_type", &self.item_type),
            ("buy_price", &self.buy_price),
            ("weight", &self.weight),
            ("weapon_atk", &self.weapon_atk),
            ("defense", &self.defense),
            ("weapon_range", &self.weapon_range),
            ("slots", &self.slots),
            ("job", &self.job),
            ("upper", &self.upper),
            ("gender", &self.gender),
            ("loc", &self.loc),
            ("weapon_lvl", &self.weapon_lvl),
            ("required_lvl", &self.required_lvl),
            ("refineable_lvl", &self.refineable_lvl),
            ("view_id", &self.view_id),
            ("script", &self.script),
            ("script_on_equip", &self.script_on_equip),
            ("script_on_unequip", &self.script_on_unequip),
        ]
    }

    /// Views the row as a record of scalar fields, for tabular export.
    pub fn to_record(&self) -> ItemRecord {
        self.attributes()
            .into_iter()
            .map(|(k, v)| (k, FieldValue::scalar(v)))
            .collect()
    }
}
