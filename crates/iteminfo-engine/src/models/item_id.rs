use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Largest id the item databases can address.
pub const MAX_ITEM_ID: u32 = 99_999;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemIdError {
    #[error("item id is empty")]
    Empty,
    #[error("item id '{0}' is not a decimal number")]
    NotDigits(String),
    #[error("item id '{0}' is out of range (max {MAX_ITEM_ID})")]
    OutOfRange(String),
}

/// Identifier of an item, kept in the exact digit text it was read from.
///
/// Two ids are equal when their text is equal, so `0501` and `501` are
/// distinct keys. Ordering is numeric first, then textual, which keeps a
/// `BTreeMap<ItemId, _>` in ascending numeric order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct ItemId {
    text: String,
    value: u32,
}

impl ItemId {
    pub fn parse(text: &str) -> Result<Self, ItemIdError> {
        if text.is_empty() {
            return Err(ItemIdError::Empty);
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ItemIdError::NotDigits(text.to_string()));
        }
        let significant = text.trim_start_matches('0');
        if significant.len() > 5 {
            return Err(ItemIdError::OutOfRange(text.to_string()));
        }
        let value = if significant.is_empty() {
            0
        } else {
            significant
                .parse::<u32>()
                .map_err(|_| ItemIdError::NotDigits(text.to_string()))?
        };
        if value > MAX_ITEM_ID {
            return Err(ItemIdError::OutOfRange(text.to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            value,
        })
    }

    /// The id as originally written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Decimal form written by the serializer: no extra leading zeros, but
    /// never fewer than the three digits an item header requires.
    pub fn canonical(&self) -> String {
        format!("{:03}", self.value)
    }
}

impl Ord for ItemId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for ItemId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.text
    }
}
