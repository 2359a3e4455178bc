//! Builds presentation records for items that only exist in the flat table.

use crate::models::{FieldValue, FlatItem, ItemRecord};

pub const UNIDENTIFIED_DISPLAY_NAME: &str = "unidentifiedDisplayName";
pub const UNIDENTIFIED_RESOURCE_NAME: &str = "unidentifiedResourceName";
pub const UNIDENTIFIED_DESCRIPTION_NAME: &str = "unidentifiedDescriptionName";
pub const IDENTIFIED_DISPLAY_NAME: &str = "identifiedDisplayName";
pub const IDENTIFIED_RESOURCE_NAME: &str = "identifiedResourceName";
pub const IDENTIFIED_DESCRIPTION_NAME: &str = "identifiedDescriptionName";
pub const SLOT_COUNT: &str = "slotCount";
pub const CLASS_NUM: &str = "ClassNum";

/// The fields every derived record carries.
pub const DERIVED_FIELDS: [&str; 8] = [
    UNIDENTIFIED_DISPLAY_NAME,
    UNIDENTIFIED_RESOURCE_NAME,
    UNIDENTIFIED_DESCRIPTION_NAME,
    IDENTIFIED_DISPLAY_NAME,
    IDENTIFIED_RESOURCE_NAME,
    IDENTIFIED_DESCRIPTION_NAME,
    SLOT_COUNT,
    CLASS_NUM,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeriveError {
    #[error("flat attribute '{0}' is empty")]
    MissingField(&'static str),
    #[error("flat attribute '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Turns a flat-table row into a presentation record.
pub trait DeriveFields {
    fn derive(&self, item: &FlatItem) -> Result<ItemRecord, DeriveError>;
}

impl<F> DeriveFields for F
where
    F: Fn(&FlatItem) -> Result<ItemRecord, DeriveError>,
{
    fn derive(&self, item: &FlatItem) -> Result<ItemRecord, DeriveError> {
        self(item)
    }
}

/// Names come straight from the display name, resource names replace spaces
/// with underscores, and counts fall back to `0` when blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDeriver;

impl DeriveFields for DefaultDeriver {
    fn derive(&self, item: &FlatItem) -> Result<ItemRecord, DeriveError> {
        let name = item.display_name.trim();
        if name.is_empty() {
            return Err(DeriveError::MissingField("display_name"));
        }
        let resource = name.replace(' ', "_");

        let mut identified_description = vec![name.to_string()];
        let weight = item.weight.trim();
        if !weight.is_empty() {
            identified_description.push(format!("Weight: ^777777{weight}^000000"));
        }

        let mut record = ItemRecord::new();
        record.set(UNIDENTIFIED_DISPLAY_NAME, FieldValue::plain(name));
        record.set(UNIDENTIFIED_RESOURCE_NAME, FieldValue::plain(&resource));
        record.set(UNIDENTIFIED_DESCRIPTION_NAME, FieldValue::quoted_list([name]));
        record.set(IDENTIFIED_DISPLAY_NAME, FieldValue::plain(name));
        record.set(IDENTIFIED_RESOURCE_NAME, FieldValue::plain(&resource));
        record.set(
            IDENTIFIED_DESCRIPTION_NAME,
            FieldValue::quoted_list(identified_description),
        );
        record.set(SLOT_COUNT, FieldValue::scalar(count("slots", &item.slots)?));
        record.set(CLASS_NUM, FieldValue::scalar(count("view_id", &item.view_id)?));
        Ok(record)
    }
}

fn count(field: &'static str, value: &str) -> Result<String, DeriveError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok("0".to_string());
    }
    value
        .parse::<u32>()
        .map(|n| n.to_string())
        .map_err(|_| DeriveError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
