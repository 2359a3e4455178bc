pub mod document;
pub mod flat_item;
pub mod item_id;
pub mod record;

pub use document::{Document, ItemMap};
pub use flat_item::{FlatItem, FlatTable};
pub use item_id::{ItemId, ItemIdError, MAX_ITEM_ID};
pub use record::{FieldValue, ItemRecord, escape, quote};
