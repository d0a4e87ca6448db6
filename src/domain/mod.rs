mod item;
mod params;
mod schema;

pub use item::{Address, AddressField, ItemValue, ListItem};
pub use params::{
    DEFAULT_ADDRESS_TYPE, DEFAULT_COUNTRY, InputKind, ValueKind, WidgetOptions, WidgetParameters,
};
pub use schema::{check_list_document, list_schema};
