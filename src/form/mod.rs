mod address;
mod countries;
mod draft;
mod select;

pub use address::{AddressEditor, ValidityListener};
pub use countries::{CountryTable, countries, country_table, provinces_for};
pub use draft::{Draft, DraftField, ScalarDraft};
pub use select::SelectionWidget;
