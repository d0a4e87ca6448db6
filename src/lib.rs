#![deny(rust_2018_idioms)]

pub mod controller;
pub mod domain;
pub mod form;
pub mod store;
pub mod validation;

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
mod presentation;

pub use controller::{ControllerState, ListController, PendingEdit, RenderSurface, RowActions};
pub use domain::{
    Address, AddressField, InputKind, ItemValue, ListItem, ValueKind, WidgetOptions,
    WidgetParameters,
};
pub use form::{Draft, DraftField};
pub use store::{FieldStore, JsonFileStore, MemoryFieldStore, StoreError};
pub use validation::{AddressValidation, ItemValidation, Validation};

#[cfg(feature = "tui")]
pub use app::{RepeaterUI, TerminalGuard, UiOptions};

pub mod prelude {
    pub use super::{
        FieldStore, JsonFileStore, ListController, ListItem, MemoryFieldStore, WidgetOptions,
        WidgetParameters,
    };
    #[cfg(feature = "tui")]
    pub use super::{RepeaterUI, UiOptions};
}
