mod components;
mod view;

pub use view::{DraftRender, FieldRender, PickerRender, RowRender, StatusTone, UiContext, draw};
