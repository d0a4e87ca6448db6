pub(crate) mod input;
pub(crate) mod keymap;
mod options;
mod repeater_ui;
mod runtime;
mod status;
mod terminal;

pub use options::UiOptions;
pub use repeater_ui::RepeaterUI;
pub use terminal::TerminalGuard;
