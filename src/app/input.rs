use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::keymap::{self, KeymapContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Save,
    Quit,
    Cancel,
    FocusToggle,
    Activate,
    FieldStep(i32),
    RowSelect(i32),
    RowMove(i32),
    StartEdit,
    DeleteRow,
    PickerStep(i32),
    PickerChoose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Action(KeyAction),
    /// Unbound key that edits text: a printable character or Backspace.
    Input(KeyEvent),
    None,
}

pub fn classify(context: KeymapContext, key: &KeyEvent) -> KeyCommand {
    if let Some(action) = keymap::classify_key(context, key) {
        return KeyCommand::Action(action);
    }
    if context == KeymapContext::List {
        return KeyCommand::None;
    }
    let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
    match key.code {
        KeyCode::Char(_) | KeyCode::Backspace if plain => KeyCommand::Input(*key),
        _ => KeyCommand::None,
    }
}
