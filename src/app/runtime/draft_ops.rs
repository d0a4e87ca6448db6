use crossterm::event::{KeyCode, KeyEvent};

use crate::{
    form::{DraftField, SelectionWidget},
    store::FieldStore,
};

use super::App;

impl<S: FieldStore> App<S> {
    pub(super) fn step_field(&mut self, delta: i32) {
        self.close_picker();
        let len = self.controller.active_draft().fields().len() as i32;
        if len == 0 {
            return;
        }
        let next = (self.field_cursor as i32 + delta).rem_euclid(len);
        self.field_cursor = next as usize;
    }

    pub(super) fn active_picker(&self) -> Option<&SelectionWidget> {
        let Some(DraftField::Address(field)) = self.current_field() else {
            return None;
        };
        self.controller.active_draft().as_address_editor()?.picker(field)
    }

    fn active_picker_mut(&mut self) -> Option<&mut SelectionWidget> {
        let Some(DraftField::Address(field)) = self.current_field() else {
            return None;
        };
        self.controller
            .active_draft_mut()
            .as_address_editor_mut()?
            .picker_mut(field)
    }

    pub(super) fn active_picker_expanded(&self) -> bool {
        self.active_picker()
            .is_some_and(SelectionWidget::is_expanded)
    }

    /// Expand the picker under the cursor. `false` when the focused field
    /// is plain text.
    pub(super) fn open_picker(&mut self) -> bool {
        let Some(picker) = self.active_picker_mut() else {
            return false;
        };
        if !picker.is_expanded() {
            picker.toggle();
        }
        let label = picker.label().to_string();
        self.status
            .info(format!("Type to filter {label}, ↑/↓ and Enter to choose"));
        true
    }

    /// Collapse an expanded picker; returns whether one was open.
    pub(super) fn close_picker(&mut self) -> bool {
        match self.active_picker_mut() {
            Some(picker) if picker.is_expanded() => {
                picker.collapse();
                true
            }
            _ => false,
        }
    }

    pub(super) fn step_picker(&mut self, delta: i32) {
        if let Some(picker) = self.active_picker_mut() {
            if delta < 0 {
                picker.highlight_previous();
            } else {
                picker.highlight_next();
            }
        }
    }

    pub(super) fn choose_from_picker(&mut self) {
        let Some(DraftField::Address(field)) = self.current_field() else {
            return;
        };
        let Some(editor) = self.controller.active_draft_mut().as_address_editor_mut() else {
            return;
        };
        if editor.select_highlighted(field) {
            let chosen = editor.address().get(field).to_string();
            self.status.info(format!("{} set to {chosen}", field.label()));
        } else {
            self.status.warn("Nothing matches the filter");
        }
    }

    pub(super) fn handle_text_input(&mut self, key: &KeyEvent) {
        if self.active_picker_expanded() {
            if let Some(picker) = self.active_picker_mut() {
                match key.code {
                    KeyCode::Char(ch) => picker.push_filter_char(ch),
                    KeyCode::Backspace => picker.pop_filter_char(),
                    _ => {}
                }
            }
            return;
        }
        let Some(field) = self.current_field() else {
            return;
        };
        if self.active_picker().is_some() {
            self.status.warn("Press Enter to pick from the list");
            return;
        }
        let mut value = self
            .controller
            .active_draft()
            .get(field)
            .unwrap_or_default()
            .to_string();
        match key.code {
            KeyCode::Char(ch) => value.push(ch),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }
        self.controller.change_active_field(field, value);
        let label = field.label(&self.controller.options().label);
        self.status.editing(&label);
    }
}
