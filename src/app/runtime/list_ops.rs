use crate::store::FieldStore;

use super::{App, Focus};

impl<S: FieldStore> App<S> {
    fn selected_id(&self) -> Option<String> {
        self.controller
            .items()
            .get(self.selected)
            .map(|item| item.id.clone())
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.controller.items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub(super) fn select_row(&mut self, delta: i32) {
        let len = self.controller.items().len();
        if len == 0 {
            return;
        }
        let next = (self.selected as i32 + delta).clamp(0, len as i32 - 1);
        self.selected = next as usize;
    }

    pub(super) fn move_selected(&mut self, delta: i32) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let moved = if delta < 0 {
            self.controller.move_up(&id)
        } else {
            self.controller.move_down(&id)
        };
        if moved {
            if let Some(position) = self.controller.items().iter().position(|item| item.id == id) {
                self.selected = position;
            }
            self.status.info("Entry moved");
        } else if self.controller.is_editing() {
            self.status.warn("Finish or cancel the edit before reordering");
        }
    }

    pub(super) fn edit_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.status.warn("No entry to edit");
            return;
        };
        if !self.controller.options().allow_inline_edit {
            self.status.warn("Entries cannot be edited here");
            return;
        }
        if self.controller.start_edit(&id) {
            self.focus = Focus::Draft;
            self.field_cursor = 0;
            self.status.editing(&format!("entry {}", self.selected + 1));
        } else if self.controller.is_editing() {
            self.focus = Focus::Draft;
            self.status.warn("Another entry is already being edited");
        }
    }

    pub(super) fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.controller.delete(&id) {
            self.clamp_selection();
            self.status.info("Entry deleted");
            if self.controller.items().is_empty() {
                self.focus = Focus::Draft;
            }
        } else if self.controller.is_editing() {
            self.status.warn("Finish or cancel the edit before deleting");
        }
    }
}
