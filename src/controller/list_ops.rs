use tracing::debug;
use uuid::Uuid;

use crate::{domain::ListItem, form::Draft, store::FieldStore};

use super::{ListController, PendingEdit};

impl<S: FieldStore> ListController<S> {
    /// Open the entry `id` for inline editing.
    ///
    /// Ignored when inline edit is disabled, another edit is open, or the id
    /// is unknown.
    pub fn start_edit(&mut self, id: &str) -> bool {
        self.sync();
        if !self.options.allow_inline_edit || self.edit.is_some() {
            return false;
        }
        let Some(item) = self.item(id) else {
            return false;
        };
        let draft = Draft::from_item(item, &self.options);
        debug!(id, valid = draft.is_valid(), "edit started");
        self.edit = Some(PendingEdit {
            id: id.to_string(),
            draft,
        });
        true
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.edit.take().is_some()
    }

    /// Merge the edit draft into its entry and commit.
    ///
    /// Nothing happens while the draft is invalid. If the entry vanished
    /// through an external change, the edit is dropped without a write.
    pub fn save_edit(&mut self) -> bool {
        self.sync();
        let Some(edit) = self.edit.as_ref() else {
            return false;
        };
        if !edit.draft.is_valid() {
            return false;
        }
        let Some(position) = self.position_of(&edit.id) else {
            debug!(id = %edit.id, "edited entry no longer exists, dropping edit");
            self.edit = None;
            return false;
        };
        let mut items = self.items.clone();
        let target = &mut items[position];
        target.value = edit.draft.to_value();
        if let Some(item_type) = edit.draft.item_type() {
            target.item_type = Some(item_type);
        }
        self.edit = None;
        self.commit(items);
        true
    }

    /// Append the new-entry draft and start a fresh one.
    pub fn save_new(&mut self) -> bool {
        self.sync();
        if !self.new_draft.is_valid() {
            return false;
        }
        let item = ListItem {
            id: Uuid::new_v4().to_string(),
            value: self.new_draft.to_value(),
            item_type: self
                .new_draft
                .item_type()
                .or_else(|| self.options.item_type.clone()),
            index: self.items.len(),
        };
        debug!(id = %item.id, index = item.index, "entry added");
        let mut items = self.items.clone();
        items.push(item);
        self.commit(items);
        self.new_draft = Draft::blank(&self.options);
        true
    }

    /// Throw away whatever was typed into the new-entry draft.
    pub fn cancel_new(&mut self) {
        self.new_draft = Draft::blank(&self.options);
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.sync();
        if self.edit.is_some() {
            return false;
        }
        let Some(position) = self.position_of(id) else {
            return false;
        };
        let mut items = self.items.clone();
        items.remove(position);
        debug!(id, "entry deleted");
        self.commit(items);
        true
    }

    pub fn move_up(&mut self, id: &str) -> bool {
        self.move_entry(id, -1)
    }

    pub fn move_down(&mut self, id: &str) -> bool {
        self.move_entry(id, 1)
    }

    /// Swap the entry with the neighbour `delta` places away and commit with
    /// indices renumbered by position, so duplicate stored indices still move.
    fn move_entry(&mut self, id: &str, delta: i32) -> bool {
        self.sync();
        if self.edit.is_some() {
            return false;
        }
        let Some(position) = self.position_of(id) else {
            return false;
        };
        let Some(neighbour) = position
            .checked_add_signed(delta as isize)
            .filter(|target| *target < self.items.len())
        else {
            return false;
        };
        let mut items = self.items.clone();
        items.swap(position, neighbour);
        for (index, item) in items.iter_mut().enumerate() {
            item.index = index;
        }
        debug!(id, from = position, to = neighbour, "entry moved");
        self.commit(items);
        true
    }
}
