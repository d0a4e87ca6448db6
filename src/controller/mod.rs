//! State machine behind one repeater widget.
//!
//! A [`ListController`] owns the working copy of the field's list, a standing
//! draft for the next entry and, optionally, a draft for the entry being
//! edited. Every successful mutation commits the full list through the
//! [`FieldStore`].

mod list_ops;

use std::sync::mpsc::{self, Receiver};

use tracing::{debug, warn};

use crate::{
    domain::{ListItem, WidgetOptions},
    form::{Draft, DraftField},
    store::{FieldStore, SubscriptionId},
};

/// Which draft is interactively active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState<'a> {
    /// No edit in progress; only the standing new-entry draft exists.
    Adding,
    /// The committed entry with this id is being edited.
    Editing(&'a str),
}

/// Enablement of the per-row buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowActions {
    pub move_up: bool,
    pub move_down: bool,
    pub edit: bool,
    pub delete: bool,
}

/// Whatever hosts the widget on screen.
pub trait RenderSurface {
    /// Ask the host to fit its frame to the widget's content.
    fn request_auto_resize(&mut self);
}

#[derive(Debug, Clone)]
pub struct PendingEdit {
    id: String,
    draft: Draft,
}

impl PendingEdit {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }
}

pub struct ListController<S: FieldStore> {
    store: S,
    options: WidgetOptions,
    items: Vec<ListItem>,
    new_draft: Draft,
    edit: Option<PendingEdit>,
    inbox: Receiver<Vec<ListItem>>,
    subscription: Option<SubscriptionId>,
}

impl<S: FieldStore> ListController<S> {
    /// Bind a widget to `store`.
    ///
    /// An undefined field is normalized by writing `[]` right away. An
    /// unreadable field starts empty locally but is not overwritten.
    pub fn mount(mut store: S, options: WidgetOptions) -> Self {
        let (tx, inbox) = mpsc::channel();
        let subscription = store.subscribe(Box::new(move |items: &[ListItem]| {
            let _ = tx.send(items.to_vec());
        }));
        let new_draft = Draft::blank(&options);
        let mut controller = Self {
            store,
            options,
            items: Vec::new(),
            new_draft,
            edit: None,
            inbox,
            subscription: Some(subscription),
        };
        match controller.store.read() {
            Ok(Some(mut items)) => {
                items.sort_by_key(|item| item.index);
                debug!(count = items.len(), "mounted with stored list");
                controller.items = items;
            }
            Ok(None) => {
                debug!("field undefined at mount, normalizing to []");
                controller.commit(Vec::new());
            }
            Err(err) => {
                warn!(error = %err, "field unreadable at mount, starting empty");
            }
        }
        controller.sync();
        controller
    }

    /// [`mount`](Self::mount), then ask `surface` to resize once.
    pub fn mount_on<R: RenderSurface + ?Sized>(
        store: S,
        options: WidgetOptions,
        surface: &mut R,
    ) -> Self {
        let controller = Self::mount(store, options);
        surface.request_auto_resize();
        controller
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// Committed entries, sorted by `index`.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn state(&self) -> ControllerState<'_> {
        match &self.edit {
            Some(edit) => ControllerState::Editing(&edit.id),
            None => ControllerState::Adding,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn new_draft(&self) -> &Draft {
        &self.new_draft
    }

    /// Mutable access for picker interaction. Plain field values should go
    /// through [`Self::change_new_field`].
    pub fn new_draft_mut(&mut self) -> &mut Draft {
        &mut self.new_draft
    }

    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.edit.as_ref()
    }

    pub fn edit_draft(&self) -> Option<&Draft> {
        self.edit.as_ref().map(|edit| &edit.draft)
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut Draft> {
        self.edit.as_mut().map(|edit| &mut edit.draft)
    }

    /// The draft keyboard input goes to: the edit draft while editing,
    /// otherwise the new-entry draft.
    pub fn active_draft(&self) -> &Draft {
        match &self.edit {
            Some(edit) => &edit.draft,
            None => &self.new_draft,
        }
    }

    pub fn active_draft_mut(&mut self) -> &mut Draft {
        match &mut self.edit {
            Some(edit) => &mut edit.draft,
            None => &mut self.new_draft,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn change_new_field(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        self.new_draft.set_field(field, value)
    }

    pub fn change_edit_field(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        match self.edit.as_mut() {
            Some(edit) => edit.draft.set_field(field, value),
            None => false,
        }
    }

    pub fn change_active_field(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        self.active_draft_mut().set_field(field, value)
    }

    /// Save whichever draft is active.
    pub fn save_active(&mut self) -> bool {
        if self.is_editing() {
            self.save_edit()
        } else {
            self.save_new()
        }
    }

    /// Cancel whichever draft is active.
    pub fn cancel_active(&mut self) {
        if !self.cancel_edit() {
            self.cancel_new();
        }
    }

    /// Button enablement for one row; `None` for unknown ids.
    pub fn row_actions(&self, id: &str) -> Option<RowActions> {
        let position = self.position_of(id)?;
        let idle = self.edit.is_none();
        Some(RowActions {
            move_up: idle && position > 0,
            move_down: idle && position + 1 < self.items.len(),
            edit: idle && self.options.allow_inline_edit,
            delete: idle,
        })
    }

    /// Apply the latest change pushed by the store, if any.
    ///
    /// The incoming list replaces the working list outright unless it equals
    /// it. Drafts are left as they are. Returns whether the list was replaced.
    pub fn sync(&mut self) -> bool {
        let Some(mut incoming) = self.inbox.try_iter().last() else {
            return false;
        };
        incoming.sort_by_key(|item| item.index);
        if incoming == self.items {
            return false;
        }
        debug!(
            count = incoming.len(),
            editing = self.edit.is_some(),
            "external change replaced working list"
        );
        self.items = incoming;
        true
    }

    /// Pull external changes from the store (file stores poll the disk) and
    /// apply them. A failing poll is logged and leaves the list as it was.
    pub fn refresh(&mut self) -> bool {
        if let Err(err) = self.store.refresh() {
            warn!(error = %err, "field refresh failed");
        }
        self.sync()
    }

    /// Renumber to `0..n-1` in sorted order, adopt locally, and write.
    fn commit(&mut self, mut items: Vec<ListItem>) {
        items.sort_by_key(|item| item.index);
        for (position, item) in items.iter_mut().enumerate() {
            item.index = position;
        }
        self.items = items;
        if let Err(err) = self.store.write(&self.items) {
            warn!(error = %err, "field write failed");
        } else {
            debug!(count = self.items.len(), "list committed");
        }
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl<S: FieldStore> Drop for ListController<S> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
        }
    }
}

impl<S: FieldStore> std::fmt::Debug for ListController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("options", &self.options)
            .field("items", &self.items)
            .field("new_draft", &self.new_draft)
            .field("edit", &self.edit)
            .finish_non_exhaustive()
    }
}
