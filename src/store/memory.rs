use std::{cell::RefCell, rc::Rc};

use crate::domain::ListItem;

use super::{ChangeListener, FieldStore, StoreError, SubscriptionId, Subscribers};

#[derive(Debug, Default)]
struct Inner {
    value: Option<Vec<ListItem>>,
    writes: Vec<Vec<ListItem>>,
}

/// In-process field store.
///
/// Clones share the same backing value, so a test (or an embedding host) can
/// keep a handle to inspect writes and push external changes while the
/// controller owns another handle. Listeners run after the value is updated
/// and released, so they may read the store themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryFieldStore {
    inner: Rc<RefCell<Inner>>,
    subscribers: Rc<RefCell<Subscribers>>,
}

impl MemoryFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<ListItem>) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().value = Some(items);
        store
    }

    pub fn value(&self) -> Option<Vec<ListItem>> {
        self.inner.borrow().value.clone()
    }

    /// Every list written so far, oldest first.
    pub fn writes(&self) -> Vec<Vec<ListItem>> {
        self.inner.borrow().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Replace the value as if another editor changed it, notifying listeners.
    pub fn set_external(&self, items: Vec<ListItem>) {
        self.inner.borrow_mut().value = Some(items.clone());
        self.subscribers.borrow_mut().notify(&items);
    }
}

impl FieldStore for MemoryFieldStore {
    fn read(&self) -> Result<Option<Vec<ListItem>>, StoreError> {
        Ok(self.inner.borrow().value.clone())
    }

    fn write(&mut self, items: &[ListItem]) -> Result<(), StoreError> {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = Some(items.to_vec());
            inner.writes.push(items.to_vec());
        }
        self.subscribers.borrow_mut().notify(items);
        Ok(())
    }

    fn subscribe(&mut self, listener: ChangeListener) -> SubscriptionId {
        self.subscribers.borrow_mut().add(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.borrow_mut().remove(id);
    }
}
