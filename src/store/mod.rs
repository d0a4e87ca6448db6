//! The host's field-value store, seen from the list controller.

mod file;
mod memory;

use std::fmt;

use crate::domain::ListItem;

pub use file::JsonFileStore;
pub use memory::MemoryFieldStore;

/// Called with the full list after every write and every external change.
pub type ChangeListener = Box<dyn FnMut(&[ListItem])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse field document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("field value does not match the list schema: {}", .0.join("; "))]
    Schema(Vec<String>),
    #[error("invalid field pointer '{pointer}': {message}")]
    Pointer { pointer: String, message: String },
}

/// Read/write/subscribe access to one content field.
///
/// `read` returning `Ok(None)` means the host has never stored a value for
/// the field.
pub trait FieldStore {
    fn read(&self) -> Result<Option<Vec<ListItem>>, StoreError>;
    fn write(&mut self, items: &[ListItem]) -> Result<(), StoreError>;
    fn subscribe(&mut self, listener: ChangeListener) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Look for changes made outside this process and notify listeners.
    /// Push-based stores have nothing to do here.
    fn refresh(&mut self) -> Result<bool, StoreError> {
        Ok(false)
    }
}

/// Listener registry shared by the store implementations.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, ChangeListener)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    pub(crate) fn notify(&mut self, items: &[ListItem]) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(items);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.listeners.len())
            .finish()
    }
}
