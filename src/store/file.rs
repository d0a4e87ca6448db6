use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::domain::{ListItem, check_list_document};

use super::{ChangeListener, FieldStore, StoreError, SubscriptionId, Subscribers};

/// Field store backed by a JSON document on disk.
///
/// The field lives at `pointer` inside the document (the whole document for
/// an empty pointer); everything else in the document is preserved on write.
/// Changes made by other processes are picked up by [`JsonFileStore::poll`].
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    pointer: String,
    tokens: Vec<String>,
    last_seen: Option<Vec<ListItem>>,
    subscribers: Subscribers,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>, pointer: &str) -> Result<Self, StoreError> {
        let (pointer, tokens) = parse_pointer(pointer)?;
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            pointer,
            tokens,
            last_seen: None,
            subscribers: Subscribers::default(),
        };
        store.last_seen = store.read()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    /// Re-read the document and notify listeners when the field changed
    /// since the last read or write. Returns whether a change was seen.
    pub fn poll(&mut self) -> Result<bool, StoreError> {
        let current = self.read()?;
        if current == self.last_seen {
            return Ok(false);
        }
        info!(path = %self.path.display(), pointer = %self.pointer, "field changed on disk");
        self.last_seen = current.clone();
        if let Some(items) = current {
            self.subscribers.notify(&items);
        }
        Ok(true)
    }

    fn load_document(&self) -> Result<Option<Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}

impl FieldStore for JsonFileStore {
    fn read(&self) -> Result<Option<Vec<ListItem>>, StoreError> {
        let Some(document) = self.load_document()? else {
            return Ok(None);
        };
        let Some(field) = lookup(&document, &self.tokens) else {
            return Ok(None);
        };
        if field.is_null() {
            return Ok(None);
        }
        check_list_document(field).map_err(StoreError::Schema)?;
        let items = serde_json::from_value(field.clone())?;
        Ok(Some(items))
    }

    fn write(&mut self, items: &[ListItem]) -> Result<(), StoreError> {
        let mut document = self.load_document()?.unwrap_or(Value::Null);
        let field = serde_json::to_value(items)?;
        insert_at(&mut document, &self.tokens, field).map_err(|message| StoreError::Pointer {
            pointer: self.pointer.clone(),
            message,
        })?;
        let rendered = serde_json::to_string_pretty(&document)?;
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(&self.path, rendered).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        debug!(path = %self.path.display(), count = items.len(), "field written");
        self.last_seen = Some(items.to_vec());
        self.subscribers.notify(items);
        Ok(())
    }

    fn subscribe(&mut self, listener: ChangeListener) -> SubscriptionId {
        self.subscribers.add(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.remove(id);
    }

    fn refresh(&mut self) -> Result<bool, StoreError> {
        self.poll()
    }
}

/// Accepts plain JSON pointers (`/fields/addresses`) and URI fragments
/// (`#/fields/home%20address`).
fn parse_pointer(raw: &str) -> Result<(String, Vec<String>), StoreError> {
    let trimmed = raw.trim();
    let pointer = if let Some(fragment) = trimmed.strip_prefix('#') {
        percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|err| StoreError::Pointer {
                pointer: raw.to_string(),
                message: format!("invalid percent-encoding: {err}"),
            })?
            .to_string()
    } else {
        trimmed.to_string()
    };
    if pointer.is_empty() {
        return Ok((pointer, Vec::new()));
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(StoreError::Pointer {
            pointer: raw.to_string(),
            message: "pointer must be empty or start with '/'".to_string(),
        });
    };
    let tokens = rest
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect();
    Ok((pointer, tokens))
}

fn lookup<'a>(document: &'a Value, tokens: &[String]) -> Option<&'a Value> {
    let mut current = document;
    for token in tokens {
        current = match current {
            Value::Object(map) => map.get(token)?,
            Value::Array(items) => items.get(token.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Place `value` at `tokens`, creating missing object members on the way.
///
/// Existing arrays are only descended into at an existing index, and scalars
/// are never replaced by a container, so nothing outside the field is lost.
fn insert_at(root: &mut Value, tokens: &[String], value: Value) -> Result<(), String> {
    let Some((head, rest)) = tokens.split_first() else {
        *root = value;
        return Ok(());
    };
    if root.is_null() {
        *root = Value::Object(Map::new());
    }
    match root {
        Value::Object(map) => {
            let entry = map.entry(head.clone()).or_insert(Value::Null);
            insert_at(entry, rest, value)
        }
        Value::Array(items) => {
            let len = items.len();
            let slot = head
                .parse::<usize>()
                .ok()
                .and_then(|position| items.get_mut(position))
                .ok_or_else(|| format!("'{head}' is not an index of an array of {len}"))?;
            insert_at(slot, rest, value)
        }
        other => Err(format!("cannot descend into {other} at '{head}'")),
    }
}
