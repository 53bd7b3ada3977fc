use std::collections::HashSet;
use std::sync::Mutex;

use crate::io::store::{ItemStore, TransportError};
use crate::model::{Item, ItemId, OwnerId};

/// In-process `ItemStore` with scriptable failures. Records every call so
/// tests can assert on exactly which requests were made.
#[derive(Debug)]
pub struct MemoryStore {
    owner_id: OwnerId,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    items: Vec<Item>,
    next_id: u64,
    /// Operation names ("list", "create", "update", "delete") that fail
    failing_ops: HashSet<&'static str>,
    /// Item ids whose update/delete fails
    failing_ids: HashSet<ItemId>,
    calls: Vec<String>,
}

impl MemoryStore {
    pub fn new(owner_id: OwnerId) -> Self {
        MemoryStore {
            owner_id,
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    pub fn with_items(owner_id: OwnerId, items: Vec<Item>) -> Self {
        let store = Self::new(owner_id);
        {
            let mut inner = store.lock();
            inner.next_id = items.iter().map(|i| i.id.0).max().unwrap_or(0) + 1;
            inner.items = items;
        }
        store
    }

    /// Make every call of the named operation fail.
    pub fn fail_op(&self, op: &'static str) {
        self.lock().failing_ops.insert(op);
    }

    /// Make updates and deletes of one item fail.
    pub fn fail_id(&self, id: ItemId) {
        self.lock().failing_ids.insert(id);
    }

    pub fn items(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    /// Calls received so far, e.g. `["list", "delete 3"]`
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Inner {
    fn record(&mut self, op: &'static str, id: Option<ItemId>) -> Result<(), TransportError> {
        let call = match id {
            Some(id) => format!("{} {}", op, id),
            None => op.to_string(),
        };
        self.calls.push(call);
        let failing = self.failing_ops.contains(op)
            || id.is_some_and(|id| self.failing_ids.contains(&id));
        if failing {
            let path = id.map(|i| i.to_string()).unwrap_or_default();
            return Err(TransportError::Status {
                method: method_for(op),
                url: format!("memory://todos/{}", path),
                status: 500,
            });
        }
        Ok(())
    }
}

fn method_for(op: &str) -> &'static str {
    match op {
        "list" => "GET",
        "create" => "POST",
        "update" => "PATCH",
        _ => "DELETE",
    }
}

impl ItemStore for MemoryStore {
    fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    fn list(&self) -> Result<Vec<Item>, TransportError> {
        let mut inner = self.lock();
        inner.record("list", None)?;
        let owner = self.owner_id;
        Ok(inner
            .items
            .iter()
            .filter(|i| i.owner_id == owner)
            .cloned()
            .collect())
    }

    fn create(&self, title: &str, completed: bool) -> Result<Item, TransportError> {
        let mut inner = self.lock();
        inner.record("create", None)?;
        let item = Item {
            id: ItemId(inner.next_id),
            title: title.to_string(),
            owner_id: self.owner_id,
            completed,
        };
        inner.next_id += 1;
        inner.items.push(item.clone());
        Ok(item)
    }

    fn update(&self, item: &Item) -> Result<Option<Item>, TransportError> {
        let mut inner = self.lock();
        inner.record("update", Some(item.id))?;
        match inner.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                *existing = item.clone();
                Ok(Some(item.clone()))
            }
            None => Err(TransportError::Status {
                method: "PATCH",
                url: format!("memory://todos/{}", item.id),
                status: 404,
            }),
        }
    }

    fn delete(&self, id: ItemId) -> Result<(), TransportError> {
        let mut inner = self.lock();
        inner.record("delete", Some(id))?;
        inner.items.retain(|i| i.id != id);
        Ok(())
    }
}
