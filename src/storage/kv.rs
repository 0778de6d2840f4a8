//! Key/value store abstraction.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::Result;

/// A string store scoped to one namespace.
///
/// Keys passed in are unprefixed; `keys()` returns the full, prefixed names so
/// an export can be re-imported verbatim with [`KeyValueStore::set_raw`].
pub trait KeyValueStore {
    /// Namespace prefix applied to every key
    fn prefix(&self) -> &str;

    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Reject a key this store cannot hold. Checked before any write.
    fn validate_key(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    /// Full (prefixed) names of every key in the namespace, sorted
    fn keys(&self) -> Result<Vec<String>>;

    /// Remove every key in the namespace
    fn clear(&self) -> Result<()> {
        for full in self.keys()? {
            if let Some(key) = full.strip_prefix(self.prefix()) {
                self.remove(key)?;
            }
        }
        Ok(())
    }

    /// Read by full key name
    fn get_raw(&self, full_key: &str) -> Result<Option<String>> {
        match full_key.strip_prefix(self.prefix()) {
            Some(key) => self.get(key),
            None => Ok(None),
        }
    }

    /// The unprefixed key a full key name maps to, if it is in the namespace
    fn local_key<'a>(&self, full_key: &'a str) -> Option<&'a str> {
        full_key
            .strip_prefix(self.prefix())
            .filter(|key| !key.is_empty())
    }

    /// Write by full key name. Keys outside the namespace are ignored.
    fn set_raw(&self, full_key: &str, value: &str) -> Result<bool> {
        match self.local_key(full_key) {
            Some(key) => {
                self.set(key, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    prefix: String,
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(super::DEFAULT_KEY_PREFIX)
    }
}

impl MemoryStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            entries: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl KeyValueStore for MemoryStore {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(&self.full_key(key)).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(self.full_key(key), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(&self.full_key(key));
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .entries
            .borrow()
            .keys()
            .filter(|k| k.starts_with(&self.prefix))
            .cloned()
            .collect())
    }
}
