//! In-memory user store.
//!
//! One `HashMap` from id to [`User`] behind one [`Mutex`]. Every operation
//! takes the lock once, does all of its work (including any
//! existence check) inside that critical section, and releases it when the
//! guard drops. Nothing here is `async`, so the lock is never held across
//! an `.await`.
//!
//! The store is created once at startup and shared with handlers as an
//! `Arc<UserStore>`; tests simply build a fresh one.

pub mod id;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::models::{User, UserFields};
use id::IdGenerator;

/// Errors from store lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no user matches {0:?}")]
    NotFound(String),
}

struct Records {
    users: HashMap<String, User>,
    ids: IdGenerator,
}

/// Mutex-guarded mapping from id to user record.
pub struct UserStore {
    inner: Mutex<Records>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Records {
                users: HashMap::new(),
                ids: IdGenerator::new(),
            }),
        }
    }

    // Every mutation is a single map call, so a panic elsewhere can't leave
    // the map half-updated and a poisoned lock is safe to keep using.
    fn lock(&self) -> MutexGuard<'_, Records> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new record with a freshly generated id.
    ///
    /// Never fails; empty names and emails are stored as-is.
    pub fn create(&self, fields: UserFields) -> User {
        let user = {
            let mut records = self.lock();
            let user = User {
                id: records.ids.next_id(),
                name: fields.name,
                email: fields.email,
            };
            records.users.insert(user.id.clone(), user.clone());
            user
        };
        tracing::debug!(id = %user.id, "created user");
        user
    }

    /// Exact-key lookup.
    pub fn get(&self, id: &str) -> Result<User, StoreError> {
        self.lock()
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Linear scan for the first record with this name.
    ///
    /// Iteration order is the map's; when several users share a name, any
    /// one of them may be returned.
    pub fn get_by_name(&self, name: &str) -> Result<User, StoreError> {
        self.lock()
            .users
            .values()
            .find(|u| u.name == name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Snapshot of the whole collection.
    pub fn get_all(&self) -> HashMap<String, User> {
        self.lock().users.clone()
    }

    /// Overwrite both name and email, even with empty strings.
    pub fn replace_fields(&self, id: &str, fields: UserFields) -> Result<User, StoreError> {
        let user = {
            let mut records = self.lock();
            let user = records
                .users
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            user.name = fields.name;
            user.email = fields.email;
            user.clone()
        };
        tracing::debug!(id = %user.id, "replaced user fields");
        Ok(user)
    }

    /// Overwrite only the fields whose new value is non-empty.
    pub fn merge_fields(&self, id: &str, fields: UserFields) -> Result<User, StoreError> {
        let user = {
            let mut records = self.lock();
            let user = records
                .users
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            if !fields.name.is_empty() {
                user.name = fields.name;
            }
            if !fields.email.is_empty() {
                user.email = fields.email;
            }
            user.clone()
        };
        tracing::debug!(id = %user.id, "merged user fields");
        Ok(user)
    }

    /// Remove a record. The existence check and the removal share one lock.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.lock()
            .users
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tracing::debug!(id, "deleted user");
        Ok(())
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
