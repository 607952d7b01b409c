//! In-memory store implementations
//!
//! Used when no `DATABASE_URL` is configured and throughout the test suite.
//! Email uniqueness is enforced by the `emails` index entry, so concurrent
//! inserts of the same address race on a single shard lock rather than on a
//! separate lookup.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::core::db::models::{
    ChatEntry, NewChatEntry, NewProduct, NewUser, Product, User,
};
use crate::core::db::store::{ChatStore, ProductStore, StoreError, UserStore};

// ============================================================================
// Users
// ============================================================================

/// In-memory user table with a unique email index
#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
    emails: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a user record
    #[cfg(test)]
    pub fn remove(&self, id: Uuid) -> Option<User> {
        let (_, user) = self.users.remove(&id)?;
        self.emails.remove(&user.email);
        Some(user)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        match self.emails.entry(new_user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::new_v4(),
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    name: new_user.name,
                    created_at: Utc::now(),
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|user| user.clone()))
    }
}

// ============================================================================
// Chat
// ============================================================================

/// In-memory chat transcript keyed by owner
#[derive(Default)]
pub struct MemoryChatStore {
    entries: DashMap<Uuid, Vec<(u64, ChatEntry)>>,
    sequence: AtomicU64,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for MemoryChatStore {
    async fn append(&self, new_entry: NewChatEntry) -> Result<ChatEntry, StoreError> {
        let entry = ChatEntry {
            id: Uuid::new_v4(),
            user_id: new_entry.user_id,
            message: new_entry.message,
            response: new_entry.response,
            timestamp: new_entry.timestamp,
        };
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.entries
            .entry(entry.user_id)
            .or_default()
            .push((seq, entry.clone()));
        Ok(entry)
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ChatEntry>, StoreError> {
        let Some(owned) = self.entries.get(&user_id) else {
            return Ok(Vec::new());
        };
        let mut rows: Vec<&(u64, ChatEntry)> = owned.iter().collect();
        rows.sort_by(|(a_seq, a), (b_seq, b)| {
            b.timestamp.cmp(&a.timestamp).then(b_seq.cmp(a_seq))
        });
        Ok(rows
            .into_iter()
            .take(limit)
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}

// ============================================================================
// Products
// ============================================================================

/// In-memory product catalog
#[derive(Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Vec<Product> {
        let mut products = match self.products.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.snapshot())
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|product| product.matches(query))
            .collect())
    }

    async fn replace_all(&self, products: Vec<NewProduct>) -> Result<usize, StoreError> {
        let fresh: Vec<Product> = products
            .into_iter()
            .map(|p| Product {
                id: Uuid::new_v4(),
                name: p.name,
                description: p.description,
                price: p.price,
                category: p.category,
                stock: p.stock,
                image: p.image,
            })
            .collect();
        let count = fresh.len();
        match self.products.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
        Ok(count)
    }
}
