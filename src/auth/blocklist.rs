use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Store of revoked-but-not-yet-expired token identifiers.
///
/// `TokenService` consults the blocklist on every verification, so the
/// store is injected as a trait object rather than reached through a
/// global. Expired entries carry no information (the signature check
/// already rejects those tokens) and may be dropped at any time.
pub trait Blocklist: Send + Sync {
    /// Marks a token id as revoked until `exp` (unix seconds).
    fn insert(&self, jti: Uuid, exp: i64);

    /// True while the token id is revoked and its expiry has not passed.
    fn contains(&self, jti: &Uuid) -> bool;
}

/// Process-local [`Blocklist`] backed by a `HashMap` under an `RwLock`.
///
/// Revocations do not survive a restart, and multiple server instances do
/// not see each other's entries. Both are acceptable for a single-process
/// deployment; a shared store would implement the same trait.
#[derive(Debug, Default)]
pub struct InMemoryBlocklist {
    entries: RwLock<HashMap<Uuid, i64>>,
}

impl InMemoryBlocklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().expect("blocklist lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Blocklist for InMemoryBlocklist {
    fn insert(&self, jti: Uuid, exp: i64) {
        let now = Utc::now().timestamp();
        let mut entries = self.entries.write().expect("blocklist lock poisoned");
        // Each insert sweeps out entries whose tokens have expired anyway,
        // keeping the map bounded by the number of live revocations.
        entries.retain(|_, entry_exp| *entry_exp > now);
        entries.insert(jti, exp);
    }

    fn contains(&self, jti: &Uuid) -> bool {
        let now = Utc::now().timestamp();
        let entries = self.entries.read().expect("blocklist lock poisoned");
        entries.get(jti).map(|exp| *exp > now).unwrap_or(false)
    }
}
