use std::sync::Arc;
use tokio::sync::RwLock;
use crate::state::InventoryState;

/// The single critical section around [`InventoryState`].
///
/// Writers get the whole state for the duration of a synchronous closure, so a
/// read-check-write sequence can never be split by another task and nothing can
/// `.await` while the lock is held. Readers share the lock and always see a
/// fully applied state.
#[derive(Clone)]
pub struct InventoryGuard {
    state: Arc<RwLock<InventoryState>>,
}

impl InventoryGuard {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InventoryState::new())),
        }
    }

    /// Runs `f` with exclusive access to the inventory.
    pub async fn transact<R>(&self, f: impl FnOnce(&mut InventoryState) -> R) -> R {
        let mut state = self.state.write().await;
        f(&mut *state)
    }

    /// Runs `f` against a consistent read-only snapshot.
    pub async fn inspect<R>(&self, f: impl FnOnce(&InventoryState) -> R) -> R {
        let state = self.state.read().await;
        f(&*state)
    }
}

impl Default for InventoryGuard {
    fn default() -> Self {
        Self::new()
    }
}
