//! Application state shared across handlers

use std::sync::Arc;

use crate::db::MemoStore;

/// Shared application state
///
/// Holds no mutable data of its own; the store owns the connection pool.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn MemoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MemoStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn MemoStore {
        self.store.as_ref()
    }
}
