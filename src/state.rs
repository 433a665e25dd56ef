use std::sync::Arc;

use crate::store::Store;

/// Shared handler state. Handlers only see the `Store` trait, so the
/// concrete backend can be swapped without touching them.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
