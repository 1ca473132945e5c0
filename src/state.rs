//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{clock::Clock, store::AdminStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AdminStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Arc<dyn AdminStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}
