// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, repository::Store};

pub type SharedStore = Arc<dyn Store>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
}

impl AppState {
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self { store, config }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
