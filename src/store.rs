//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The contents are
//! a mirror of the core `PositionStore`, refreshed on every state change.

use leptos::prelude::*;
use reactive_stores::Store;
use position_core::{Position, PositionState};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All positions, in server order
    pub positions: Vec<Position>,
    /// A request is in flight
    pub loading: bool,
    /// Last load/mutation failure
    pub error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Copy a core state snapshot into the reactive store.
///
/// Fields are only written when they differ so unrelated views don't rerun.
pub fn store_apply_state(store: &AppStore, state: &PositionState) {
    if store.positions().with_untracked(|current| current != &state.positions) {
        *store.positions().write() = state.positions.clone();
    }
    if store.loading().get_untracked() != state.loading {
        *store.loading().write() = state.loading;
    }
    if store.error().with_untracked(|current| current != &state.error) {
        *store.error().write() = state.error.clone();
    }
}

/// Look up a position without subscribing to changes
pub fn store_find_untracked(store: &AppStore, id: u32) -> Option<Position> {
    store
        .positions()
        .with_untracked(|positions| positions.iter().find(|p| p.id == id).cloned())
}
