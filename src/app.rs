//! Position Admin Frontend App
//!
//! Header, hierarchy view and the create/edit drawer.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use position_core::{ClientConfig, HttpPositionRepository, PositionStore};
use reactive_stores::Store;

use crate::commands;
use crate::components::{MessageBar, PositionDrawer, PositionTreeView};
use crate::context::AppContext;
use crate::store::{store_apply_state, AppState, AppStateStoreFields};

/// Collection location, overridable at build time with POSITIONS_API_URL
fn client_config() -> ClientConfig {
    ClientConfig::default().with_base_url_opt(option_env!("POSITIONS_API_URL"))
}

#[component]
pub fn App() -> impl IntoView {
    let app_store = Store::new(AppState::default());
    provide_context(app_store);

    let config = client_config();
    web_sys::console::log_1(&format!("[APP] Positions collection at {}", config.collection_url()).into());
    let store = Rc::new(PositionStore::new(HttpPositionRepository::new(config)));
    store.subscribe(move |state| store_apply_state(&app_store, state));

    // Provide context to all children
    let ctx = AppContext::new(store);
    provide_context(ctx);

    // Load positions on mount and whenever a reload is requested
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading positions, trigger={}", trigger).into());
        spawn_local(commands::load_positions(ctx));
    });

    view! {
        <div class="app-layout">
            <main class="main-content">
                <header class="page-header">
                    <h1>"Employee Positions"</h1>
                    <div class="page-actions">
                        <button on:click=move |_| ctx.reload() disabled=move || app_store.loading().get()>
                            "Refresh"
                        </button>
                        <button class="primary-btn" on:click=move |_| ctx.open_create()>
                            "Create Position"
                        </button>
                    </div>
                </header>

                <MessageBar />

                <PositionTreeView />

                <p class="position-count">
                    {move || format!("{} positions", app_store.positions().with(|positions| positions.len()))}
                </p>
            </main>

            <PositionDrawer />
        </div>
    }
}
