//! Position Tree View Component
//!
//! Renders the hierarchy as an indented list.

use leptos::prelude::*;
use position_core::{build_tree, flatten, Position};

use crate::components::TreeItem;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn PositionTreeView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // (position, depth, is_leaf) in display order
    let rows = move || {
        let positions = store.positions().get();
        let tree = build_tree(&positions);
        let rows: Vec<(Position, usize, bool)> = flatten(&tree)
            .into_iter()
            .map(|row| (row.position.clone(), row.depth, row.is_leaf))
            .collect();
        rows
    };
    let is_empty = move || store.positions().with(|positions| positions.is_empty());

    view! {
        <div class="tree-view">
            <Show when=move || store.loading().get() && is_empty()>
                <div class="tree-status">"Loading positions..."</div>
            </Show>

            {move || store.error().get().map(|error| view! {
                <div class="tree-status error">{error}</div>
            })}

            <Show when=move || is_empty() && !store.loading().get() && store.error().with(Option::is_none)>
                <div class="tree-status">
                    "No positions found. "
                    <button class="link-btn" on:click=move |_| ctx.open_create()>
                        "Create the first position"
                    </button>
                </div>
            </Show>

            <For
                each=rows
                key=|(position, depth, is_leaf)| {
                    (
                        position.id,
                        position.name.clone(),
                        position.description.clone(),
                        position.parent_id,
                        *depth,
                        *is_leaf,
                    )
                }
                children=move |(position, depth, is_leaf)| {
                    view! { <TreeItem position=position depth=depth is_leaf=is_leaf /> }
                }
            />
        </div>
    }
}
