//! Tree Item Component
//!
//! One position row in the hierarchy view.

use leptos::prelude::*;
use position_core::Position;

use crate::context::{use_app_context, Panel};

/// A single position row; clicking it opens the edit drawer
#[component]
pub fn TreeItem(
    position: Position,
    depth: usize,
    is_leaf: bool,
) -> impl IntoView {
    let ctx = use_app_context();

    let id = position.id;
    let name = position.name.clone();
    let description = position.description.clone();
    let indent = depth * 24;
    let is_selected = move || ctx.panel.get() == Panel::Edit(id);

    view! {
        <div
            class=move || if is_selected() { "position-row selected" } else { "position-row" }
            style=format!("margin-left: {}px;", indent)
            on:click=move |_| {
                web_sys::console::log_1(&format!("[TREE] Open position {}", id).into());
                ctx.open_edit(id);
            }
        >
            <span class="position-marker">{if is_leaf { "·" } else { "▼" }}</span>
            <span class="position-name">{name}</span>
            {(!description.is_empty()).then(|| view! {
                <span class="position-description">{description}</span>
            })}
        </div>
    }
}
