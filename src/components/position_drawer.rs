//! Position Drawer Component
//!
//! Side panel hosting the create/edit form.

use leptos::prelude::*;

use crate::components::PositionForm;
use crate::context::{use_app_context, Panel};
use crate::store::{store_find_untracked, use_app_store};

#[component]
pub fn PositionDrawer() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // Rebuilt only when the panel changes, so a fresh form starts from the
    // position as it was when opened
    move || {
        let panel = ctx.panel.get();
        let editing = match panel {
            Panel::Edit(id) => store_find_untracked(&store, id),
            _ => None,
        };
        let title = match (panel, &editing) {
            (Panel::Create, _) => "Create Position".to_string(),
            (_, Some(position)) => position.name.clone(),
            _ => "Position not found".to_string(),
        };

        (panel != Panel::Closed).then(|| {
            let show_form = panel == Panel::Create || editing.is_some();
            view! {
                <aside class="drawer">
                    <div class="drawer-header">
                        <h3>{title}</h3>
                        <button class="close-btn" on:click=move |_| ctx.close_panel()>"×"</button>
                    </div>
                    {show_form.then(|| view! { <PositionForm editing=editing /> })}
                </aside>
            }
        })
    }
}
