//! Position Form Component
//!
//! Name, description and parent fields with inline validation. Used for
//! both creating and editing.

use leptos::prelude::*;
use leptos::ev::SubmitEvent;
use leptos::task::spawn_local;
use position_core::{parent_options, Position, PositionDraft};

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

const DELETE_PROMPT: &str =
    "Deleting this position will also delete all of its sub-positions. Are you sure?";

/// Create form when `editing` is None, edit form otherwise
#[component]
pub fn PositionForm(editing: Option<Position>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let initial = editing
        .as_ref()
        .map(Position::draft)
        .unwrap_or_else(|| PositionDraft::new("", "", None));
    let (name, set_name) = signal(initial.name);
    let (description, set_description) = signal(initial.description);
    let (parent, set_parent) = signal(initial.parent_id);
    let (touched, set_touched) = signal(false);
    let (saving, set_saving) = signal(false);

    let draft = move || PositionDraft::new(name.get(), description.get(), parent.get());
    let name_error = move || {
        if !touched.get() {
            return None;
        }
        draft().validate().err().map(|err| err.to_string())
    };

    let options = move || store.positions().with(|positions| parent_options(positions));

    let editing_id = editing.as_ref().map(|position| position.id);
    let on_submit = {
        let editing = editing.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            set_touched.set(true);

            let draft = PositionDraft::new(
                name.get_untracked(),
                description.get_untracked(),
                parent.get_untracked(),
            );
            if let Err(err) = draft.validate() {
                web_sys::console::log_1(&format!("[FORM] Not submitted: {}", err).into());
                return;
            }

            set_saving.set(true);
            let editing = editing.clone();
            spawn_local(async move {
                commands::save_position(ctx, editing, draft).await;
                // The form is gone if the save closed the drawer
                let _ = set_saving.try_set(false);
            });
        }
    };

    view! {
        <form class="position-form" on:submit=on_submit>
            <label class="form-field">
                <span class="form-label">"Name"</span>
                <input
                    type="text"
                    placeholder="e.g. CTO"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    on:blur=move |_| set_touched.set(true)
                />
                {move || name_error().map(|message| view! {
                    <span class="field-error">{message}</span>
                })}
            </label>

            <label class="form-field">
                <span class="form-label">"Description"</span>
                <textarea
                    rows="4"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>
            </label>

            <label class="form-field">
                <span class="form-label">"Parent position"</span>
                <select on:change=move |ev| set_parent.set(event_target_value(&ev).parse::<u32>().ok())>
                    <For
                        each=options
                        key=|option| (option.id, option.label.clone())
                        children=move |option| {
                            let id = option.id;
                            let value = id.map(|id| id.to_string()).unwrap_or_default();
                            view! {
                                <option
                                    value=value
                                    selected=move || parent.get() == id
                                    disabled=move || id.is_some() && id == editing_id
                                >
                                    {option.label}
                                </option>
                            }
                        }
                    />
                </select>
            </label>

            <div class="form-actions">
                <button type="submit" class="primary-btn" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <button type="button" on:click=move |_| ctx.close_panel()>"Cancel"</button>
            </div>

            {editing_id.map(|id| view! {
                <div class="danger-zone">
                    <DeleteConfirmButton
                        button_class="delete-btn"
                        prompt=DELETE_PROMPT
                        on_confirm=move |_| spawn_local(async move {
                            commands::delete_position(ctx, id).await;
                        })
                    />
                </div>
            })}
        </form>
    }
}
