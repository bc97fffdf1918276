//! Message Bar Component
//!
//! Success/error toast, cleared after a few seconds or on click.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, Message, MessageKind};

const DISMISS_AFTER_MS: u32 = 3000;

#[component]
pub fn MessageBar() -> impl IntoView {
    let ctx = use_app_context();

    Effect::new(move |_| {
        if let Some(message) = ctx.message.get() {
            spawn_local(async move {
                TimeoutFuture::new(DISMISS_AFTER_MS).await;
                ctx.dismiss_message(message.id);
            });
        }
    });

    move || {
        ctx.message.get().map(|Message { id, kind, text }| {
            let class = match kind {
                MessageKind::Success => "message-bar success",
                MessageKind::Error => "message-bar error",
            };
            view! {
                <div class=class on:click=move |_| ctx.dismiss_message(id)>{text}</div>
            }
        })
    }
}
