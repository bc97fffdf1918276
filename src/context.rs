//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use position_core::{HttpPositionRepository, PositionStore};

/// The core store as used by the UI
pub type SharedStore = Rc<PositionStore<HttpPositionRepository>>;

/// What the side drawer is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Closed,
    Create,
    Edit(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Toast shown in the message bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: u32,
    pub kind: MessageKind,
    pub text: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Core store (not Send, so kept in local storage)
    store: StoredValue<SharedStore, LocalStorage>,
    /// Trigger to reload positions from the server - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload positions from the server - write
    set_reload_trigger: WriteSignal<u32>,
    /// Drawer state - read
    pub panel: ReadSignal<Panel>,
    /// Drawer state - write
    set_panel: WriteSignal<Panel>,
    /// Current toast - read
    pub message: ReadSignal<Option<Message>>,
    /// Current toast - write
    set_message: WriteSignal<Option<Message>>,
    next_message_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new(store: SharedStore) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (panel, set_panel) = signal(Panel::Closed);
        let (message, set_message) = signal::<Option<Message>>(None);
        Self {
            store: StoredValue::new_local(store),
            reload_trigger,
            set_reload_trigger,
            panel,
            set_panel,
            message,
            set_message,
            next_message_id: StoredValue::new(0),
        }
    }

    pub fn store(&self) -> SharedStore {
        self.store.get_value()
    }

    /// Trigger a reload of positions
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn open_create(&self) {
        self.set_panel.set(Panel::Create);
    }

    pub fn open_edit(&self, id: u32) {
        self.set_panel.set(Panel::Edit(id));
    }

    pub fn close_panel(&self) {
        self.set_panel.set(Panel::Closed);
    }

    pub fn notify_success(&self, text: impl Into<String>) {
        self.notify(MessageKind::Success, text.into());
    }

    pub fn notify_error(&self, text: impl Into<String>) {
        self.notify(MessageKind::Error, text.into());
    }

    fn notify(&self, kind: MessageKind, text: String) {
        self.next_message_id.update_value(|id| *id += 1);
        let id = self.next_message_id.get_value();
        self.set_message.set(Some(Message { id, kind, text }));
    }

    /// Clear the toast if it is still message `id`
    pub fn dismiss_message(&self, id: u32) {
        self.set_message.update(|current| {
            if current.as_ref().map(|m| m.id) == Some(id) {
                *current = None;
            }
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
