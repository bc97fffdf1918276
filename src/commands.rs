//! UI Actions
//!
//! Run a core store action and report the outcome to the user.

use position_core::{Position, PositionDraft, PositionError};

use crate::context::AppContext;

pub const SAVED_MESSAGE: &str = "Position saved successfully";
pub const DELETED_MESSAGE: &str = "Position deleted successfully";

/// Toast text for a failed action. Local errors (bad input) are shown as is.
fn failure_text(action: &str, err: &PositionError) -> String {
    if err.is_remote() {
        format!("Failed to {}: {}", action, err)
    } else {
        err.to_string()
    }
}

/// Fetch the whole collection
pub async fn load_positions(ctx: AppContext) {
    let store = ctx.store();
    match store.load().await {
        Ok(()) => {
            web_sys::console::log_1(&format!("[APP] Loaded {} positions", store.positions().len()).into());
        }
        Err(err) => {
            web_sys::console::error_1(&format!("[APP] Load failed: {}", err).into());
        }
    }
}

/// Create a position, or update `editing` with the draft's fields.
///
/// Closes the drawer on success. Returns whether the save went through.
pub async fn save_position(ctx: AppContext, editing: Option<Position>, draft: PositionDraft) -> bool {
    let store = ctx.store();
    let result = match editing {
        Some(existing) => store.update(existing.merged(draft)).await,
        None => store.create(draft).await,
    };

    match result {
        Ok(saved) => {
            web_sys::console::log_1(&format!("[APP] Saved position {} ({})", saved.id, saved.name).into());
            ctx.notify_success(SAVED_MESSAGE);
            ctx.close_panel();
            true
        }
        Err(err) => {
            web_sys::console::error_1(&format!("[APP] Save failed: {}", err).into());
            ctx.notify_error(failure_text("save position", &err));
            false
        }
    }
}

/// Delete a position and all of its sub-positions
pub async fn delete_position(ctx: AppContext, id: u32) -> bool {
    let store = ctx.store();
    match store.delete_with_children(id).await {
        Ok(deleted) => {
            web_sys::console::log_1(&format!("[APP] Deleted positions {:?}", deleted).into());
            ctx.notify_success(DELETED_MESSAGE);
            ctx.close_panel();
            true
        }
        Err(err) => {
            web_sys::console::error_1(&format!("[APP] Delete of {} failed: {}", id, err).into());
            ctx.notify_error(failure_text("delete position", &err));
            false
        }
    }
}
