//! UI Components
//!
//! Reusable Leptos components.

mod tree_item;
mod position_tree_view;
mod position_drawer;
mod position_form;
mod delete_confirm_button;
mod message_bar;

pub use tree_item::TreeItem;
pub use position_tree_view::PositionTreeView;
pub use position_drawer::PositionDrawer;
pub use position_form::PositionForm;
pub use delete_confirm_button::DeleteConfirmButton;
pub use message_bar::MessageBar;
