//! Position Hierarchy Core
//!
//! Layered architecture:
//! - domain: Position entity, field validation and errors
//! - hierarchy: tree building, descendant resolution, display outline
//! - repository: access to the remote positions collection
//! - cascade: cascading delete orchestration
//! - store: reducer-style state container with subscribers

pub mod config;
pub mod domain;
pub mod hierarchy;
pub mod repository;
pub mod cascade;
pub mod store;

pub use config::ClientConfig;
pub use domain::{Position, PositionDraft, PositionError, PositionResult, NAME_MAX_CHARS};
pub use hierarchy::{build_tree, descendant_ids, flatten, parent_options, OutlineRow, ParentOption, TreeNode};
pub use repository::{HttpPositionRepository, InMemoryPositionRepository, PositionRepository};
pub use cascade::{cascade_ids, delete_with_children};
pub use store::{PositionState, PositionStore, StateEvent, SubscriptionId};
