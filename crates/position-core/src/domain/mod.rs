//! Domain Layer
//!
//! Contains the position entity and the error type shared by every layer.
//! This layer has NO external dependencies (except serde and thiserror).

mod error;
mod position;

pub use error::{PositionError, PositionResult};
pub use position::{Position, PositionDraft, NAME_MAX_CHARS};
