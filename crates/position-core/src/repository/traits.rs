//! Repository Layer - Core Trait
//!
//! Defines the abstract interface to the positions collection.
//! Implementations can use HTTP, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{Position, PositionDraft, PositionResult};

/// CRUD access to the remote positions collection
///
/// The collection assigns ids; clients never originate one.
/// Futures are `Send` on native targets and local on wasm32.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PositionRepository {
    /// List all positions, in collection order
    async fn list(&self) -> PositionResult<Vec<Position>>;

    /// Fetch one position by ID
    async fn get(&self, id: u32) -> PositionResult<Position>;

    /// Create a position; the result carries the assigned id
    async fn create(&self, draft: &PositionDraft) -> PositionResult<Position>;

    /// Replace an existing position
    async fn update(&self, position: &Position) -> PositionResult<Position>;

    /// Delete a position by ID
    async fn delete(&self, id: u32) -> PositionResult<()>;
}
