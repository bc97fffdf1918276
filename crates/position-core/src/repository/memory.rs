//! In-Memory Repository
//!
//! Stand-in for the remote collection: assigns sequential ids and can be
//! told to fail, so orchestration can be exercised without a server.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::traits::PositionRepository;
use crate::domain::{Position, PositionDraft, PositionError, PositionResult};

#[derive(Debug, Default)]
pub struct InMemoryPositionRepository {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    positions: Vec<Position>,
    /// None once the id space is used up
    next_id: Option<u32>,
    failing_deletes: HashSet<u32>,
    unavailable: bool,
    delete_calls: Vec<u32>,
}

impl InMemoryPositionRepository {
    pub fn new() -> Self {
        Self::with_positions(Vec::new())
    }

    /// Seed the collection; new ids continue after the largest seeded id
    pub fn with_positions(positions: Vec<Position>) -> Self {
        let next_id = match positions.iter().map(|p| p.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self {
            inner: Mutex::new(Inner {
                positions,
                next_id,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current contents of the collection
    pub fn snapshot(&self) -> Vec<Position> {
        self.lock().positions.clone()
    }

    /// Make every later delete of `id` fail with a 500
    pub fn fail_delete_of(&self, id: u32) {
        self.lock().failing_deletes.insert(id);
    }

    /// Simulate a transport outage for every operation
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Ids passed to `delete`, in call order
    pub fn delete_calls(&self) -> Vec<u32> {
        self.lock().delete_calls.clone()
    }
}

impl Inner {
    fn ensure_available(&self) -> PositionResult<()> {
        if self.unavailable {
            return Err(PositionError::RemoteUnavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn slot(&self, id: u32) -> PositionResult<usize> {
        self.positions
            .iter()
            .position(|p| p.id == id)
            .ok_or(PositionError::NotFound(id))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PositionRepository for InMemoryPositionRepository {
    async fn list(&self) -> PositionResult<Vec<Position>> {
        let inner = self.lock();
        inner.ensure_available()?;
        Ok(inner.positions.clone())
    }

    async fn get(&self, id: u32) -> PositionResult<Position> {
        let inner = self.lock();
        inner.ensure_available()?;
        let slot = inner.slot(id)?;
        Ok(inner.positions[slot].clone())
    }

    async fn create(&self, draft: &PositionDraft) -> PositionResult<Position> {
        let mut inner = self.lock();
        inner.ensure_available()?;
        let id = inner.next_id.ok_or_else(|| PositionError::RemoteRejected {
            status: 507,
            message: "no position ids left".to_string(),
        })?;
        let position = Position {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            parent_id: draft.parent_id,
        };
        inner.next_id = id.checked_add(1);
        inner.positions.push(position.clone());
        Ok(position)
    }

    async fn update(&self, position: &Position) -> PositionResult<Position> {
        let mut inner = self.lock();
        inner.ensure_available()?;
        let slot = inner.slot(position.id)?;
        inner.positions[slot] = position.clone();
        Ok(position.clone())
    }

    async fn delete(&self, id: u32) -> PositionResult<()> {
        let mut inner = self.lock();
        inner.delete_calls.push(id);
        inner.ensure_available()?;
        if inner.failing_deletes.contains(&id) {
            return Err(PositionError::RemoteRejected {
                status: 500,
                message: format!("could not delete position {}", id),
            });
        }
        let slot = inner.slot(id)?;
        inner.positions.remove(slot);
        Ok(())
    }
}
