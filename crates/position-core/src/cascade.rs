//! Cascading Delete
//!
//! Deletes a position together with everything below it.

use futures::future::join_all;
use log::{info, warn};

use crate::domain::{Position, PositionError, PositionResult};
use crate::hierarchy::descendant_ids;
use crate::repository::PositionRepository;

/// `id` followed by all of its descendants
pub fn cascade_ids(positions: &[Position], id: u32) -> Vec<u32> {
    let mut ids = vec![id];
    ids.extend(descendant_ids(positions, id));
    ids
}

/// Delete `id` and its descendants, one request per id, all in flight at once.
///
/// Waits for every request. Succeeds with the deleted ids only if all of them
/// succeeded. There is no rollback: on failure the requests that did succeed
/// stay committed, and `PartialDelete` lists the ids that did not.
pub async fn delete_with_children<R>(repo: &R, positions: &[Position], id: u32) -> PositionResult<Vec<u32>>
where
    R: PositionRepository + ?Sized,
{
    let ids = cascade_ids(positions, id);
    info!("cascading delete of position {}: {} request(s)", id, ids.len());

    let results = join_all(ids.iter().map(|&target| repo.delete(target))).await;

    let mut failed = Vec::new();
    let mut cause = None;
    for (&target, result) in ids.iter().zip(results) {
        if let Err(err) = result {
            warn!("delete of position {} failed: {}", target, err);
            failed.push(target);
            cause.get_or_insert(err);
        }
    }

    match cause {
        None => {
            info!("cascading delete of position {} complete", id);
            Ok(ids)
        }
        Some(cause) => Err(PositionError::PartialDelete {
            failed,
            attempted: ids.len(),
            cause: Box::new(cause),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PositionDraft;
    use crate::repository::InMemoryPositionRepository;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn sample() -> Vec<Position> {
        vec![
            Position::new(1, "A"),
            Position::new(2, "B").with_parent(Some(1)),
            Position::new(3, "C").with_parent(Some(2)),
            Position::new(4, "D").with_parent(Some(1)),
        ]
    }

    #[test]
    fn test_cascade_ids_starts_with_target() {
        let ids = cascade_ids(&sample(), 2);
        assert_eq!(ids, vec![2, 3]);

        let ids = cascade_ids(&sample(), 1);
        assert_eq!(ids[0], 1);
        assert_eq!(ids.into_iter().collect::<HashSet<_>>(), HashSet::from([1, 2, 3, 4]));
    }

    #[tokio::test]
    async fn test_deletes_whole_subtree() {
        let positions = sample();
        let repo = InMemoryPositionRepository::with_positions(positions.clone());

        let deleted = delete_with_children(&repo, &positions, 1).await.expect("Cascade failed");

        assert_eq!(deleted.len(), 4);
        let calls: HashSet<u32> = repo.delete_calls().into_iter().collect();
        assert_eq!(calls, HashSet::from([1, 2, 3, 4]));
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_fails_the_whole_cascade() {
        let positions = sample();
        let repo = InMemoryPositionRepository::with_positions(positions.clone());
        repo.fail_delete_of(3);

        let err = delete_with_children(&repo, &positions, 1).await.unwrap_err();

        match err {
            PositionError::PartialDelete { failed, attempted, cause } => {
                assert_eq!(failed, vec![3]);
                assert_eq!(attempted, 4);
                assert!(matches!(*cause, PositionError::RemoteRejected { status: 500, .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // Every request was still fired; the others committed
        assert_eq!(repo.delete_calls().len(), 4);
        assert_eq!(repo.snapshot(), vec![Position::new(3, "C").with_parent(Some(2))]);
    }

    /// Logs "start N" / "end N" around a yield so interleaving is visible
    #[derive(Default)]
    struct InterleavingRepository {
        log: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PositionRepository for InterleavingRepository {
        async fn list(&self) -> PositionResult<Vec<Position>> {
            unimplemented!()
        }

        async fn get(&self, _id: u32) -> PositionResult<Position> {
            unimplemented!()
        }

        async fn create(&self, _draft: &PositionDraft) -> PositionResult<Position> {
            unimplemented!()
        }

        async fn update(&self, _position: &Position) -> PositionResult<Position> {
            unimplemented!()
        }

        async fn delete(&self, id: u32) -> PositionResult<()> {
            self.log.lock().unwrap().push(format!("start {}", id));
            tokio::task::yield_now().await;
            self.log.lock().unwrap().push(format!("end {}", id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_requests_are_issued_concurrently() {
        let repo = InterleavingRepository::default();

        delete_with_children(&repo, &sample(), 1).await.expect("Cascade failed");

        let log = repo.log.lock().unwrap().clone();
        assert_eq!(log.len(), 8);
        let first_end = log.iter().position(|entry| entry.starts_with("end")).unwrap();
        assert_eq!(first_end, 4, "all deletes should start before any finishes: {:?}", log);
    }
}
