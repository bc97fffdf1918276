//! Position Store
//!
//! Client-side source of truth for the positions list. State is a plain
//! value advanced by a pure reducer; `PositionStore` runs the remote calls,
//! applies their outcome and notifies subscribers.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, warn};
use serde::Serialize;

use crate::cascade;
use crate::domain::{Position, PositionDraft, PositionError, PositionResult};
use crate::hierarchy::{build_tree, TreeNode};
use crate::repository::PositionRepository;

/// Snapshot of the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PositionState {
    pub positions: Vec<Position>,
    pub loading: bool,
    pub error: Option<String>,
}

/// One state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    LoadStarted,
    Loaded(Vec<Position>),
    /// A create, update or delete has been sent
    MutationStarted,
    Created(Position),
    Updated(Position),
    /// Ids removed together by a cascading delete
    Removed(Vec<u32>),
    Failed(String),
}

impl PositionState {
    /// Apply one event
    pub fn reduce(mut self, event: StateEvent) -> Self {
        match event {
            StateEvent::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            StateEvent::Loaded(positions) => {
                self.positions = positions;
                self.loading = false;
                self.error = None;
            }
            StateEvent::MutationStarted => {
                self.loading = true;
            }
            StateEvent::Created(position) => {
                self.positions.push(position);
                self.loading = false;
            }
            StateEvent::Updated(position) => {
                if let Some(slot) = self.positions.iter_mut().find(|p| p.id == position.id) {
                    *slot = position;
                }
                self.loading = false;
            }
            StateEvent::Removed(ids) => {
                let doomed: HashSet<u32> = ids.into_iter().collect();
                self.positions.retain(|p| !doomed.contains(&p.id));
                self.loading = false;
            }
            StateEvent::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
        self
    }

    pub fn find(&self, id: u32) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    /// Display tree of the current positions
    pub fn tree(&self) -> Vec<TreeNode<'_>> {
        build_tree(&self.positions)
    }
}

/// Handle returned by [`PositionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(&PositionState)>;

/// State container bound to a repository.
///
/// Single-threaded: share it with `Rc`, drive it from one task at a time.
pub struct PositionStore<R> {
    repo: R,
    state: RefCell<PositionState>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: Cell<u64>,
}

impl<R: PositionRepository> PositionStore<R> {
    pub fn new(repo: R) -> Self {
        Self::with_state(repo, PositionState::default())
    }

    pub fn with_state(repo: R, state: PositionState) -> Self {
        Self {
            repo,
            state: RefCell::new(state),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    // ========================
    // Selectors
    // ========================

    pub fn snapshot(&self) -> PositionState {
        self.state.borrow().clone()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.state.borrow().positions.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn find(&self, id: u32) -> Option<Position> {
        self.state.borrow().find(id).cloned()
    }

    /// Run `f` over the display tree of the current positions
    pub fn with_tree<T>(&self, f: impl FnOnce(&[TreeNode<'_>]) -> T) -> T {
        let state = self.state.borrow();
        let tree = state.tree();
        f(&tree)
    }

    // ========================
    // Subscriptions
    // ========================

    /// Call `subscriber` with the new state after every transition
    pub fn subscribe(&self, subscriber: impl Fn(&PositionState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Apply `event` and notify subscribers
    pub fn dispatch(&self, event: StateEvent) {
        debug!("position store: {}", event_name(&event));
        let next = {
            let mut state = self.state.borrow_mut();
            let current = std::mem::take(&mut *state);
            *state = current.reduce(event);
            state.clone()
        };

        // Callbacks may subscribe or read the store, so no borrow is held
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&next);
        }
    }

    fn fail(&self, action: &str, err: &PositionError) {
        warn!("{}: {}", action, err);
        self.dispatch(StateEvent::Failed(format!("{}: {}", action, err)));
    }

    // ========================
    // Actions
    // ========================

    /// Replace the list with the remote collection
    pub async fn load(&self) -> PositionResult<()> {
        self.dispatch(StateEvent::LoadStarted);
        match self.repo.list().await {
            Ok(positions) => {
                self.dispatch(StateEvent::Loaded(positions));
                Ok(())
            }
            Err(err) => {
                self.fail("Failed to load positions", &err);
                Err(err)
            }
        }
    }

    /// Create a position and append it with its assigned id.
    ///
    /// Invalid drafts are rejected before any request and leave state as is.
    pub async fn create(&self, draft: PositionDraft) -> PositionResult<Position> {
        draft.validate()?;
        self.dispatch(StateEvent::MutationStarted);
        match self.repo.create(&draft).await {
            Ok(created) => {
                self.dispatch(StateEvent::Created(created.clone()));
                Ok(created)
            }
            Err(err) => {
                self.fail("Failed to create position", &err);
                Err(err)
            }
        }
    }

    /// Replace a position in place
    pub async fn update(&self, position: Position) -> PositionResult<Position> {
        position.validate()?;
        self.dispatch(StateEvent::MutationStarted);
        match self.repo.update(&position).await {
            Ok(updated) => {
                self.dispatch(StateEvent::Updated(updated.clone()));
                Ok(updated)
            }
            Err(err) => {
                self.fail("Failed to update position", &err);
                Err(err)
            }
        }
    }

    /// Delete `id` and its descendants, then drop them all in one transition
    pub async fn delete_with_children(&self, id: u32) -> PositionResult<Vec<u32>> {
        let positions = self.positions();
        self.dispatch(StateEvent::MutationStarted);
        match cascade::delete_with_children(&self.repo, &positions, id).await {
            Ok(ids) => {
                self.dispatch(StateEvent::Removed(ids.clone()));
                Ok(ids)
            }
            Err(err) => {
                self.fail("Failed to delete position", &err);
                Err(err)
            }
        }
    }
}

fn event_name(event: &StateEvent) -> &'static str {
    match event {
        StateEvent::LoadStarted => "load started",
        StateEvent::Loaded(_) => "loaded",
        StateEvent::MutationStarted => "mutation started",
        StateEvent::Created(_) => "created",
        StateEvent::Updated(_) => "updated",
        StateEvent::Removed(_) => "removed",
        StateEvent::Failed(_) => "failed",
    }
}
