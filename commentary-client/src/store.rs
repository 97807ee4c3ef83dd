use futures::channel::mpsc;
use parking_lot::Mutex;

use crate::{CommentsAction, CommentsState, StoreError};

/// Owner of the comments state
///
/// All transitions go through [`Store::dispatch`], which serializes them.
#[derive(Debug, Default)]
pub struct Store {
    state: Mutex<CommentsState>,
    feeds: Mutex<Vec<mpsc::UnboundedSender<CommentsAction>>>,
}

impl Store {
    pub fn new() -> Store {
        Store::default()
    }

    pub fn with_state(state: CommentsState) -> Store {
        Store {
            state: Mutex::new(state),
            feeds: Mutex::new(Vec::new()),
        }
    }

    pub fn dispatch(&self, action: CommentsAction) -> Result<(), StoreError> {
        tracing::debug!(?action, "dispatching comments action");
        let res = self.state.lock().update(action.clone());
        match &res {
            Ok(()) => self.relay_action(action),
            Err(err) => tracing::warn!(?action, %err, "comments action rejected"),
        }
        res
    }

    /// Receive every action successfully applied from now on
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<CommentsAction> {
        let (sender, receiver) = mpsc::unbounded();
        self.feeds.lock().push(sender);
        receiver
    }

    /// Run a selector against the current state
    pub fn select<R>(&self, selector: impl FnOnce(&CommentsState) -> R) -> R {
        selector(&self.state.lock())
    }

    pub fn snapshot(&self) -> CommentsState {
        self.state.lock().clone()
    }

    fn relay_action(&self, a: CommentsAction) {
        self.feeds
            .lock()
            .retain(|f| matches!(f.unbounded_send(a.clone()), Ok(())));
    }
}
