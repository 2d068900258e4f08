use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::SessionState;

type Release = Box<dyn FnOnce(&mut SessionState) + Send>;

/// Clears an in-flight marker if its flow is dropped before it settles.
///
/// Created right after the marker is set, under the same lock. The settling
/// path takes the state lock and calls [`InFlightGuard::disarm`] before
/// recording the outcome; any other exit (a cancelled future, a timeout, a
/// lost `select!` branch) runs `release` on drop.
pub(crate) struct InFlightGuard {
    state: Arc<RwLock<SessionState>>,
    release: Option<Release>,
}

impl InFlightGuard {
    pub(crate) fn new(
        state: Arc<RwLock<SessionState>>,
        release: impl FnOnce(&mut SessionState) + Send + 'static,
    ) -> Self {
        Self {
            state,
            release: Some(Box::new(release)),
        }
    }

    /// The flow settled normally; nothing to clean up.
    pub(crate) fn disarm(mut self) {
        self.release = None;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let Some(release) = self.release.take() else {
            return;
        };

        debug!("In-flight request abandoned, clearing its marker");
        match self.state.try_write() {
            Ok(mut state) => release(&mut state),
            Err(_) => match Handle::try_current() {
                Ok(handle) => {
                    let state = Arc::clone(&self.state);
                    handle.spawn(async move {
                        release(&mut *state.write().await);
                    });
                }
                Err(_) => warn!("No runtime to clear an abandoned in-flight marker"),
            },
        }
    }
}
