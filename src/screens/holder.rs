use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::models::{error::FetchError, view_state::ViewState};

/// Single writer of one screen's [`ViewState`].
///
/// Every refresh is stamped with a generation. A newer refresh, an applied
/// result or [`StateHolder::cancel`] bumps the generation, and a refresh only
/// publishes while its stamp is still current. The check runs under the
/// watch lock, so nothing stale lands after a supersede.
pub struct StateHolder<T> {
    state: Arc<watch::Sender<ViewState<T>>>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Default for StateHolder<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateHolder<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.subscribe()
    }

    /// Runs one refresh cycle on the current task.
    pub async fn refresh<F>(&self, load: F)
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        self.abort_in_flight();
        let generation = self.begin();
        let outcome = load.await;
        finish(&self.state, &self.generation, generation, outcome);
    }

    /// Starts a refresh in the background, superseding any refresh still in
    /// flight. The loading state is visible as soon as this returns.
    pub fn spawn_refresh<F>(&self, load: F)
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        // held across abort and store: only one refresh task is tracked
        let mut in_flight = self.lock_in_flight();
        supersede(&self.generation, &mut in_flight);
        let generation = self.begin();
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        *in_flight = Some(tokio::spawn(async move {
            let outcome = load.await;
            finish(&state, &current, generation, outcome);
        }));
    }

    /// Publishes an already computed outcome as a full cycle.
    pub fn apply(&self, outcome: Result<T, FetchError>) {
        self.abort_in_flight();
        let generation = self.begin();
        finish(&self.state, &self.generation, generation, outcome);
    }

    /// Drops any in-flight refresh without publishing its result.
    pub fn cancel(&self) {
        if self.abort_in_flight() {
            debug!("refresh cancelled");
        }
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }

    /// Rewrites the current payload in place. Used by display ticks; the
    /// phase is left alone.
    pub fn update_data<F>(&self, update: F)
    where
        F: FnOnce(&mut T) -> bool,
    {
        update_in_place(&self.state, update);
    }

    /// Handle for background tasks that only rewrite the payload.
    pub fn data_updater(&self) -> DataUpdater<T> {
        DataUpdater {
            state: Arc::clone(&self.state),
        }
    }

    fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
        generation
    }

    /// Returns whether a refresh was still pending.
    fn abort_in_flight(&self) -> bool {
        supersede(&self.generation, &mut self.lock_in_flight())
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct DataUpdater<T> {
    state: Arc<watch::Sender<ViewState<T>>>,
}

impl<T> DataUpdater<T> {
    pub fn update<F>(&self, update: F)
    where
        F: FnOnce(&mut T) -> bool,
    {
        update_in_place(&self.state, update);
    }
}

fn update_in_place<T, F>(state: &watch::Sender<ViewState<T>>, update: F)
where
    F: FnOnce(&mut T) -> bool,
{
    state.send_if_modified(|state| match state.data.as_mut() {
        Some(data) => update(data),
        None => false,
    });
}

fn supersede(generation: &AtomicU64, in_flight: &mut Option<JoinHandle<()>>) -> bool {
    generation.fetch_add(1, Ordering::SeqCst);
    match in_flight.take() {
        Some(handle) => {
            let pending = !handle.is_finished();
            handle.abort();
            pending
        }
        None => false,
    }
}

fn finish<T>(
    state: &watch::Sender<ViewState<T>>,
    current: &AtomicU64,
    generation: u64,
    outcome: Result<T, FetchError>,
) {
    let published = state.send_if_modified(|state| {
        if current.load(Ordering::SeqCst) != generation {
            return false;
        }
        state.is_loading = false;
        match outcome {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
            }
            Err(ref error) => {
                warn!("refresh failed: {error}");
                state.error = Some(error.user_message().to_string());
            }
        }
        true
    });
    if !published {
        debug!(generation, "stale refresh dropped");
    }
}

impl<T> Drop for StateHolder<T> {
    fn drop(&mut self) {
        let handle = self
            .in_flight
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}
