use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{oneshot, Mutex},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{
    render::{render, StatusView, UiState},
    RequestError, StatusApi,
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Keeps a `StatusView` in sync with the player and relays control commands.
///
/// Cloning is cheap; clones share the same transport and view. The view only
/// ever changes after a successful response, and whichever response resolves
/// last wins.
pub struct StatusPoller<V> {
    api: Arc<dyn StatusApi>,
    view: Arc<Mutex<V>>,
}

impl<V> Clone for StatusPoller<V> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            view: Arc::clone(&self.view),
        }
    }
}

impl<V: StatusView + 'static> StatusPoller<V> {
    pub fn new(api: Arc<dyn StatusApi>, view: V) -> Self {
        Self {
            api,
            view: Arc::new(Mutex::new(view)),
        }
    }

    pub fn view(&self) -> &Arc<Mutex<V>> {
        &self.view
    }

    /// Fetches `/status` and renders all four regions.
    ///
    /// On failure the error is logged and the view is left as it was. The
    /// error is also returned for callers that want to observe it.
    pub async fn refresh_status(&self) -> Result<UiState, RequestError> {
        match self.api.fetch_status().await {
            Ok(payload) => {
                let state = UiState::from_status(&payload);
                self.apply(&state).await;
                debug!(status = %payload.status, song = %payload.song, "status refreshed");
                Ok(state)
            }
            Err(err) => {
                error!(error = %err, "error fetching status");
                Err(err)
            }
        }
    }

    /// Sends `/control/{action}` and renders the returned playback state.
    /// The gesture region is not touched.
    pub async fn send_control(&self, action: &str) -> Result<UiState, RequestError> {
        match self.api.send_control(action).await {
            Ok(payload) => {
                let state = UiState::from_control(&payload);
                self.apply(&state).await;
                info!(action, status = %payload.status, "control command applied");
                Ok(state)
            }
            Err(err) => {
                error!(action, error = %err, "error controlling player");
                Err(err)
            }
        }
    }

    async fn apply(&self, state: &UiState) {
        let mut view = self.view.lock().await;
        render(state, &mut *view);
    }

    /// Spawns the repeating refresh: one tick immediately, then one per
    /// `period`. A slow request never delays or cancels the next tick.
    ///
    /// Must be called from within a tokio runtime. Panics if `period` is zero.
    pub fn start(&self, period: Duration) -> PollTask {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let poller = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(?period, "status polling started");
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let poller = poller.clone();
                        tokio::spawn(async move {
                            let _ = poller.refresh_status().await;
                        });
                    }
                }
            }
            info!("status polling stopped");
        });

        PollTask {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

/// Handle to a running refresh loop. Dropping it stops the loop.
///
/// Requests already in flight are left to finish.
pub struct PollTask {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PollTask {
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Signals the loop to exit and waits until it has.
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                error!(error = %err, "status polling task failed");
            }
        }
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }
}

#[cfg(test)]
#[path = "tests/poller_tests.rs"]
mod tests;
