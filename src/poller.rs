use crate::client::ApiClient;
use crate::models::StatusSnapshot;
use crate::presenter::Presenter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct StatusPoller {
    client: ApiClient,
    presenter: Arc<dyn Presenter>,
    element: String,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(
        client: ApiClient,
        presenter: Arc<dyn Presenter>,
        element: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            presenter,
            element: element.into(),
            interval,
        }
    }

    /// Polls once right away, then on every interval tick. Each tick runs as its
    /// own task, so a slow backend never holds back the next one.
    pub fn start(self) -> PollerHandle {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let client = self.client.clone();
                let presenter = Arc::clone(&self.presenter);
                let element = self.element.clone();
                tokio::spawn(async move {
                    poll_once(&client, presenter.as_ref(), &element).await;
                });
            }
        });
        PollerHandle {
            handle: Some(handle),
        }
    }
}

pub async fn poll_once(
    client: &ApiClient,
    presenter: &dyn Presenter,
    element: &str,
) -> Option<StatusSnapshot> {
    match client.fetch_status().await {
        Ok(snapshot) => {
            debug!(connected = snapshot.connected, total = snapshot.total, "call status");
            presenter.set_text(element, &snapshot.to_string());
            Some(snapshot)
        }
        Err(err) => {
            warn!("call status update failed: {err}");
            None
        }
    }
}

pub struct PollerHandle {
    handle: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn dispose(mut self) {
        self.stop();
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
