use crate::actions::{ActionOutcome, present_action_outcome, submit_action};
use crate::client::ApiClient;
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use crate::form::EditForm;
use crate::models::{ActionForm, StatusSnapshot};
use crate::poller::{PollerHandle, StatusPoller, poll_once};
use crate::presenter::Presenter;
use crate::session::EditSession;
use std::sync::Arc;

pub const DISCONNECT_PATH: &str = "/api/disconnect";
pub const START_RECORDING_PATH: &str = "/api/start_recording";
pub const UPDATE_ROUTE_PATH: &str = "/api/update_route";
pub const UPDATE_SYSCONFIG_PATH: &str = "/api/update_sysconfig";

pub struct Console {
    config: ConsoleConfig,
    client: ApiClient,
    presenter: Arc<dyn Presenter>,
}

impl Console {
    pub fn new(config: ConsoleConfig, presenter: Arc<dyn Presenter>) -> Result<Self, ConsoleError> {
        let client = ApiClient::new(&config.base_url, config.request_timeout)?;
        Ok(Self {
            config,
            client,
            presenter,
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn start_status_poller(&self) -> PollerHandle {
        StatusPoller::new(
            self.client.clone(),
            Arc::clone(&self.presenter),
            self.config.elements.call_status.clone(),
            self.config.poll_interval,
        )
        .start()
    }

    pub async fn refresh_status(&self) -> Option<StatusSnapshot> {
        poll_once(
            &self.client,
            self.presenter.as_ref(),
            &self.config.elements.call_status,
        )
        .await
    }

    pub async fn submit_action(&self, form: &ActionForm) -> ActionOutcome {
        let outcome = submit_action(&self.client, form).await;
        present_action_outcome(&outcome, self.presenter.as_ref(), &self.config.reload);
        outcome
    }

    pub async fn disconnect(&self, callid: &str) -> ActionOutcome {
        self.submit_action(&ActionForm::new(DISCONNECT_PATH, callid)).await
    }

    pub async fn start_recording(&self, callid: &str) -> ActionOutcome {
        self.submit_action(&ActionForm::new(START_RECORDING_PATH, callid))
            .await
    }

    pub fn edit_session(&self, form: EditForm, endpoint: &str) -> EditSession {
        EditSession::new(
            form,
            self.client.clone(),
            Arc::clone(&self.presenter),
            endpoint,
            &self.config.elements,
            self.config.reload,
        )
    }
}
