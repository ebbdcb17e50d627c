use crate::client::ApiClient;
use crate::diff::ChangeSet;
use crate::models::{ActionForm, ApiReply, CallIdRequest};
use crate::presenter::Presenter;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Completed,
    Saved { changes: ChangeSet },
    NothingToSave,
    Rejected { message: String },
    Failed { error: String },
}

impl ActionOutcome {
    fn from_reply(reply: ApiReply, on_ok: impl FnOnce() -> ActionOutcome) -> Self {
        if reply.is_ok() {
            on_ok()
        } else {
            Self::Rejected {
                message: reply.message_text(),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed | Self::Saved { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadPolicy {
    pub saved_delay: Duration,
    pub on_action_transport_failure: bool,
    pub on_save_transport_failure: bool,
}

impl Default for ReloadPolicy {
    fn default() -> Self {
        Self {
            saved_delay: Duration::from_millis(500),
            on_action_transport_failure: true,
            on_save_transport_failure: false,
        }
    }
}

pub async fn submit_action(client: &ApiClient, form: &ActionForm) -> ActionOutcome {
    let request = CallIdRequest {
        callid: &form.callid,
    };
    match client.post_json(&form.action, &request).await {
        Ok(reply) => {
            let outcome = ActionOutcome::from_reply(reply, || ActionOutcome::Completed);
            info!(action = %form.action, callid = %form.callid, ?outcome, "call action submitted");
            outcome
        }
        Err(err) => {
            warn!(action = %form.action, callid = %form.callid, "call action failed: {err}");
            ActionOutcome::Failed {
                error: err.to_string(),
            }
        }
    }
}

pub fn present_action_outcome(
    outcome: &ActionOutcome,
    presenter: &dyn Presenter,
    policy: &ReloadPolicy,
) {
    match outcome {
        ActionOutcome::Rejected { message } => {
            presenter.alert(&format!("Error: {message}"));
            presenter.reload(Duration::ZERO);
        }
        ActionOutcome::Failed { error } => {
            presenter.alert(&format!("Request failed: {error}"));
            if policy.on_action_transport_failure {
                presenter.reload(Duration::ZERO);
            }
        }
        ActionOutcome::Completed | ActionOutcome::Saved { .. } | ActionOutcome::NothingToSave => {
            presenter.reload(Duration::ZERO);
        }
    }
}

pub async fn post_changes(
    client: &ApiClient,
    endpoint: &str,
    changes: &ChangeSet,
) -> ActionOutcome {
    match client.post_json(endpoint, changes).await {
        Ok(reply) => ActionOutcome::from_reply(reply, || ActionOutcome::Saved {
            changes: changes.clone(),
        }),
        Err(err) => {
            warn!(%endpoint, "saving changes failed: {err}");
            ActionOutcome::Failed {
                error: err.to_string(),
            }
        }
    }
}
