use crate::actions::{ActionOutcome, ReloadPolicy, post_changes};
use crate::client::ApiClient;
use crate::diff::ChangeSet;
use crate::errors::ConsoleError;
use crate::form::EditForm;
use crate::presenter::{
    ElementIds, MODIFIED_LABEL, NO_CHANGES_LABEL, NOTHING_TO_SAVE, Presenter, SAVED_LABEL,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// An editable configuration form bound to its save endpoint and status widgets.
pub struct EditSession {
    form: EditForm,
    client: ApiClient,
    presenter: Arc<dyn Presenter>,
    endpoint: String,
    save_status: String,
    save_button: String,
    policy: ReloadPolicy,
}

impl EditSession {
    pub fn new(
        form: EditForm,
        client: ApiClient,
        presenter: Arc<dyn Presenter>,
        endpoint: impl Into<String>,
        elements: &ElementIds,
        policy: ReloadPolicy,
    ) -> Self {
        Self {
            form,
            client,
            presenter,
            endpoint: endpoint.into(),
            save_status: elements.save_status.clone(),
            save_button: elements.save_button.clone(),
            policy,
        }
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn changes(&self) -> ChangeSet {
        self.form.changes()
    }

    pub fn set_value(&mut self, name: &str, value: &str) -> Result<ChangeSet, ConsoleError> {
        self.form.set_value(name, value)?;
        Ok(self.mark_unsaved())
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<ChangeSet, ConsoleError> {
        self.form.set_checked(name, checked)?;
        Ok(self.mark_unsaved())
    }

    pub fn apply_edit(&mut self, edit: &str) -> Result<ChangeSet, ConsoleError> {
        self.form.apply_edit(edit)?;
        Ok(self.mark_unsaved())
    }

    pub fn mark_unsaved(&self) -> ChangeSet {
        let changes = self.form.changes();
        let (label, enabled) = if changes.is_empty() {
            (NO_CHANGES_LABEL, false)
        } else {
            (MODIFIED_LABEL, true)
        };
        debug!(container = %self.form.container, changed = changes.len(), "form edited");
        self.presenter.set_text(&self.save_status, label);
        self.presenter.set_enabled(&self.save_button, enabled);
        changes
    }

    pub async fn submit(&mut self) -> ActionOutcome {
        let changes = self.form.changes();
        if changes.is_empty() {
            self.presenter.alert(NOTHING_TO_SAVE);
            self.presenter.reload(Duration::ZERO);
            return ActionOutcome::NothingToSave;
        }

        let outcome = post_changes(&self.client, &self.endpoint, &changes).await;
        match &outcome {
            ActionOutcome::Saved { changes } => {
                let fields: Vec<&str> = changes.names().collect();
                info!(endpoint = %self.endpoint, ?fields, "changes saved");
                self.presenter.set_text(&self.save_status, SAVED_LABEL);
                self.presenter.set_enabled(&self.save_button, false);
                self.form.commit(changes);
                self.presenter.reload(self.policy.saved_delay);
            }
            ActionOutcome::Rejected { message } => {
                self.presenter.alert(&format!("Failed: {message}"));
                self.presenter.reload(Duration::ZERO);
            }
            ActionOutcome::Failed { error } => {
                self.presenter.alert(&format!("Error: {error}"));
                if self.policy.on_save_transport_failure {
                    self.presenter.reload(Duration::ZERO);
                }
            }
            ActionOutcome::Completed | ActionOutcome::NothingToSave => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{DEFAULT_CONTAINER, FormControl};
    use crate::presenter::RecordingPresenter;

    fn session(presenter: Arc<RecordingPresenter>) -> EditSession {
        let form = EditForm::new(DEFAULT_CONTAINER)
            .with_control(FormControl::text("sip_proxy", "proxy.example"))
            .with_control(FormControl::checkbox("record_calls", false));
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        EditSession::new(
            form,
            client,
            presenter,
            "/api/update_sysconfig",
            &ElementIds::default(),
            ReloadPolicy::default(),
        )
    }

    #[test]
    fn indicator_tracks_change_set() {
        let presenter = Arc::new(RecordingPresenter::new());
        let mut session = session(Arc::clone(&presenter));

        let changes = session.set_checked("record_calls", true).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(presenter.text_of("save-status").as_deref(), Some(MODIFIED_LABEL));
        assert_eq!(presenter.enabled_of("save-changes-btn"), Some(true));

        let changes = session.set_checked("record_calls", false).unwrap();
        assert!(changes.is_empty());
        assert_eq!(presenter.text_of("save-status").as_deref(), Some(NO_CHANGES_LABEL));
        assert_eq!(presenter.enabled_of("save-changes-btn"), Some(false));
    }

    #[test]
    fn failed_edit_does_not_touch_indicator() {
        let presenter = Arc::new(RecordingPresenter::new());
        let mut session = session(Arc::clone(&presenter));
        assert!(session.set_value("record_calls", "x").is_err());
        assert!(presenter.events().is_empty());
    }

    #[tokio::test]
    async fn empty_change_set_skips_the_backend() {
        let presenter = Arc::new(RecordingPresenter::new());
        let mut session = session(Arc::clone(&presenter));
        let outcome = session.submit().await;
        assert_eq!(outcome, ActionOutcome::NothingToSave);
        assert_eq!(presenter.alerts(), vec![NOTHING_TO_SAVE.to_string()]);
        assert_eq!(presenter.reloads(), vec![Duration::ZERO]);
    }
}
