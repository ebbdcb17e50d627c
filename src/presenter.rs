use chrono::Local;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

pub const NO_CHANGES_LABEL: &str = "✅ No changes";
pub const MODIFIED_LABEL: &str = "🔴 Modified";
pub const SAVED_LABEL: &str = "✅ Saved successfully";
pub const NOTHING_TO_SAVE: &str = "No changes to save.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub call_status: String,
    pub edit_container: String,
    pub save_status: String,
    pub save_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            call_status: "call-status".to_string(),
            edit_container: crate::form::DEFAULT_CONTAINER.to_string(),
            save_status: "save-status".to_string(),
            save_button: "save-changes-btn".to_string(),
        }
    }
}

/// Everything the console components show to the operator goes through here.
pub trait Presenter: Send + Sync {
    fn set_text(&self, element: &str, text: &str);
    fn set_enabled(&self, element: &str, enabled: bool);
    /// Blocking notice; returns once the operator has dismissed it.
    fn alert(&self, message: &str);
    fn reload(&self, delay: Duration);
}

pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn set_text(&self, element: &str, text: &str) {
        println!("{} [{element}] {text}", Local::now().format("%H:%M:%S"));
    }

    fn set_enabled(&self, element: &str, enabled: bool) {
        info!(element, enabled, "control state changed");
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn reload(&self, delay: Duration) {
        info!(delay_ms = delay.as_millis() as u64, "reload requested");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Text { element: String, text: String },
    Enabled { element: String, enabled: bool },
    Alert(String),
    Reload(Duration),
}

#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.lock().clone()
    }

    pub fn text_of(&self, element: &str) -> Option<String> {
        self.lock().iter().rev().find_map(|event| match event {
            PresenterEvent::Text { element: id, text } if id == element => Some(text.clone()),
            _ => None,
        })
    }

    pub fn enabled_of(&self, element: &str) -> Option<bool> {
        self.lock().iter().rev().find_map(|event| match event {
            PresenterEvent::Enabled { element: id, enabled } if id == element => Some(*enabled),
            _ => None,
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn reloads(&self) -> Vec<Duration> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Reload(delay) => Some(*delay),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: PresenterEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PresenterEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Presenter for RecordingPresenter {
    fn set_text(&self, element: &str, text: &str) {
        self.push(PresenterEvent::Text {
            element: element.to_string(),
            text: text.to_string(),
        });
    }

    fn set_enabled(&self, element: &str, enabled: bool) {
        self.push(PresenterEvent::Enabled {
            element: element.to_string(),
            enabled,
        });
    }

    fn alert(&self, message: &str) {
        self.push(PresenterEvent::Alert(message.to_string()));
    }

    fn reload(&self, delay: Duration) {
        self.push(PresenterEvent::Reload(delay));
    }
}
