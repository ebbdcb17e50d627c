use crate::actions::ReloadPolicy;
use crate::errors::ConsoleError;
use crate::form::EditForm;
use crate::poller::DEFAULT_POLL_INTERVAL;
use crate::presenter::ElementIds;
use std::{env, path::Path, str::FromStr, time::Duration};
use tokio::fs;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub reload: ReloadPolicy,
    pub elements: ElementIds,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: Duration::from_secs(10),
            reload: ReloadPolicy::default(),
            elements: ElementIds::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

pub fn resolve_config() -> Result<ConsoleConfig, ConsoleError> {
    resolve_config_from(|key| env::var(key).ok())
}

pub fn resolve_config_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConsoleConfig, ConsoleError> {
    let mut config = ConsoleConfig::default();

    if let Some(base_url) = lookup("CONSOLE_BASE_URL") {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConsoleError::config(format!(
                "CONSOLE_BASE_URL must be an http(s) URL, got '{base_url}'"
            )));
        }
        config.base_url = base_url;
    }
    if let Some(secs) = parse_var::<u64>(&lookup, "CONSOLE_POLL_SECS")? {
        if secs == 0 {
            return Err(ConsoleError::config("CONSOLE_POLL_SECS must be at least 1"));
        }
        config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = parse_var::<u64>(&lookup, "CONSOLE_TIMEOUT_SECS")? {
        if secs == 0 {
            return Err(ConsoleError::config("CONSOLE_TIMEOUT_SECS must be at least 1"));
        }
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(ms) = parse_var::<u64>(&lookup, "CONSOLE_RELOAD_DELAY_MS")? {
        config.reload.saved_delay = Duration::from_millis(ms);
    }
    if let Some(flag) = parse_var::<bool>(&lookup, "CONSOLE_RELOAD_ON_SAVE_ERROR")? {
        config.reload.on_save_transport_failure = flag;
    }
    if let Some(flag) = parse_var::<bool>(&lookup, "CONSOLE_RELOAD_ON_ACTION_ERROR")? {
        config.reload.on_action_transport_failure = flag;
    }

    Ok(config)
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConsoleError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConsoleError::config(format!("{key} has invalid value '{raw}'"))),
    }
}

pub async fn load_form(path: &Path) -> Result<EditForm, ConsoleError> {
    let bytes = fs::read(path).await.map_err(|source| ConsoleError::FormRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ConsoleError::FormParse {
        path: path.to_path_buf(),
        source,
    })
}
