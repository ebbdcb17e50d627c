use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatusSnapshot {
    pub connected: u64,
    pub total: u64,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Calls: {} / {}", self.connected, self.total)
    }
}

#[derive(Debug, Serialize)]
pub struct CallIdRequest<'a> {
    pub callid: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

impl ApiReply {
    /// Any JSON body is a reply; a missing or non-string `status` is simply not "ok".
    pub fn from_value(body: Value) -> Self {
        Self {
            status: body
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            message: body.get("message").cloned(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    // Replies without a message show as `undefined`.
    pub fn message_text(&self) -> String {
        match &self.message {
            None => "undefined".to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionForm {
    pub action: String,
    pub callid: String,
}

impl ActionForm {
    pub fn new(action: impl Into<String>, callid: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            callid: callid.into(),
        }
    }
}
