use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("no control named '{name}' in #{container}")]
    UnknownControl { container: String, name: String },

    #[error("invalid edit '{edit}': {reason}")]
    InvalidEdit { edit: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read form file {}: {source}", path.display())]
    FormRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse form file {}: {source}", path.display())]
    FormParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ConsoleError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_edit(edit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEdit {
            edit: edit.into(),
            reason: reason.into(),
        }
    }
}
