// Error types shared by the stores and navigators.
// Read faults never show up here: they are recovered as empty/default values.

use serde::Serialize;

/// A required editor/setup field was left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
pub enum ValidationError {
    #[error("Enter a name")]
    EmptyName,
    #[error("Enter a URL")]
    EmptyUrl,
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("panel not found: {0}")]
    PanelNotFound(String),
    #[error("stale position {index} (list has {len} panels)")]
    StalePosition { index: usize, len: usize },
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
