use std::fmt;

use crate::error::{ShellError, ValidationError};

/// Transient user-facing message produced by a navigator event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Invalid(ValidationError),
    PanelAdded,
    PanelUpdated,
    PanelDeleted,
    PanelMissing,
    SaveFailed,
    DeleteFailed,
    UrlSaveFailed,
    UrlClearFailed,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::PanelAdded | Self::PanelUpdated | Self::PanelDeleted)
    }

    /// Maps a store error to the notice shown for a failed save.
    pub(crate) fn for_save(err: &ShellError) -> Self {
        match err {
            ShellError::Validation(v) => Self::Invalid(*v),
            ShellError::PanelNotFound(_) | ShellError::StalePosition { .. } => Self::PanelMissing,
            ShellError::Io(_) | ShellError::Json(_) => Self::SaveFailed,
        }
    }

    pub(crate) fn for_delete(err: &ShellError) -> Self {
        match err {
            ShellError::PanelNotFound(_) | ShellError::StalePosition { .. } => Self::PanelMissing,
            _ => Self::DeleteFailed,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(e) => write!(f, "{}", e),
            Self::PanelAdded => f.write_str("Panel added"),
            Self::PanelUpdated => f.write_str("Panel updated"),
            Self::PanelDeleted => f.write_str("Panel deleted"),
            Self::PanelMissing => f.write_str("Panel no longer exists"),
            Self::SaveFailed => f.write_str("Error saving panel"),
            Self::DeleteFailed => f.write_str("Error deleting panel"),
            Self::UrlSaveFailed => f.write_str("Error saving URL"),
            Self::UrlClearFailed => f.write_str("Error clearing URL"),
        }
    }
}
