// Panel records and pure list logic.
// Persistence lives in panel_store.rs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ShellError, ValidationError};
use crate::modules::navigation::normalize_url;

pub type PanelId = String;

pub fn new_panel_id() -> PanelId {
    uuid::Uuid::new_v4().to_string()
}

/// A named, persisted URL bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    // Lists written before ids existed are plain {name, url} objects;
    // parse_list fills those in.
    #[serde(default)]
    pub id: PanelId,
    pub name: String,
    pub url: String,
}

impl Panel {
    /// Validates and normalizes raw form input into a new panel.
    pub fn create(name: &str, url: &str) -> Result<Self, ValidationError> {
        let (name, url) = validate(name, url)?;
        Ok(Self {
            id: new_panel_id(),
            name,
            url,
        })
    }
}

/// Unsaved editor contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelDraft {
    pub name: String,
    pub url: String,
}

impl From<&Panel> for PanelDraft {
    fn from(panel: &Panel) -> Self {
        Self {
            name: panel.name.clone(),
            url: panel.url.clone(),
        }
    }
}

/// Trims both fields, rejects blanks, normalizes the url.
pub fn validate(name: &str, url: &str) -> Result<(String, String), ValidationError> {
    let name = name.trim();
    let url = url.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    Ok((name.to_string(), normalize_url(url)))
}

/// Parses a stored list, keeping every well-formed entry.
///
/// An unparsable blob yields an empty list; a single bad entry (missing or
/// non-string fields, blank name or url) is skipped and the rest are kept.
/// Entries without an id get `legacy-<position>`, stable until the list is
/// next written back with real ids.
pub fn parse_list(json: &str) -> Vec<Panel> {
    let entries: Vec<Value> = match serde_json::from_str(json) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("[Panels] Stored list is unreadable: {}, using empty list", e);
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<Panel>(entry) {
            Ok(mut panel) if !panel.name.trim().is_empty() && !panel.url.trim().is_empty() => {
                if panel.id.is_empty() {
                    panel.id = format!("legacy-{}", i);
                }
                Some(panel)
            }
            Ok(_) => {
                log::warn!("[Panels] Skipping blank entry at {}", i);
                None
            }
            Err(e) => {
                log::warn!("[Panels] Skipping malformed entry at {}: {}", i, e);
                None
            }
        })
        .collect()
}

pub fn position_of(panels: &[Panel], id: &str) -> Result<usize, ShellError> {
    panels
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| ShellError::PanelNotFound(id.to_string()))
}

pub fn check_position(panels: &[Panel], index: usize) -> Result<(), ShellError> {
    if index < panels.len() {
        Ok(())
    } else {
        Err(ShellError::StalePosition {
            index,
            len: panels.len(),
        })
    }
}

/// Rebuilds the list without the entry at `index`, preserving order.
/// Returns the removed panel.
pub fn without(panels: Vec<Panel>, index: usize) -> (Vec<Panel>, Option<Panel>) {
    let mut removed = None;
    let kept = panels
        .into_iter()
        .enumerate()
        .filter_map(|(i, panel)| {
            if i == index {
                removed = Some(panel);
                None
            } else {
                Some(panel)
            }
        })
        .collect();
    (kept, removed)
}
