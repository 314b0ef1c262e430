// Shared state for the host shell, and the payload handed to the frontend.
// Everything outside the `shell` feature is plain logic and tested here.

use std::sync::{Mutex, TryLockError};

use serde::Serialize;

use crate::modules::notice::Notice;
use crate::modules::panel_navigator::{BackOutcome, PanelNavigator, PanelView};
use crate::modules::panel_store::PanelStore;
use crate::modules::panels::Panel;
use crate::modules::single_navigator::{SingleUrlNavigator, SingleView};
use crate::modules::single_url::SingleUrlStore;
use crate::modules::surface::RenderSurface;
use crate::prefs::KeyValueStore;
use crate::settings::{Settings, Variant};

/// The navigator for whichever variant the app was configured with.
pub enum Shell<S, R> {
    Panels(PanelNavigator<S, R>),
    Single(SingleUrlNavigator<S, R>),
}

impl<S: KeyValueStore, R: RenderSurface> Shell<S, R> {
    pub fn open(settings: &Settings, prefs: S, surface: R) -> Self {
        match settings.variant {
            Variant::Panels => Self::Panels(PanelNavigator::new(
                PanelStore::new(prefs),
                surface,
                settings,
            )),
            Variant::SingleUrl => Self::Single(SingleUrlNavigator::start(
                SingleUrlStore::new(prefs),
                surface,
                settings,
            )),
        }
    }

    pub fn back_pressed(&mut self) -> BackOutcome {
        match self {
            Self::Panels(nav) => nav.back_pressed(),
            Self::Single(nav) => nav.back_pressed(),
        }
    }

    pub fn page_loaded(&mut self, url: &str) {
        match self {
            Self::Panels(nav) => nav.page_loaded(url),
            Self::Single(nav) => nav.page_loaded(url),
        }
    }

    pub fn is_browsing(&self) -> bool {
        match self {
            Self::Panels(nav) => matches!(nav.view(), PanelView::Browse { .. }),
            Self::Single(nav) => matches!(nav.view(), SingleView::Browse { .. }),
        }
    }

    pub fn snapshot(&self, notice: Option<Notice>) -> Snapshot {
        let notice = notice.map(|n| NoticePayload {
            message: n.to_string(),
            is_error: n.is_error(),
        });

        match self {
            Self::Panels(nav) => Snapshot {
                variant: Variant::Panels,
                title: nav.view().title(),
                view: ShellView::Panels(nav.view().clone()),
                panels: nav.panels(),
                notice,
            },
            Self::Single(nav) => Snapshot {
                variant: Variant::SingleUrl,
                title: None,
                view: ShellView::Single(nav.view().clone()),
                panels: Vec::new(),
                notice,
            },
        }
    }
}

/// Hands a finished page load to the shell without waiting on the lock.
/// A load reported while an event holds the lock is dropped, since that
/// event is the one driving the surface. Returns whether it was applied.
pub fn forward_page_load<S: KeyValueStore, R: RenderSurface>(
    shell: &Mutex<Shell<S, R>>,
    url: &str,
) -> bool {
    match shell.try_lock() {
        Ok(mut shell) => {
            shell.page_loaded(url);
            true
        }
        Err(TryLockError::WouldBlock) => {
            log::debug!("[Shell] Busy, skipping page load of {}", url);
            false
        }
        Err(TryLockError::Poisoned(e)) => {
            log::warn!("[Shell] State lock poisoned: {}", e);
            false
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ShellView {
    Panels(PanelView),
    Single(SingleView),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoticePayload {
    pub message: String,
    pub is_error: bool,
}

/// Everything the frontend needs to redraw after an event.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub variant: Variant,
    pub view: ShellView,
    pub title: Option<&'static str>,
    pub panels: Vec<Panel>,
    pub notice: Option<NoticePayload>,
}

#[cfg(feature = "shell")]
pub struct AppState {
    pub shell: Mutex<Shell<crate::prefs::FilePreferences, crate::webview::WebviewSurface>>,
}

#[cfg(feature = "shell")]
impl AppState {
    pub fn new(shell: Shell<crate::prefs::FilePreferences, crate::webview::WebviewSurface>) -> Self {
        Self {
            shell: Mutex::new(shell),
        }
    }
}
