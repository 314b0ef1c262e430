// Single-URL navigation: Setup --connect--> Browse --reset--> Setup.
// Boots straight into Browse when a url is already stored.

use serde::Serialize;

use crate::error::ShellError;
use crate::modules::notice::Notice;
use crate::modules::panel_navigator::BackOutcome;
use crate::modules::single_url::SingleUrlStore;
use crate::modules::surface::RenderSurface;
use crate::prefs::KeyValueStore;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SingleView {
    Setup,
    Browse { url: String },
}

pub struct SingleUrlNavigator<S, R> {
    store: SingleUrlStore<S>,
    surface: R,
    view: SingleView,
    blank_page: String,
}

impl<S: KeyValueStore, R: RenderSurface> SingleUrlNavigator<S, R> {
    pub fn start(store: SingleUrlStore<S>, mut surface: R, settings: &Settings) -> Self {
        let view = match store.load() {
            Some(url) => {
                log::info!("[Nav] Resuming {}", url);
                surface.navigate(&url);
                SingleView::Browse { url }
            }
            None => SingleView::Setup,
        };

        Self {
            store,
            surface,
            view,
            blank_page: settings.blank_page.clone(),
        }
    }

    pub fn view(&self) -> &SingleView {
        &self.view
    }

    pub fn store(&self) -> &SingleUrlStore<S> {
        &self.store
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn connect_pressed(&mut self, input: &str) -> Option<Notice> {
        if self.view != SingleView::Setup {
            log::debug!("[Nav] Ignoring 'connect' in {:?}", self.view);
            return None;
        }

        match self.store.store(input) {
            Ok(url) => {
                self.surface.navigate(&url);
                self.view = SingleView::Browse { url };
                None
            }
            Err(ShellError::Validation(e)) => Some(Notice::Invalid(e)),
            Err(e) => {
                log::warn!("[Nav] Saving url failed: {}", e);
                Some(Notice::UrlSaveFailed)
            }
        }
    }

    pub fn reset_pressed(&mut self) -> Option<Notice> {
        if !matches!(self.view, SingleView::Browse { .. }) {
            log::debug!("[Nav] Ignoring 'reset' in {:?}", self.view);
            return None;
        }

        if let Err(e) = self.store.clear() {
            log::warn!("[Nav] Clearing url failed: {}", e);
            return Some(Notice::UrlClearFailed);
        }
        self.surface.blank(&self.blank_page);
        self.view = SingleView::Setup;
        None
    }

    pub fn back_pressed(&mut self) -> BackOutcome {
        if matches!(self.view, SingleView::Browse { .. }) && self.surface.can_go_back() {
            self.surface.go_back();
            BackOutcome::Handled
        } else {
            BackOutcome::PassThrough
        }
    }

    pub fn page_loaded(&mut self, url: &str) {
        self.surface.page_loaded(url);
    }
}
