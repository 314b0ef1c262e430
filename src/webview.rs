// Tauri-backed render surface: a child webview labelled "content" laid over
// the main window below the close bar, collapsed while not browsing.

use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Manager, PhysicalPosition, PhysicalSize, Webview, WebviewBuilder, WebviewUrl, Window};
use url::Url;

use crate::modules::navigation::BLANK_PAGE;
use crate::modules::surface::{HistoryTracker, RenderSurface};
use crate::prefs::FilePreferences;
use crate::state::{forward_page_load, AppState, Shell};

pub const CONTENT_LABEL: &str = "content";
const CLOSE_BAR_HEIGHT: f64 = 56.0;

pub struct WebviewSurface {
    window: Window,
    webview: Webview,
    history: HistoryTracker,
    visible: bool,
}

impl WebviewSurface {
    pub fn attach(window: &Window, app: &AppHandle) -> Result<Self, Box<dyn std::error::Error>> {
        let blank = Url::parse(BLANK_PAGE)?;
        let builder = WebviewBuilder::new(CONTENT_LABEL, WebviewUrl::External(blank)).on_page_load(
            |webview, payload| {
                if !matches!(payload.event(), PageLoadEvent::Finished) {
                    return;
                }
                // State is managed after the surface exists; early loads are the blank page.
                if let Some(state) = webview.try_state::<AppState>() {
                    forward_page_load(&state.shell, payload.url().as_str());
                }
            },
        );

        let webview = window.add_child(builder, PhysicalPosition::new(0, 0), PhysicalSize::new(0, 0))?;

        // Keep the content area matched to the window while browsing.
        let handle = app.clone();
        window.on_window_event(move |event| {
            if let tauri::WindowEvent::Resized(_) = event {
                // A command holding the lock lays the surface out itself.
                if let Some(state) = handle.try_state::<AppState>() {
                    if let Ok(shell) = state.shell.try_lock() {
                        if shell.is_browsing() {
                            relayout(&shell);
                        }
                    }
                }
            }
        });

        Ok(Self {
            window: window.clone(),
            webview,
            history: HistoryTracker::new(),
            visible: false,
        })
    }

    fn layout(&self) {
        let result = if self.visible {
            self.window.inner_size().and_then(|size| {
                let scale = self.window.scale_factor().unwrap_or(1.0);
                let bar = (CLOSE_BAR_HEIGHT * scale) as u32;
                self.webview.set_bounds(tauri::Rect {
                    position: tauri::Position::Physical(PhysicalPosition::new(0, bar as i32)),
                    size: tauri::Size::Physical(PhysicalSize::new(
                        size.width,
                        size.height.saturating_sub(bar),
                    )),
                })
            })
        } else {
            self.webview.set_bounds(tauri::Rect {
                position: tauri::Position::Physical(PhysicalPosition::new(0, 0)),
                size: tauri::Size::Physical(PhysicalSize::new(0, 0)),
            })
        };

        if let Err(e) = result {
            log::warn!("[Webview] Failed to lay out content: {}", e);
        }
    }

    fn load(&self, url: &str) {
        match Url::parse(url) {
            Ok(parsed) => {
                if let Err(e) = self.webview.navigate(parsed) {
                    log::warn!("[Webview] Navigation to {} failed: {}", url, e);
                }
            }
            Err(e) => log::warn!("[Webview] Refusing to load {}: {}", url, e),
        }
    }
}

fn relayout(shell: &Shell<FilePreferences, WebviewSurface>) {
    match shell {
        Shell::Panels(nav) => nav.surface().layout(),
        Shell::Single(nav) => nav.surface().layout(),
    }
}

impl RenderSurface for WebviewSurface {
    fn navigate(&mut self, url: &str) {
        self.load(url);
        self.visible = true;
        self.layout();
    }

    fn blank(&mut self, url: &str) {
        self.history.reset_to(url);
        self.load(url);
        self.visible = false;
        self.layout();
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn go_back(&mut self) {
        let webview = &self.webview;
        if let Err(e) = self.history.step_back(|| webview.eval("window.history.back()")) {
            log::warn!("[Webview] Back navigation failed: {}", e);
        }
    }

    fn page_loaded(&mut self, url: &str) {
        self.history.on_loaded(url);
    }
}
