// Tauri commands invoked by the frontend. Each one applies a single event to
// the navigator and returns a fresh snapshot to redraw from.

use std::sync::MutexGuard;

use tauri::State;

use crate::modules::notice::Notice;
use crate::modules::panel_navigator::{BackOutcome, PanelNavigator};
use crate::modules::single_navigator::SingleUrlNavigator;
use crate::prefs::FilePreferences;
use crate::state::{AppState, Shell, Snapshot};
use crate::webview::WebviewSurface;

type HostShell = Shell<FilePreferences, WebviewSurface>;

fn lock<'a>(state: &'a State<AppState>) -> Result<MutexGuard<'a, HostShell>, String> {
    state.shell.lock().map_err(|e| e.to_string())
}

fn with_panels(
    state: State<AppState>,
    event: impl FnOnce(&mut PanelNavigator<FilePreferences, WebviewSurface>) -> Option<Notice>,
) -> Result<Snapshot, String> {
    let mut shell = lock(&state)?;
    let notice = match &mut *shell {
        Shell::Panels(nav) => event(nav),
        Shell::Single(_) => return Err("not available in single-URL mode".to_string()),
    };
    Ok(shell.snapshot(notice))
}

fn with_single(
    state: State<AppState>,
    event: impl FnOnce(&mut SingleUrlNavigator<FilePreferences, WebviewSurface>) -> Option<Notice>,
) -> Result<Snapshot, String> {
    let mut shell = lock(&state)?;
    let notice = match &mut *shell {
        Shell::Single(nav) => event(nav),
        Shell::Panels(_) => return Err("not available in panel mode".to_string()),
    };
    Ok(shell.snapshot(notice))
}

#[tauri::command]
pub fn get_snapshot(state: State<AppState>) -> Result<Snapshot, String> {
    let shell = lock(&state)?;
    Ok(shell.snapshot(None))
}

#[tauri::command]
pub fn add_pressed(state: State<AppState>) -> Result<Snapshot, String> {
    with_panels(state, |nav| {
        nav.add_pressed();
        None
    })
}

#[tauri::command]
pub fn edit_pressed(state: State<AppState>, id: String) -> Result<Snapshot, String> {
    with_panels(state, |nav| nav.edit_pressed(&id))
}

#[tauri::command]
pub fn open_panel(state: State<AppState>, id: String) -> Result<Snapshot, String> {
    with_panels(state, |nav| nav.open_panel(&id))
}

#[tauri::command]
pub fn save_panel(state: State<AppState>, name: String, url: String) -> Result<Snapshot, String> {
    with_panels(state, |nav| nav.save_pressed(&name, &url))
}

#[tauri::command]
pub fn request_delete(state: State<AppState>, id: String) -> Result<Snapshot, String> {
    with_panels(state, |nav| nav.request_delete(&id))
}

#[tauri::command]
pub fn confirm_delete(state: State<AppState>) -> Result<Snapshot, String> {
    with_panels(state, |nav| nav.confirm_delete())
}

#[tauri::command]
pub fn cancel_delete(state: State<AppState>) -> Result<Snapshot, String> {
    with_panels(state, |nav| {
        nav.cancel_delete();
        None
    })
}

#[tauri::command]
pub fn close_browse(state: State<AppState>) -> Result<Snapshot, String> {
    with_panels(state, |nav| {
        nav.close_pressed();
        None
    })
}

#[tauri::command]
pub fn connect(state: State<AppState>, url: String) -> Result<Snapshot, String> {
    with_single(state, |nav| nav.connect_pressed(&url))
}

#[tauri::command]
pub fn reset(state: State<AppState>) -> Result<Snapshot, String> {
    with_single(state, |nav| nav.reset_pressed())
}

/// Returns `None` when the host should apply its default back behavior.
#[tauri::command]
pub fn back_pressed(state: State<AppState>) -> Result<Option<Snapshot>, String> {
    let mut shell = lock(&state)?;
    match shell.back_pressed() {
        BackOutcome::Handled => Ok(Some(shell.snapshot(None))),
        BackOutcome::PassThrough => Ok(None),
    }
}
