// Sodium Library Entry Point
// Exposes all modules so the shell binary and the tests can use them.

pub mod error;
pub mod prefs;
pub mod settings;
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

#[cfg(feature = "shell")]
pub mod commands;
#[cfg(feature = "shell")]
pub mod webview;

pub use error::{ShellError, ValidationError};
pub use modules::panel_navigator::{BackOutcome, PanelNavigator, PanelView};
pub use modules::panel_store::PanelStore;
pub use modules::panels::Panel;
pub use modules::single_navigator::{SingleUrlNavigator, SingleView};
pub use modules::single_url::SingleUrlStore;
pub use modules::surface::RenderSurface;
pub use prefs::{FilePreferences, KeyValueStore, MemoryPreferences};
pub use settings::{Settings, Variant};

#[cfg(feature = "shell")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    tauri::Builder::default()
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let handle = app.handle().clone();
            let settings = Settings::load(&handle);
            let data_dir = app.path().app_data_dir()?;
            let prefs = FilePreferences::open_in(&data_dir);
            log::info!("[Shell] {:?} mode, prefs at {:?}", settings.variant, prefs.path());

            let main_window = app
                .get_window("main")
                .ok_or("main window missing from tauri.conf.json")?;
            let surface = webview::WebviewSurface::attach(&main_window, &handle)?;

            let shell = state::Shell::open(&settings, prefs, surface);
            app.manage(state::AppState::new(shell));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_snapshot,
            commands::add_pressed,
            commands::edit_pressed,
            commands::open_panel,
            commands::save_panel,
            commands::request_delete,
            commands::confirm_delete,
            commands::cancel_delete,
            commands::close_browse,
            commands::back_pressed,
            commands::connect,
            commands::reset,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
