// Multi-panel navigation state machine.
//
// List --add--> Editor{None} --save--> List
// List --edit(id)--> Editor{Some(id)} --save--> List
// List --open(id)--> Browse{url} --close/back--> List
//
// Events arriving in a view where they are not defined are ignored.

use serde::Serialize;

use crate::modules::notice::Notice;
use crate::modules::panel_store::PanelStore;
use crate::modules::panels::{Panel, PanelDraft, PanelId};
use crate::modules::surface::RenderSurface;
use crate::prefs::KeyValueStore;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PanelView {
    List {
        #[serde(rename = "pendingDelete")]
        pending_delete: Option<PanelId>,
    },
    Editor {
        editing: Option<PanelId>,
        draft: PanelDraft,
    },
    Browse {
        url: String,
    },
}

impl PanelView {
    fn list() -> Self {
        Self::List {
            pending_delete: None,
        }
    }

    /// Editor heading, `None` outside the editor.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::Editor { editing: None, .. } => Some("Add Panel"),
            Self::Editor { editing: Some(_), .. } => Some("Edit Panel"),
            _ => None,
        }
    }
}

/// What the host should do with a system back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BackOutcome {
    Handled,
    /// Not consumed; fall through to the host's default behavior.
    PassThrough,
}

pub struct PanelNavigator<S, R> {
    store: PanelStore<S>,
    surface: R,
    view: PanelView,
    blank_page: String,
    confirm_delete: bool,
}

impl<S: KeyValueStore, R: RenderSurface> PanelNavigator<S, R> {
    pub fn new(store: PanelStore<S>, mut surface: R, settings: &Settings) -> Self {
        surface.blank(&settings.blank_page);
        Self {
            store,
            surface,
            view: PanelView::list(),
            blank_page: settings.blank_page.clone(),
            confirm_delete: settings.confirm_delete,
        }
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn store(&self) -> &PanelStore<S> {
        &self.store
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// Fresh copy of the stored list for rendering.
    pub fn panels(&self) -> Vec<Panel> {
        self.store.load()
    }

    /// Id of the panel currently displayed at `index`.
    pub fn id_at(&self, index: usize) -> Option<PanelId> {
        self.store.load().into_iter().nth(index).map(|p| p.id)
    }

    pub fn add_pressed(&mut self) {
        if !self.in_list("add") {
            return;
        }
        self.view = PanelView::Editor {
            editing: None,
            draft: PanelDraft::default(),
        };
    }

    pub fn edit_pressed(&mut self, id: &str) -> Option<Notice> {
        if !self.in_list("edit") {
            return None;
        }
        match self.store.get(id) {
            Some(panel) => {
                self.view = PanelView::Editor {
                    editing: Some(panel.id.clone()),
                    draft: PanelDraft::from(&panel),
                };
                None
            }
            None => Some(Notice::PanelMissing),
        }
    }

    pub fn open_panel(&mut self, id: &str) -> Option<Notice> {
        if !self.in_list("open") {
            return None;
        }
        match self.store.get(id) {
            Some(panel) => {
                log::info!("[Nav] Opening '{}' at {}", panel.name, panel.url);
                self.surface.navigate(&panel.url);
                self.view = PanelView::Browse { url: panel.url };
                None
            }
            None => Some(Notice::PanelMissing),
        }
    }

    /// Commits the editor form. Stays in the editor on any failure.
    pub fn save_pressed(&mut self, name: &str, url: &str) -> Option<Notice> {
        let editing = match &self.view {
            PanelView::Editor { editing, .. } => editing.clone(),
            _ => {
                self.ignored("save");
                return None;
            }
        };

        let result = match &editing {
            Some(id) => self.store.update(id, name, url).map(|_| Notice::PanelUpdated),
            None => self.store.add(name, url).map(|_| Notice::PanelAdded),
        };

        match result {
            Ok(notice) => {
                self.view = PanelView::list();
                Some(notice)
            }
            Err(e) => {
                if !e.is_validation() {
                    log::warn!("[Nav] Saving panel failed: {}", e);
                }
                self.view = PanelView::Editor {
                    editing,
                    draft: PanelDraft {
                        name: name.to_string(),
                        url: url.to_string(),
                    },
                };
                Some(Notice::for_save(&e))
            }
        }
    }

    /// Deletes right away, or marks the panel for confirmation when
    /// `confirm_delete` is on.
    pub fn request_delete(&mut self, id: &str) -> Option<Notice> {
        if !self.in_list("delete") {
            return None;
        }
        if !self.confirm_delete {
            return Some(self.delete_now(id));
        }
        if self.store.get(id).is_none() {
            return Some(Notice::PanelMissing);
        }
        self.view = PanelView::List {
            pending_delete: Some(id.to_string()),
        };
        None
    }

    pub fn confirm_delete(&mut self) -> Option<Notice> {
        match &self.view {
            PanelView::List {
                pending_delete: Some(id),
            } => {
                let id = id.clone();
                self.view = PanelView::list();
                Some(self.delete_now(&id))
            }
            _ => {
                self.ignored("confirm delete");
                None
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        if let PanelView::List { pending_delete } = &mut self.view {
            *pending_delete = None;
        }
    }

    pub fn close_pressed(&mut self) {
        if !matches!(self.view, PanelView::Browse { .. }) {
            self.ignored("close");
            return;
        }
        self.close_browse();
    }

    pub fn back_pressed(&mut self) -> BackOutcome {
        match &self.view {
            PanelView::Browse { .. } => {
                if self.surface.can_go_back() {
                    self.surface.go_back();
                } else {
                    self.close_browse();
                }
                BackOutcome::Handled
            }
            PanelView::Editor { .. } => {
                // Unsaved edits are dropped.
                self.view = PanelView::list();
                BackOutcome::Handled
            }
            PanelView::List {
                pending_delete: Some(_),
            } => {
                self.cancel_delete();
                BackOutcome::Handled
            }
            PanelView::List {
                pending_delete: None,
            } => BackOutcome::PassThrough,
        }
    }

    pub fn page_loaded(&mut self, url: &str) {
        self.surface.page_loaded(url);
    }

    fn delete_now(&mut self, id: &str) -> Notice {
        match self.store.delete(id) {
            Ok(_) => Notice::PanelDeleted,
            Err(e) => {
                log::warn!("[Nav] Deleting panel failed: {}", e);
                Notice::for_delete(&e)
            }
        }
    }

    fn close_browse(&mut self) {
        // Stops any in-flight page activity before the surface is hidden.
        self.surface.blank(&self.blank_page);
        self.view = PanelView::list();
    }

    fn in_list(&self, event: &str) -> bool {
        let ok = matches!(self.view, PanelView::List { .. });
        if !ok {
            self.ignored(event);
        }
        ok
    }

    fn ignored(&self, event: &str) {
        log::debug!("[Nav] Ignoring '{}' in {:?}", event, self.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::modules::panel_store::tests::ReadOnlyPrefs;
    use crate::modules::surface::testing::RecordingSurface;
    use crate::prefs::MemoryPreferences;

    type Nav = PanelNavigator<MemoryPreferences, RecordingSurface>;

    fn nav() -> Nav {
        PanelNavigator::new(
            PanelStore::new(MemoryPreferences::new()),
            RecordingSurface::default(),
            &Settings::default(),
        )
    }

    fn nav_with(names: &[&str]) -> Nav {
        let mut nav = nav();
        for name in names {
            nav.add_pressed();
            nav.save_pressed(name, &format!("{}.com", name.to_lowercase()));
        }
        nav
    }

    fn first_id(nav: &Nav) -> PanelId {
        nav.id_at(0).unwrap()
    }

    #[test]
    fn test_starts_on_empty_list() {
        let nav = nav();
        assert_eq!(nav.view(), &PanelView::list());
        assert!(nav.panels().is_empty());
    }

    #[test]
    fn test_add_flow() {
        let mut nav = nav();
        nav.add_pressed();
        assert_eq!(nav.view().title(), Some("Add Panel"));

        let notice = nav.save_pressed("News", "example.com");
        assert_eq!(notice, Some(Notice::PanelAdded));
        assert_eq!(nav.view(), &PanelView::list());

        let panels = nav.panels();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].url, "https://example.com");
    }

    #[test]
    fn test_invalid_save_stays_in_editor() {
        let mut nav = nav();
        nav.add_pressed();

        let notice = nav.save_pressed("", "x");
        assert_eq!(notice, Some(Notice::Invalid(ValidationError::EmptyName)));
        assert_eq!(nav.view().title(), Some("Add Panel"));
        assert!(nav.panels().is_empty());

        let notice = nav.save_pressed("Name", " ");
        assert_eq!(notice, Some(Notice::Invalid(ValidationError::EmptyUrl)));
        match nav.view() {
            PanelView::Editor { draft, .. } => assert_eq!(draft.name, "Name"),
            other => panic!("expected editor, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_flow_prefills_and_updates() {
        let mut nav = nav_with(&["A", "B"]);
        let id = first_id(&nav);

        assert_eq!(nav.edit_pressed(&id), None);
        assert_eq!(nav.view().title(), Some("Edit Panel"));
        match nav.view() {
            PanelView::Editor { editing, draft } => {
                assert_eq!(editing.as_deref(), Some(id.as_str()));
                assert_eq!(draft.name, "A");
                assert_eq!(draft.url, "https://a.com");
            }
            other => panic!("expected editor, got {:?}", other),
        }

        assert_eq!(nav.save_pressed("Alpha", "alpha.io"), Some(Notice::PanelUpdated));
        let panels = nav.panels();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].id, id);
        assert_eq!(panels[0].name, "Alpha");
        assert_eq!(panels[1].name, "B");
    }

    #[test]
    fn test_edit_missing_panel() {
        let mut nav = nav_with(&["A"]);
        assert_eq!(nav.edit_pressed("gone"), Some(Notice::PanelMissing));
        assert_eq!(nav.view(), &PanelView::list());
    }

    #[test]
    fn test_open_and_close() {
        let mut nav = nav_with(&["A"]);
        let id = first_id(&nav);

        nav.open_panel(&id);
        assert_eq!(
            nav.view(),
            &PanelView::Browse {
                url: "https://a.com".to_string()
            }
        );
        assert_eq!(nav.surface().last_navigation(), Some("https://a.com"));

        nav.close_pressed();
        assert_eq!(nav.view(), &PanelView::list());
        assert_eq!(nav.surface().last_navigation(), Some("about:blank"));
    }

    #[test]
    fn test_back_consumes_embedded_history_first() {
        let mut nav = nav_with(&["A"]);
        let id = first_id(&nav);
        nav.open_panel(&id);
        nav.surface.follow_link("https://a.com/next");

        assert_eq!(nav.back_pressed(), BackOutcome::Handled);
        assert!(matches!(nav.view(), PanelView::Browse { .. }));
        assert_eq!(nav.surface().back_steps, 1);

        assert_eq!(nav.back_pressed(), BackOutcome::Handled);
        assert_eq!(nav.view(), &PanelView::list());
        assert_eq!(nav.surface().last_navigation(), Some("about:blank"));

        assert_eq!(nav.back_pressed(), BackOutcome::PassThrough);
    }

    #[test]
    fn test_custom_blank_page_clears_history() {
        let settings = Settings {
            blank_page: "data:text/html,".to_string(),
            ..Settings::default()
        };
        let mut nav = PanelNavigator::new(
            PanelStore::new(MemoryPreferences::new()),
            RecordingSurface::default(),
            &settings,
        );
        for name in ["A", "B"] {
            nav.add_pressed();
            nav.save_pressed(name, &format!("{}.com", name.to_lowercase()));
        }
        let a = nav.id_at(0).unwrap();
        let b = nav.id_at(1).unwrap();

        nav.open_panel(&a);
        nav.surface.follow_link("https://a.com/next");
        nav.close_pressed();
        assert_eq!(nav.surface().last_navigation(), Some("data:text/html,"));

        nav.open_panel(&b);
        assert_eq!(nav.surface().history.depth(), 1);
        assert_eq!(nav.back_pressed(), BackOutcome::Handled);
        assert_eq!(nav.view(), &PanelView::list());
    }

    #[test]
    fn test_back_from_editor_discards_draft() {
        let mut nav = nav_with(&["A"]);
        nav.edit_pressed(&first_id(&nav));
        assert_eq!(nav.back_pressed(), BackOutcome::Handled);
        assert_eq!(nav.view(), &PanelView::list());
        assert_eq!(nav.panels()[0].name, "A");
    }

    #[test]
    fn test_delete_with_confirmation() {
        let mut nav = nav_with(&["A", "B"]);
        let id = first_id(&nav);

        assert_eq!(nav.request_delete(&id), None);
        assert_eq!(nav.panels().len(), 2);
        assert_eq!(
            nav.view(),
            &PanelView::List {
                pending_delete: Some(id.clone())
            }
        );

        assert_eq!(nav.confirm_delete(), Some(Notice::PanelDeleted));
        assert_eq!(nav.view(), &PanelView::list());
        let panels = nav.panels();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].name, "B");
    }

    #[test]
    fn test_delete_cancelled() {
        let mut nav = nav_with(&["A"]);
        let id = first_id(&nav);

        nav.request_delete(&id);
        nav.cancel_delete();
        assert_eq!(nav.confirm_delete(), None);

        nav.request_delete(&id);
        assert_eq!(nav.back_pressed(), BackOutcome::Handled);
        assert_eq!(nav.panels().len(), 1);
    }

    #[test]
    fn test_delete_without_confirmation() {
        let settings = Settings {
            confirm_delete: false,
            ..Settings::default()
        };
        let mut nav = PanelNavigator::new(
            PanelStore::new(MemoryPreferences::new()),
            RecordingSurface::default(),
            &settings,
        );
        nav.add_pressed();
        nav.save_pressed("A", "a.com");

        let id = first_id(&nav);
        assert_eq!(nav.request_delete(&id), Some(Notice::PanelDeleted));
        assert!(nav.panels().is_empty());
        assert_eq!(nav.request_delete(&id), Some(Notice::PanelMissing));
    }

    #[test]
    fn test_events_outside_their_view_are_ignored() {
        let mut nav = nav_with(&["A"]);
        let id = first_id(&nav);

        assert_eq!(nav.save_pressed("X", "x.com"), None);
        nav.close_pressed();
        assert_eq!(nav.view(), &PanelView::list());
        assert_eq!(nav.panels().len(), 1);

        nav.open_panel(&id);
        nav.add_pressed();
        assert_eq!(nav.request_delete(&id), None);
        assert!(matches!(nav.view(), PanelView::Browse { .. }));
        assert_eq!(nav.panels().len(), 1);
    }

    #[test]
    fn test_write_fault_keeps_editor_open() {
        let mut nav = PanelNavigator::new(
            PanelStore::new(ReadOnlyPrefs::default()),
            RecordingSurface::default(),
            &Settings::default(),
        );
        nav.add_pressed();

        assert_eq!(nav.save_pressed("A", "a.com"), Some(Notice::SaveFailed));
        assert_eq!(nav.view().title(), Some("Add Panel"));
        assert!(nav.panels().is_empty());
    }

    #[test]
    fn test_view_serializes_for_frontend() {
        let view = PanelView::List {
            pending_delete: Some("p1".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({"kind": "list", "pendingDelete": "p1"})
        );
    }
}
