use crate::error::ShellError;
use crate::modules::panels::{self, Panel};
use crate::prefs::KeyValueStore;

pub const KEY_PANELS: &str = "panels";

/// Durable CRUD over the panel list, stored as one JSON array under
/// [`KEY_PANELS`]. Every mutation reads the current list, rebuilds it and
/// writes it straight back; nothing is cached between calls.
pub struct PanelStore<S> {
    prefs: S,
}

impl<S: KeyValueStore> PanelStore<S> {
    pub fn new(prefs: S) -> Self {
        Self { prefs }
    }

    pub fn prefs(&self) -> &S {
        &self.prefs
    }

    /// Never fails: a missing or unreadable blob is an empty list.
    pub fn load(&self) -> Vec<Panel> {
        match self.prefs.get(KEY_PANELS) {
            Some(json) => panels::parse_list(&json),
            None => Vec::new(),
        }
    }

    pub fn save(&mut self, list: &[Panel]) -> Result<(), ShellError> {
        let json = serde_json::to_string(list)?;
        self.prefs.put(KEY_PANELS, json)
    }

    pub fn get(&self, id: &str) -> Option<Panel> {
        self.load().into_iter().find(|p| p.id == id)
    }

    pub fn add(&mut self, name: &str, url: &str) -> Result<Panel, ShellError> {
        let panel = Panel::create(name, url)?;
        let mut list = self.load();
        list.push(panel.clone());
        self.save(&list)?;

        log::info!("[Panels] Added '{}' -> {}", panel.name, panel.url);
        Ok(panel)
    }

    pub fn update(&mut self, id: &str, name: &str, url: &str) -> Result<Panel, ShellError> {
        let (name, url) = panels::validate(name, url)?;
        let list = self.load();
        let index = panels::position_of(&list, id)?;
        self.replace(list, index, name, url)
    }

    /// Position-addressed update. `index` must still be valid in the stored
    /// list; a stale position is rejected and nothing is written.
    pub fn update_at(&mut self, index: usize, name: &str, url: &str) -> Result<Panel, ShellError> {
        let (name, url) = panels::validate(name, url)?;
        let list = self.load();
        panels::check_position(&list, index)?;
        self.replace(list, index, name, url)
    }

    pub fn delete(&mut self, id: &str) -> Result<Panel, ShellError> {
        let list = self.load();
        let index = panels::position_of(&list, id)?;
        self.remove(list, index)
    }

    pub fn delete_at(&mut self, index: usize) -> Result<Panel, ShellError> {
        let list = self.load();
        panels::check_position(&list, index)?;
        self.remove(list, index)
    }

    fn replace(
        &mut self,
        mut list: Vec<Panel>,
        index: usize,
        name: String,
        url: String,
    ) -> Result<Panel, ShellError> {
        let panel = Panel {
            id: list[index].id.clone(),
            name,
            url,
        };
        list[index] = panel.clone();
        self.save(&list)?;

        log::info!("[Panels] Updated '{}' -> {}", panel.name, panel.url);
        Ok(panel)
    }

    fn remove(&mut self, list: Vec<Panel>, index: usize) -> Result<Panel, ShellError> {
        let (kept, removed) = panels::without(list, index);
        let removed = removed.ok_or(ShellError::StalePosition {
            index,
            len: kept.len(),
        })?;
        self.save(&kept)?;

        log::info!("[Panels] Deleted '{}'", removed.name);
        Ok(removed)
    }
}
