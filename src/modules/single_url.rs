use crate::error::{ShellError, ValidationError};
use crate::modules::navigation::normalize_url;
use crate::prefs::KeyValueStore;

pub const KEY_SERVER_URL: &str = "server_url";

/// The single-URL variant's one persisted value.
pub struct SingleUrlStore<S> {
    prefs: S,
}

impl<S: KeyValueStore> SingleUrlStore<S> {
    pub fn new(prefs: S) -> Self {
        Self { prefs }
    }

    pub fn prefs(&self) -> &S {
        &self.prefs
    }

    /// A stored blank value counts as absent.
    pub fn load(&self) -> Option<String> {
        self.prefs
            .get(KEY_SERVER_URL)
            .filter(|url| !url.trim().is_empty())
    }

    /// Normalizes and persists `input`, returning the stored url.
    pub fn store(&mut self, input: &str) -> Result<String, ShellError> {
        let url = normalize_url(input);
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl.into());
        }

        self.prefs.put(KEY_SERVER_URL, url.clone())?;
        log::info!("[SingleUrl] Stored {}", url);
        Ok(url)
    }

    pub fn clear(&mut self) -> Result<(), ShellError> {
        self.prefs.remove(KEY_SERVER_URL)?;
        log::info!("[SingleUrl] Cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{FilePreferences, MemoryPreferences};
    use tempfile::tempdir;

    #[test]
    fn test_absent_by_default() {
        let store = SingleUrlStore::new(MemoryPreferences::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_blank_value_is_absent() {
        let store = SingleUrlStore::new(MemoryPreferences::with(KEY_SERVER_URL, "  "));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_store_normalizes() {
        let mut store = SingleUrlStore::new(MemoryPreferences::new());
        assert_eq!(store.store(" site.com ").unwrap(), "https://site.com");
        assert_eq!(store.load().as_deref(), Some("https://site.com"));
    }

    #[test]
    fn test_store_rejects_blank() {
        let mut store = SingleUrlStore::new(MemoryPreferences::new());
        let err = store.store("   ").unwrap_err();
        assert!(matches!(err, ShellError::Validation(ValidationError::EmptyUrl)));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_clear_then_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = SingleUrlStore::new(FilePreferences::open_in(dir.path()));
            store.store("http://10.0.0.2:8080").unwrap();
        }
        let mut store = SingleUrlStore::new(FilePreferences::open_in(dir.path()));
        assert_eq!(store.load().as_deref(), Some("http://10.0.0.2:8080"));

        store.clear().unwrap();
        let reopened = SingleUrlStore::new(FilePreferences::open_in(dir.path()));
        assert_eq!(reopened.load(), None);
    }
}
