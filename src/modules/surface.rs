// The embedded render surface, seen from the navigators.
// Page loading and rendering belong to the host webview; the core only
// issues navigations and asks about back history.

use crate::modules::navigation::is_blank_page;

pub trait RenderSurface {
    fn navigate(&mut self, url: &str);
    /// Loads the neutral page `url` and drops all back history, whatever
    /// scheme the neutral page uses.
    fn blank(&mut self, url: &str);
    fn can_go_back(&self) -> bool;
    /// Consumes one step of the surface's own back history.
    fn go_back(&mut self);
    /// "Loaded" boundary reported by the host once a page finishes.
    fn page_loaded(&mut self, _url: &str) {}
}

/// Back-stack bookkeeping for webviews that cannot be asked for it.
#[derive(Debug, Default, Clone)]
pub struct HistoryTracker {
    entries: Vec<String>,
    neutral: Option<String>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished load. Blank pages and reloads of the current entry
    /// are not history.
    pub fn on_loaded(&mut self, url: &str) {
        if is_blank_page(url) || self.neutral.as_deref() == Some(url) {
            return;
        }
        if self.entries.last().map(String::as_str) == Some(url) {
            return;
        }
        self.entries.push(url.to_string());
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Drops the current entry; the page that reloads afterwards is the new
    /// top and is swallowed by `on_loaded`.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.entries.pop();
        true
    }

    /// Runs `step` (the webview's own back action) and pops only if it
    /// succeeded, so a failed step leaves the stack in sync.
    pub fn step_back<E>(&mut self, step: impl FnOnce() -> Result<(), E>) -> Result<bool, E> {
        if !self.can_go_back() {
            return Ok(false);
        }
        step()?;
        self.entries.pop();
        Ok(true)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Clears history and remembers `url` as the neutral page, so its own
    /// load is not recorded either.
    pub fn reset_to(&mut self, url: &str) {
        self.reset();
        self.neutral = Some(url.to_string());
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_tracker_has_no_history() {
        let tracker = HistoryTracker::new();
        assert!(!tracker.can_go_back());
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn test_single_page_cannot_go_back() {
        let mut tracker = HistoryTracker::new();
        tracker.on_loaded("https://a.com");
        assert!(!tracker.can_go_back());
    }

    #[test]
    fn test_back_then_reload_of_previous() {
        let mut tracker = HistoryTracker::new();
        tracker.on_loaded("https://a.com");
        tracker.on_loaded("https://a.com/page");
        assert!(tracker.can_go_back());

        assert!(tracker.go_back());
        // The webview reloads the previous page after a back step.
        tracker.on_loaded("https://a.com");
        assert_eq!(tracker.depth(), 1);
        assert!(!tracker.can_go_back());
        assert!(!tracker.go_back());
    }

    #[test]
    fn test_blank_pages_and_reloads_are_ignored() {
        let mut tracker = HistoryTracker::new();
        tracker.on_loaded("about:blank");
        tracker.on_loaded("https://a.com");
        tracker.on_loaded("https://a.com");
        assert_eq!(tracker.depth(), 1);
    }

    #[test]
    fn test_step_back_pops_only_on_success() {
        let mut tracker = HistoryTracker::new();
        tracker.on_loaded("https://a.com");
        tracker.on_loaded("https://a.com/next");

        let failed: Result<bool, &str> = tracker.step_back(|| Err("eval failed"));
        assert_eq!(failed, Err("eval failed"));
        assert_eq!(tracker.depth(), 2);

        assert_eq!(tracker.step_back(|| Ok::<(), &str>(())), Ok(true));
        assert_eq!(tracker.depth(), 1);

        let mut called = false;
        let none = tracker.step_back(|| {
            called = true;
            Ok::<(), &str>(())
        });
        assert_eq!(none, Ok(false));
        assert!(!called);
    }

    #[test]
    fn test_neutral_page_is_not_history() {
        let mut tracker = HistoryTracker::new();
        tracker.on_loaded("https://a.com");
        tracker.reset_to("data:text/html,");
        tracker.on_loaded("data:text/html,");
        assert_eq!(tracker.depth(), 0);

        tracker.on_loaded("https://b.com");
        assert!(!tracker.can_go_back());
    }

    #[test]
    fn test_reset_clears() {
        let mut tracker = HistoryTracker::new();
        tracker.on_loaded("https://a.com");
        tracker.on_loaded("https://b.com");
        tracker.reset();
        assert_eq!(tracker.depth(), 0);
    }
}
