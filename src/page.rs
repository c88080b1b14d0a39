//! The page operations the portal flow is written against
//!
//! [`crate::BrowserSession`] implements this trait over the Chrome DevTools
//! Protocol. Keeping the flow generic over [`Page`] lets it run against a
//! simulated portal in tests.

use crate::error::Result;
use crate::locator::{Locator, Scope};

pub trait Page {
    /// Load `url` and wait for the navigation to settle
    fn navigate(&self, url: &str) -> Result<()>;

    fn current_url(&self) -> Result<String>;

    /// Whether `document.readyState` is `complete`
    fn is_ready(&self) -> Result<bool>;

    /// Whether `locator` matches an element in `scope`
    fn exists(&self, scope: &Scope, locator: &Locator) -> Result<bool>;

    /// Whether the element is rendered, visible and not disabled
    fn is_clickable(&self, scope: &Scope, locator: &Locator) -> Result<bool> {
        self.exists(scope, locator)
    }

    /// Dispatch a script click on the element, bypassing overlays
    fn click(&self, scope: &Scope, locator: &Locator) -> Result<()>;

    /// Clear the input's current value and type `text` into it
    fn fill(&self, locator: &Locator, text: &str) -> Result<()>;

    /// The `value` property of an input, `None` if the element is missing
    fn value(&self, locator: &Locator) -> Result<Option<String>>;

    /// Rendered text of the element, `None` if the element is missing
    fn text(&self, scope: &Scope, locator: &Locator) -> Result<Option<String>>;

    fn frame_count(&self) -> Result<usize>;

    /// Drop cookies, HTTP cache and web storage
    fn clear_state(&self) -> Result<()>;

    /// Reload the current page bypassing the cache
    fn hard_reload(&self) -> Result<()>;
}
