use crate::{browser::{config::LaunchOptions, profile::TempProfile, script},
            error::{BrowserError, Result},
            locator::{Locator, Scope},
            page::Page};
use headless_chrome::{Browser, Tab, protocol::cdp::Network};
use serde_json::Value;
use std::{ffi::{OsStr, OsString},
          path::Path,
          sync::Arc,
          time::Duration};

/// A Chrome instance with its own throwaway profile
///
/// Fields drop in declaration order: the tab handle, then the browser (which
/// kills the Chrome process), then the profile directory.
pub struct BrowserSession {
    /// The tab every page operation runs in
    tab: Arc<Tab>,

    /// The underlying headless_chrome Browser instance
    browser: Browser,

    profile: TempProfile,
}

impl BrowserSession {
    /// Launch a new browser instance with a fresh profile
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let profile = TempProfile::create()?;
        let user_agent_arg = OsString::from(format!("--user-agent={}", options.user_agent));

        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        launch_opts.args.push(OsStr::new("--disable-gpu"));
        launch_opts.args.push(OsStr::new("--disable-extensions"));
        launch_opts.args.push(OsStr::new("--disable-dev-shm-usage"));
        if options.disable_images {
            launch_opts.args.push(OsStr::new("--blink-settings=imagesEnabled=false"));
        }
        launch_opts.args.push(user_agent_arg.as_os_str());

        // A run never idles this long; the default 30 seconds can cut off the result poll
        launch_opts.idle_browser_timeout = Duration::from_secs(5 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;
        launch_opts.path = options.chrome_path.clone();
        launch_opts.user_data_dir = Some(profile.path().to_path_buf());

        let browser = Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::info!(
            "Launched {} browser with profile {}",
            if options.headless { "headless" } else { "headed" },
            profile.path().display()
        );

        Ok(Self { tab, browser, profile })
    }

    /// Get the tab the session drives
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn profile_dir(&self) -> &Path {
        self.profile.path()
    }

    fn evaluate(&self, js: &str) -> Result<Value> {
        let remote = self
            .tab
            .evaluate(js, false)
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?;
        Ok(remote.value.unwrap_or(Value::Null))
    }

    fn evaluate_bool(&self, js: &str) -> Result<bool> {
        Ok(self.evaluate(js)?.as_bool().unwrap_or(false))
    }

    fn evaluate_string(&self, js: &str) -> Result<Option<String>> {
        match self.evaluate(js)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Ok(Some(other.to_string())),
        }
    }
}

impl Page for BrowserSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("Navigation to {} did not complete: {}", url, e)))?;

        Ok(())
    }

    fn current_url(&self) -> Result<String> {
        Ok(self.tab.get_url())
    }

    fn is_ready(&self) -> Result<bool> {
        self.evaluate_bool(script::READY_STATE)
    }

    fn exists(&self, scope: &Scope, locator: &Locator) -> Result<bool> {
        self.evaluate_bool(&script::exists(scope, locator))
    }

    fn is_clickable(&self, scope: &Scope, locator: &Locator) -> Result<bool> {
        self.evaluate_bool(&script::clickable(scope, locator))
    }

    fn click(&self, scope: &Scope, locator: &Locator) -> Result<()> {
        if self.evaluate_bool(&script::click(scope, locator))? {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(format!("{} in {}", locator, scope)))
        }
    }

    fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
        if !self.evaluate_bool(&script::focus_and_clear(locator))? {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }

        self.tab
            .type_str(text)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to type into {}: {}", locator, e)))?;

        Ok(())
    }

    fn value(&self, locator: &Locator) -> Result<Option<String>> {
        self.evaluate_string(&script::value(locator))
    }

    fn text(&self, scope: &Scope, locator: &Locator) -> Result<Option<String>> {
        self.evaluate_string(&script::text(scope, locator))
    }

    fn frame_count(&self) -> Result<usize> {
        let count = self.evaluate(script::FRAME_COUNT)?.as_u64().unwrap_or(0);
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn clear_state(&self) -> Result<()> {
        // Each part is best effort; a page without storage access is still usable
        if let Err(e) = self.tab.call_method(Network::ClearBrowserCookies(None)) {
            log::debug!("Failed to clear cookies: {}", e);
        }
        if let Err(e) = self.tab.call_method(Network::ClearBrowserCache(None)) {
            log::debug!("Failed to clear cache: {}", e);
        }
        if let Err(e) = self.evaluate(script::CLEAR_STORAGE) {
            log::debug!("Failed to clear web storage: {}", e);
        }
        Ok(())
    }

    fn hard_reload(&self) -> Result<()> {
        match self.tab.reload(true, None) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::debug!("Cache-ignoring reload failed, falling back to location.reload(): {}", e);
                self.evaluate(script::SOFT_RELOAD).map(|_| ())
            }
        }
    }
}
