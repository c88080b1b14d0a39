//! The fitness-renewal walk through the Vahan portal
//!
//! [`MobileLookupFlow`] is a linear state machine:
//!
//! ```text
//! Start -> Loaded -> Authenticated -> FormReady -> Submitted -> Done
//!    \________\____________\______________\____________\-----> Failed
//! ```
//!
//! The one non-linear edge is session-conflict recovery between `Loaded` and
//! `Authenticated`: when the portal reports that a previous session is still
//! active, the flow clears browser state, reloads and proceeds again. Recovery
//! is bounded by [`FlowConfig::max_recoveries`].

mod dialog;
#[cfg(test)]
pub(crate) mod fake;

use crate::{error::{BrowserError, Result},
            locator::{Scope, click_first, find_first},
            lookup::LookupRequest,
            page::Page,
            poll::Poll,
            portal};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Start,
    Loaded,
    Authenticated,
    FormReady,
    Submitted,
    Done,
    Failed,
}

/// Waits and bounds used by the flow
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub homepage_url: String,

    /// Upper bound for page readiness, clickable elements and URL transitions
    pub element_timeout: Duration,

    /// Interval used when polling within `element_timeout`, `conflict_timeout` and `dialog_timeout`
    pub poll_interval: Duration,

    /// Pause after the page reports ready
    pub page_settle: Duration,

    pub popup_settle: Duration,
    pub logout_settle: Duration,

    /// How long to look for the "previous session active" modal
    pub conflict_timeout: Duration,

    /// How long to look for a generic "Proceed" dialog
    pub dialog_timeout: Duration,

    /// Reads of the mobile number field after validation
    pub result_poll: Poll,

    pub max_recoveries: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            homepage_url: portal::HOMEPAGE_URL.to_string(),
            element_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(100),
            page_settle: Duration::from_millis(500),
            popup_settle: Duration::from_millis(200),
            logout_settle: Duration::from_millis(300),
            conflict_timeout: Duration::from_secs(3),
            dialog_timeout: Duration::from_secs(8),
            result_poll: Poll::new(5, Duration::from_millis(500)),
            max_recoveries: 1,
        }
    }
}

impl FlowConfig {
    fn element_poll(&self) -> Poll {
        Poll::for_timeout(self.element_timeout, self.poll_interval)
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}

/// Drives one lookup on a [`Page`]
pub struct MobileLookupFlow<'a, P: Page + ?Sized> {
    page: &'a P,
    config: &'a FlowConfig,
    state: FlowState,
    transitions: Vec<FlowState>,
    recoveries: usize,
}

impl<'a, P: Page + ?Sized> MobileLookupFlow<'a, P> {
    pub fn new(page: &'a P, config: &'a FlowConfig) -> Self {
        Self { page, config, state: FlowState::Start, transitions: Vec::new(), recoveries: 0 }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// States entered so far, in order
    pub fn transitions(&self) -> &[FlowState] {
        &self.transitions
    }

    /// Session-conflict recovery cycles performed
    pub fn recoveries(&self) -> usize {
        self.recoveries
    }

    /// Run the whole flow and return the mobile number
    pub fn run(&mut self, request: &LookupRequest) -> Result<String> {
        match self.drive(request) {
            Ok(mobile) => {
                self.enter(FlowState::Done);
                Ok(mobile)
            }
            Err(e) => {
                log::error!("Lookup for {} failed in state {:?}: {}", request.registration_number, self.state, e);
                self.enter(FlowState::Failed);
                Err(e)
            }
        }
    }

    fn drive(&mut self, request: &LookupRequest) -> Result<String> {
        self.load()?;
        self.enter(FlowState::Loaded);

        self.fill_registration(&request.registration_number)?;
        self.accept_consent();
        self.click_proceed()?;
        self.authenticate(&request.registration_number)?;
        self.enter(FlowState::Authenticated);

        self.open_fitness_form()?;
        self.enter(FlowState::FormReady);

        self.submit_chassis(&request.chassis_suffix)?;
        self.enter(FlowState::Submitted);

        self.poll_mobile()
    }

    fn enter(&mut self, state: FlowState) {
        log::info!("{:?} -> {:?}", self.state, state);
        self.state = state;
        self.transitions.push(state);
    }

    /// Open the homepage with no leftover server or browser session
    fn load(&mut self) -> Result<()> {
        let homepage = Url::parse(&self.config.homepage_url).map_err(|e| {
            BrowserError::NavigationFailed(format!("Invalid homepage URL {}: {}", self.config.homepage_url, e))
        })?;
        self.page.navigate(homepage.as_str())?;
        self.wait_until_ready()?;

        let landed = self.page.current_url()?;
        if let Some(origin) = portal::origin(&landed) {
            self.logout_sweep(&origin);
        }
        self.page.clear_state()?;

        self.page.navigate(portal::cache_busted_url(&homepage).as_str())?;
        self.wait_until_ready()?;
        self.close_update_popup();
        Ok(())
    }

    fn logout_sweep(&self, origin: &str) {
        for path in portal::LOGOUT_PATHS {
            let url = format!("{}{}", origin, path);
            if let Err(e) = self.page.navigate(&url) {
                log::debug!("Logout via {} failed: {}", url, e);
            }
            pause(self.config.logout_settle);
        }
    }

    fn close_update_popup(&self) {
        let popup = &portal::UPDATE_MOBILE_POPUP_CLOSE;
        if !matches!(self.page.exists(&Scope::Document, popup), Ok(true)) {
            return;
        }
        match self.page.click(&Scope::Document, popup) {
            Ok(()) => pause(self.config.popup_settle),
            Err(e) => log::debug!("Could not close update-mobile popup: {}", e),
        }
    }

    fn wait_until_ready(&self) -> Result<()> {
        let page = self.page;
        self.config
            .element_poll()
            .try_run(|| Ok(page.is_ready()?.then_some(())))?
            .ok_or_else(|| BrowserError::Timeout("page ready state".to_string()))?;
        pause(self.config.page_settle);
        Ok(())
    }

    fn wait_for_url(&self, marker: &str) -> Result<()> {
        let page = self.page;
        self.config
            .element_poll()
            .try_run(|| Ok(page.current_url()?.contains(marker).then_some(())))?
            .ok_or_else(|| BrowserError::Timeout(format!("URL containing {}", marker)))
    }

    fn fill_registration(&self, registration_number: &str) -> Result<()> {
        for candidate in portal::REGISTRATION_INPUT {
            if !matches!(self.page.exists(&Scope::Document, candidate), Ok(true)) {
                continue;
            }
            match self.page.fill(candidate, registration_number) {
                Ok(()) => {
                    log::debug!("Registration number entered via {}", candidate);
                    return Ok(());
                }
                Err(e) => log::debug!("Could not fill {}: {}", candidate, e),
            }
        }
        Err(BrowserError::ElementNotFound("Could not find registration input field".to_string()))
    }

    /// Tick the terms checkbox, looking inside iframes when the document has none
    fn accept_consent(&self) {
        if let Some(hit) = click_first(self.page, &Scope::Document, portal::CONSENT_CHECKBOX) {
            log::debug!("Consent accepted via {}", hit);
            return;
        }

        let frames = self.page.frame_count().unwrap_or(0);
        for index in 0..frames {
            if let Some(hit) = click_first(self.page, &Scope::Frame(index), portal::FRAME_CONSENT_CHECKBOX) {
                log::debug!("Consent accepted via {} in frame #{}", hit, index);
                return;
            }
        }
        log::debug!("No consent checkbox found");
    }

    fn click_proceed(&self) -> Result<()> {
        let page = self.page;
        let button = &portal::PROCEED_BUTTON;
        self.config
            .element_poll()
            .run(|| matches!(page.is_clickable(&Scope::Document, button), Ok(true)).then_some(()))
            .ok_or_else(|| BrowserError::Timeout(format!("clickable {}", button)))?;
        page.click(&Scope::Document, button)
    }

    /// Get from the homepage to the login page, recovering from session conflicts
    fn authenticate(&mut self, registration_number: &str) -> Result<()> {
        loop {
            if self.dismiss_session_conflict() {
                self.recover(registration_number)?;
                continue;
            }

            self.proceed_through_dialog();

            match self.wait_for_url(portal::LOGIN_URL_MARKER) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_timeout() && self.dismiss_session_conflict() => {
                    self.recover(registration_number)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn recover(&mut self, registration_number: &str) -> Result<()> {
        if self.recoveries >= self.config.max_recoveries {
            return Err(BrowserError::SessionConflict(self.recoveries));
        }
        self.recoveries += 1;
        log::warn!("Previous session still active, recovering ({}/{})", self.recoveries, self.config.max_recoveries);

        self.page.clear_state()?;
        self.page.hard_reload()?;
        self.wait_until_ready()?;
        self.fill_registration(registration_number)?;
        self.accept_consent();
        self.click_proceed()
    }

    fn open_fitness_form(&self) -> Result<()> {
        match click_first(self.page, &Scope::Document, portal::FITNESS_LINK) {
            Some(hit) => log::debug!("Opened fitness form via {}", hit),
            None => log::debug!("No fitness link matched"),
        }
        self.wait_for_url(portal::FITNESS_FORM_URL_MARKER)
    }

    fn submit_chassis(&self, chassis_suffix: &str) -> Result<()> {
        self.page.fill(&portal::CHASSIS_INPUT, chassis_suffix)?;
        self.page.click(&Scope::Document, &portal::VALIDATE_BUTTON)
    }

    fn poll_mobile(&self) -> Result<String> {
        let page = self.page;
        self.config
            .result_poll
            .run(|| {
                page.value(&portal::MOBILE_FIELD)
                    .ok()
                    .flatten()
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
            })
            .ok_or_else(|| BrowserError::EmptyResult(crate::lookup::EMPTY_MOBILE.to_string()))
    }
}
