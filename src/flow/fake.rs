//! Simulated portal for exercising the flow without Chrome

use super::FlowConfig;
use crate::{error::{BrowserError, Result},
            locator::{Locator, Scope},
            page::Page,
            poll::Poll,
            portal};
use std::{cell::{Cell, RefCell},
          time::Duration};

pub(crate) const LOGIN_URL: &str = "https://vahan.parivahan.gov.in/vahanservice/vahan/ui/usermgmt/login.xhtml";
pub(crate) const FORM_URL: &str =
    "https://vahan.parivahan.gov.in/vahanservice/vahan/ui/eapplication/form_reschedule_fitness.xhtml";

/// Flow configuration with every wait collapsed to a single probe
pub(crate) fn instant_config() -> FlowConfig {
    FlowConfig {
        element_timeout: Duration::ZERO,
        poll_interval: Duration::ZERO,
        page_settle: Duration::ZERO,
        popup_settle: Duration::ZERO,
        logout_settle: Duration::ZERO,
        conflict_timeout: Duration::ZERO,
        dialog_timeout: Duration::ZERO,
        result_poll: Poll::new(5, Duration::ZERO),
        ..FlowConfig::default()
    }
}

/// Behaves like the portal's homepage, login page and fitness form
///
/// Only one locator of each fallback chain matches, mostly not the first, so
/// the fallbacks get exercised.
pub(crate) struct FakePortal {
    pub url: RefCell<String>,
    pub navigations: RefCell<Vec<String>>,
    pub registration: RefCell<String>,
    pub chassis: RefCell<String>,
    pub consent: Cell<bool>,
    pub modal_open: Cell<bool>,
    pub dialog_open: Cell<bool>,
    pub validated: Cell<bool>,
    pub clears: Cell<usize>,
    pub reloads: Cell<usize>,
    pub proceed_clicks: Cell<usize>,
    conflicts: Cell<usize>,
    late_conflicts: Cell<usize>,
    modal_pending: Cell<bool>,
    disabled_checks: Cell<usize>,
    empty_reads: Cell<usize>,
    mobile: String,
    consent_in_frame: bool,
    confirm_dialog: bool,
    registration_input: bool,
    login_redirect: bool,
    fitness_link: bool,
}

impl FakePortal {
    pub fn new(mobile: &str) -> Self {
        Self {
            url: RefCell::new("about:blank".to_string()),
            navigations: RefCell::new(Vec::new()),
            registration: RefCell::new(String::new()),
            chassis: RefCell::new(String::new()),
            consent: Cell::new(false),
            modal_open: Cell::new(false),
            dialog_open: Cell::new(false),
            validated: Cell::new(false),
            clears: Cell::new(0),
            reloads: Cell::new(0),
            proceed_clicks: Cell::new(0),
            conflicts: Cell::new(0),
            late_conflicts: Cell::new(0),
            modal_pending: Cell::new(false),
            disabled_checks: Cell::new(0),
            empty_reads: Cell::new(0),
            mobile: mobile.to_string(),
            consent_in_frame: false,
            confirm_dialog: false,
            registration_input: true,
            login_redirect: true,
            fitness_link: true,
        }
    }

    /// The first `count` proceed clicks raise the session-conflict modal
    pub fn with_conflicts(self, count: usize) -> Self {
        self.conflicts.set(count);
        self
    }

    /// The first `count` proceed clicks raise the session-conflict modal only
    /// once the page is next asked for its URL, i.e. while waiting for the login redirect
    pub fn with_late_conflicts(self, count: usize) -> Self {
        self.late_conflicts.set(count);
        self
    }

    /// The proceed button reports itself disabled for the first `count` checks
    pub fn with_disabled_proceed(self, count: usize) -> Self {
        self.disabled_checks.set(count);
        self
    }

    /// The mobile field reads empty `count` times after validation
    pub fn with_empty_reads(self, count: usize) -> Self {
        self.empty_reads.set(count);
        self
    }

    pub fn with_consent_in_frame(mut self) -> Self {
        self.consent_in_frame = true;
        self
    }

    pub fn with_confirm_dialog(mut self) -> Self {
        self.confirm_dialog = true;
        self
    }

    pub fn without_registration_input(mut self) -> Self {
        self.registration_input = false;
        self
    }

    pub fn without_login_redirect(mut self) -> Self {
        self.login_redirect = false;
        self
    }

    pub fn without_fitness_link(mut self) -> Self {
        self.fitness_link = false;
        self
    }

    fn url_contains(&self, needle: &str) -> bool {
        self.url.borrow().contains(needle)
    }

    fn on_homepage(&self) -> bool {
        self.url.borrow().starts_with(portal::HOMEPAGE_URL)
    }

    fn on_form(&self) -> bool {
        self.url_contains(portal::FITNESS_FORM_URL_MARKER)
    }

    fn reset_homepage(&self) {
        self.consent.set(false);
        self.registration.borrow_mut().clear();
    }

    fn set_url(&self, url: &str) {
        *self.url.borrow_mut() = url.to_string();
    }

    fn on_proceed(&self) {
        self.proceed_clicks.set(self.proceed_clicks.get() + 1);
        if self.conflicts.get() > 0 {
            self.conflicts.set(self.conflicts.get() - 1);
            self.modal_open.set(true);
            return;
        }
        if self.late_conflicts.get() > 0 {
            self.late_conflicts.set(self.late_conflicts.get() - 1);
            self.modal_pending.set(true);
            return;
        }
        if !self.login_redirect || !self.consent.get() || self.registration.borrow().is_empty() {
            return;
        }
        if self.confirm_dialog {
            self.dialog_open.set(true);
        } else {
            self.set_url(LOGIN_URL);
        }
    }
}

impl Page for FakePortal {
    fn navigate(&self, url: &str) -> Result<()> {
        self.navigations.borrow_mut().push(url.to_string());
        self.set_url(url);
        self.reset_homepage();
        Ok(())
    }

    fn current_url(&self) -> Result<String> {
        if self.modal_pending.replace(false) {
            self.modal_open.set(true);
        }
        Ok(self.url.borrow().clone())
    }

    fn is_ready(&self) -> Result<bool> {
        Ok(true)
    }

    fn exists(&self, scope: &Scope, locator: &Locator) -> Result<bool> {
        let found = match scope {
            Scope::Document => {
                if *locator == portal::REGISTRATION_INPUT[0] {
                    self.on_homepage() && self.registration_input
                } else if *locator == portal::CONSENT_CHECKBOX[1] {
                    self.on_homepage() && !self.consent_in_frame
                } else if *locator == portal::PROCEED_BUTTON || *locator == portal::UPDATE_MOBILE_POPUP_CLOSE {
                    self.on_homepage()
                } else if *locator == portal::SESSION_CONFLICT_MODAL[0] {
                    self.modal_open.get()
                } else if *locator == portal::VISIBLE_DIALOG[0] || *locator == portal::SESSION_CONFLICT_MODAL[1] {
                    self.dialog_open.get()
                } else if *locator == portal::FITNESS_LINK[1] {
                    self.url_contains(portal::LOGIN_URL_MARKER) && self.fitness_link
                } else if *locator == portal::CHASSIS_INPUT
                    || *locator == portal::VALIDATE_BUTTON
                    || *locator == portal::MOBILE_FIELD
                {
                    self.on_form()
                } else {
                    false
                }
            }
            Scope::Within(outer) if *outer == portal::SESSION_CONFLICT_MODAL[0] => {
                self.modal_open.get() && *locator == portal::SESSION_CONFLICT_DISMISS[1]
            }
            Scope::Within(outer) if *outer == portal::VISIBLE_DIALOG[0] => {
                self.dialog_open.get() && *locator == portal::DIALOG_PROCEED[0]
            }
            Scope::Frame(0) => {
                self.consent_in_frame && self.on_homepage() && *locator == portal::FRAME_CONSENT_CHECKBOX[2]
            }
            _ => false,
        };
        Ok(found)
    }

    fn is_clickable(&self, scope: &Scope, locator: &Locator) -> Result<bool> {
        if *locator == portal::PROCEED_BUTTON && self.disabled_checks.get() > 0 {
            self.disabled_checks.set(self.disabled_checks.get() - 1);
            return Ok(false);
        }
        self.exists(scope, locator)
    }

    fn click(&self, scope: &Scope, locator: &Locator) -> Result<()> {
        if !self.exists(scope, locator)? {
            return Err(BrowserError::ElementNotFound(format!("{} in {}", locator, scope)));
        }

        if *locator == portal::PROCEED_BUTTON {
            self.on_proceed();
        } else if *locator == portal::SESSION_CONFLICT_DISMISS[1] {
            self.modal_open.set(false);
        } else if *locator == portal::DIALOG_PROCEED[0] {
            self.dialog_open.set(false);
            self.set_url(LOGIN_URL);
        } else if *locator == portal::CONSENT_CHECKBOX[1] || *locator == portal::FRAME_CONSENT_CHECKBOX[2] {
            self.consent.set(true);
        } else if *locator == portal::FITNESS_LINK[1] {
            self.set_url(FORM_URL);
        } else if *locator == portal::VALIDATE_BUTTON {
            self.validated.set(!self.chassis.borrow().is_empty());
        }
        Ok(())
    }

    fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
        if !self.exists(&Scope::Document, locator)? {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        if *locator == portal::CHASSIS_INPUT {
            *self.chassis.borrow_mut() = text.to_string();
        } else {
            *self.registration.borrow_mut() = text.to_string();
        }
        Ok(())
    }

    fn value(&self, locator: &Locator) -> Result<Option<String>> {
        if *locator != portal::MOBILE_FIELD || !self.on_form() {
            return Ok(None);
        }
        if !self.validated.get() {
            return Ok(Some(String::new()));
        }
        if self.empty_reads.get() > 0 {
            self.empty_reads.set(self.empty_reads.get() - 1);
            return Ok(Some(String::new()));
        }
        Ok(Some(self.mobile.clone()))
    }

    fn text(&self, scope: &Scope, locator: &Locator) -> Result<Option<String>> {
        if !self.exists(scope, locator)? {
            return Ok(None);
        }
        if *locator == portal::SESSION_CONFLICT_MODAL[0] {
            return Ok(Some(format!("{}. Please logout from the other session.", portal::SESSION_CONFLICT_TEXT)));
        }
        Ok(Some("Do you want to Proceed?".to_string()))
    }

    fn frame_count(&self) -> Result<usize> {
        Ok(usize::from(self.consent_in_frame))
    }

    fn clear_state(&self) -> Result<()> {
        self.clears.set(self.clears.get() + 1);
        Ok(())
    }

    fn hard_reload(&self) -> Result<()> {
        self.reloads.set(self.reloads.get() + 1);
        self.reset_homepage();
        Ok(())
    }
}
