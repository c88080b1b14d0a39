//! One mobile-number lookup, from browser launch to the reported result

use crate::{browser::{BrowserSession, LaunchOptions},
            error::{BrowserError, Result},
            flow::{FlowConfig, MobileLookupFlow},
            page::Page};
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub(crate) const EMPTY_MOBILE: &str = "Mobile number field is empty";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub registration_number: String,
    /// Last characters of the chassis number, as the fitness form asks for them
    pub chassis_suffix: String,
}

impl LookupRequest {
    pub fn new(registration_number: impl Into<String>, chassis_suffix: impl Into<String>) -> Self {
        Self { registration_number: registration_number.into(), chassis_suffix: chassis_suffix.into() }
    }
}

/// The single record every run reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub success: bool,
    pub mobile_number: String,
    pub error: String,
    pub response_time_seconds: f64,
}

impl LookupResult {
    pub fn found(mobile_number: impl Into<String>, elapsed_seconds: f64) -> Self {
        Self {
            success: true,
            mobile_number: mobile_number.into(),
            error: String::new(),
            response_time_seconds: round_seconds(elapsed_seconds),
        }
    }

    pub fn failed(error: impl Into<String>, elapsed_seconds: f64) -> Self {
        Self {
            success: false,
            mobile_number: String::new(),
            error: error.into(),
            response_time_seconds: round_seconds(elapsed_seconds),
        }
    }

    fn from_outcome(outcome: Result<String>, started: Instant) -> Self {
        let elapsed = started.elapsed().as_secs_f64();
        match outcome {
            Ok(mobile) if !mobile.is_empty() => Self::found(mobile, elapsed),
            Ok(_) => Self::failed(EMPTY_MOBILE, elapsed),
            // The empty-field outcome carries no kind prefix
            Err(e @ BrowserError::EmptyResult(_)) => Self::failed(e.to_string(), elapsed),
            Err(e) => Self::failed(e.report(), elapsed),
        }
    }
}

/// Two decimals, never negative
fn round_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 { (seconds * 100.0).round() / 100.0 } else { 0.0 }
}

/// Run the lookup on an already open page
pub fn run_on_page<P: Page + ?Sized>(page: &P, request: &LookupRequest, config: &FlowConfig) -> LookupResult {
    let started = Instant::now();
    let outcome = MobileLookupFlow::new(page, config).run(request);
    LookupResult::from_outcome(outcome, started)
}

/// Launch a disposable browser, run the lookup, and tear everything down
///
/// The browser process and its profile directory are released before this
/// returns, whatever the outcome.
pub fn lookup_mobile(request: &LookupRequest, launch: LaunchOptions, config: &FlowConfig) -> LookupResult {
    let started = Instant::now();
    log::info!("Looking up mobile number for {}", request.registration_number);

    let outcome = BrowserSession::launch(launch).and_then(|session| {
        let mut flow = MobileLookupFlow::new(&session, config);
        flow.run(request)
    });

    let result = LookupResult::from_outcome(outcome, started);
    log::info!("Lookup finished in {:.2}s (success: {})", result.response_time_seconds, result.success);
    result
}
