//! # vahan-lookup
//!
//! Two independent utilities for Indian vehicle registration lookups.
//!
//! ## Mobile number lookup
//!
//! Drives a disposable headless Chrome through the Vahan citizen portal's
//! fitness-renewal flow and reads the mobile number the portal pre-fills for a
//! registration number and chassis suffix.
//!
//! ```rust,no_run
//! use vahan_lookup::{FlowConfig, LaunchOptions, LookupRequest, lookup_mobile};
//!
//! let request = LookupRequest::new("MH12AB1234", "54321");
//! let result = lookup_mobile(&request, LaunchOptions::default(), &FlowConfig::default());
//! println!("{}", serde_json::to_string(&result).unwrap());
//! ```
//!
//! The flow is written against the [`Page`] trait; [`BrowserSession`] is the
//! Chrome implementation. Every element is found through an ordered list of
//! fallback [`Locator`]s, and every wait is a bounded [`Poll`].
//!
//! ## Vehicle info service
//!
//! With the `server` feature, [`service::router`] serves
//! `GET /api/vehicle-info?rc=...`, scraping a vahanx.in registration page into a
//! [`VehicleRecord`]. The parsing itself lives in [`scrape`] and needs no
//! network.
//!
//! ```rust,no_run
//! # #[cfg(feature = "server")]
//! # async fn serve() -> anyhow::Result<()> {
//! use vahan_lookup::service::{AppState, ServiceConfig, router};
//!
//! let state = AppState::new(&ServiceConfig::default())?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8888").await?;
//! axum::serve(listener, router(state)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Chrome session with a throwaway profile
//! - [`page`]: page operations the flow needs
//! - [`locator`]: fallback element lookup
//! - [`poll`]: fixed-interval bounded polling
//! - [`portal`]: portal URLs and selector chains
//! - [`flow`]: the step sequence and its session-conflict recovery
//! - [`lookup`]: run entry points and the reported result
//! - [`scrape`]: HTML field extraction
//! - [`service`]: HTTP service (requires `server` feature)
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod error;
pub mod flow;
pub mod locator;
pub mod lookup;
pub mod page;
pub mod poll;
pub mod portal;
pub mod scrape;

#[cfg(feature = "server")]
pub mod service;

pub use browser::{BrowserSession, LaunchOptions};
pub use error::{BrowserError, Result};
pub use flow::{FlowConfig, FlowState, MobileLookupFlow};
pub use locator::{Locator, Scope};
pub use lookup::{LookupRequest, LookupResult, lookup_mobile, run_on_page};
pub use page::Page;
pub use poll::Poll;
pub use scrape::{VehicleRecord, parse_vehicle_page};

#[cfg(feature = "server")]
pub use error::ScrapeError;
