//! Disposable Chrome sessions
//!
//! Every run gets its own Chrome process and its own profile directory. Both
//! are owned by [`BrowserSession`] and released when it is dropped.

pub mod config;
pub mod profile;
mod script;
pub mod session;

pub use config::LaunchOptions;
pub use profile::{TempProfile, cache_buster};
pub use session::BrowserSession;
