use crate::error::{BrowserError, Result};
use rand::{Rng, distributions::Alphanumeric};
use std::{
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};
use tempfile::TempDir;

const PROFILE_PREFIX: &str = "vh_profile_";

/// Fresh Chrome user-data directory, removed from disk when dropped
#[derive(Debug)]
pub struct TempProfile {
    dir: TempDir,
}

impl TempProfile {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(PROFILE_PREFIX)
            .tempdir()
            .map_err(|e| BrowserError::ProfileFailed(e.to_string()))?;
        log::debug!("Created browser profile at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Unix seconds followed by four random alphanumerics
pub fn cache_buster() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    let suffix: String = rand::thread_rng().sample_iter(&Alphanumeric).take(4).map(char::from).collect();
    format!("{}{}", secs, suffix)
}
