//! Fallback element lookup
//!
//! The portal's markup drifts between deployments, so every element the flow
//! touches is described by an ordered list of candidate [`Locator`]s. The first
//! candidate that matches wins; a candidate that does not match, or that fails
//! to evaluate, is skipped.

use crate::page::Page;
use std::{borrow::Cow, fmt};

/// How to find a single element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Match by `id` attribute (ids may contain `:`, so this is not a CSS query)
    Id(Cow<'static, str>),
    /// Match by `name` attribute
    Name(Cow<'static, str>),
    /// CSS selector
    Css(Cow<'static, str>),
    /// XPath expression, evaluated relative to the scope
    XPath(Cow<'static, str>),
}

impl Locator {
    pub const fn id(query: &'static str) -> Self {
        Locator::Id(Cow::Borrowed(query))
    }

    pub const fn name(query: &'static str) -> Self {
        Locator::Name(Cow::Borrowed(query))
    }

    pub const fn css(query: &'static str) -> Self {
        Locator::Css(Cow::Borrowed(query))
    }

    pub const fn xpath(query: &'static str) -> Self {
        Locator::XPath(Cow::Borrowed(query))
    }

    /// The raw query string
    pub fn query(&self) -> &str {
        match self {
            Locator::Id(q) | Locator::Name(q) | Locator::Css(q) | Locator::XPath(q) => q,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(q) => write!(f, "id={}", q),
            Locator::Name(q) => write!(f, "name={}", q),
            Locator::Css(q) => write!(f, "css={}", q),
            Locator::XPath(q) => write!(f, "xpath={}", q),
        }
    }
}

/// Where a lookup is rooted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The top-level document
    Document,
    /// Inside the first element matched by the locator
    Within(Locator),
    /// Inside the document of the n-th iframe
    Frame(usize),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Document => write!(f, "document"),
            Scope::Within(locator) => write!(f, "within {}", locator),
            Scope::Frame(index) => write!(f, "frame #{}", index),
        }
    }
}

/// Return the first candidate that matches in `scope`
pub fn find_first<P: Page + ?Sized>(page: &P, scope: &Scope, candidates: &[Locator]) -> Option<Locator> {
    for candidate in candidates {
        match page.exists(scope, candidate) {
            Ok(true) => return Some(candidate.clone()),
            Ok(false) => log::debug!("No match for {} in {}", candidate, scope),
            Err(e) => log::debug!("Lookup of {} in {} failed: {}", candidate, scope, e),
        }
    }
    None
}

/// Click the first candidate that matches and accepts the click
pub fn click_first<P: Page + ?Sized>(page: &P, scope: &Scope, candidates: &[Locator]) -> Option<Locator> {
    for candidate in candidates {
        if !matches!(page.exists(scope, candidate), Ok(true)) {
            continue;
        }
        match page.click(scope, candidate) {
            Ok(()) => return Some(candidate.clone()),
            Err(e) => log::debug!("Click on {} in {} failed: {}", candidate, scope, e),
        }
    }
    None
}
