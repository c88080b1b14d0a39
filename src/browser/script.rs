//! Page scripts used by [`super::BrowserSession`] to resolve locators in the page

use crate::locator::{Locator, Scope};

/// JS string literal for `value`
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Expression yielding the first element matched by `locator` under `root`, or null
fn locate_expr(doc: &str, root: &str, locator: &Locator) -> String {
    match locator {
        Locator::Id(q) => format!("{}.querySelector({})", root, js_string(&format!("[id={}]", js_string(q)))),
        Locator::Name(q) => format!("{}.querySelector({})", root, js_string(&format!("[name={}]", js_string(q)))),
        Locator::Css(q) => format!("{}.querySelector({})", root, js_string(q)),
        Locator::XPath(q) => format!(
            "{}.evaluate({}, {}, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            doc,
            js_string(q),
            root
        ),
    }
}

/// Statements binding `doc` and `root` for `scope`, returning null when the scope is missing
fn scope_prelude(scope: &Scope) -> String {
    match scope {
        Scope::Document => "var doc = document; var root = document;".to_string(),
        Scope::Within(outer) => format!(
            "var doc = document; var root = {}; if (!root) return null;",
            locate_expr("document", "document", outer)
        ),
        Scope::Frame(index) => format!(
            "var frame = document.querySelectorAll('iframe')[{}]; if (!frame) return null; \
             var doc = null; try {{ doc = frame.contentDocument; }} catch (e) {{ return null; }} \
             if (!doc) return null; var root = doc;",
            index
        ),
    }
}

/// Wrap `body` in an IIFE where `el` is the element matched by `locator` in `scope`
pub(crate) fn with_element(scope: &Scope, locator: &Locator, body: &str) -> String {
    format!(
        "(function() {{ {} var el = {}; {} }})()",
        scope_prelude(scope),
        locate_expr("doc", "root", locator),
        body
    )
}

pub(crate) fn exists(scope: &Scope, locator: &Locator) -> String {
    with_element(scope, locator, "return !!el;")
}

/// Rendered with a non-empty box, not hidden and not disabled
pub(crate) fn clickable(scope: &Scope, locator: &Locator) -> String {
    with_element(
        scope,
        locator,
        "if (!el || el.disabled || el.getAttribute('aria-disabled') === 'true') return false; \
         var style = (el.ownerDocument.defaultView || window).getComputedStyle(el); \
         if (style.visibility === 'hidden' || style.display === 'none') return false; \
         var rect = el.getBoundingClientRect(); return rect.width > 0 && rect.height > 0;",
    )
}

pub(crate) fn click(scope: &Scope, locator: &Locator) -> String {
    with_element(scope, locator, "if (!el) return false; el.click(); return true;")
}

/// Focus the element and empty it so that typed keys replace the old value
pub(crate) fn focus_and_clear(locator: &Locator) -> String {
    with_element(
        &Scope::Document,
        locator,
        "if (!el) return false; el.focus(); \
         if ('value' in el) { el.value = ''; el.dispatchEvent(new Event('input', { bubbles: true })); } \
         return true;",
    )
}

pub(crate) fn value(locator: &Locator) -> String {
    with_element(
        &Scope::Document,
        locator,
        "if (!el) return null; return el.value === undefined || el.value === null ? '' : String(el.value);",
    )
}

pub(crate) fn text(scope: &Scope, locator: &Locator) -> String {
    with_element(scope, locator, "if (!el) return null; return el.innerText || el.textContent || '';")
}

pub(crate) const READY_STATE: &str = "document.readyState === 'complete'";

pub(crate) const FRAME_COUNT: &str = "document.querySelectorAll('iframe').length";

pub(crate) const CLEAR_STORAGE: &str =
    "(function() { try { window.localStorage.clear(); } catch (e) {} try { window.sessionStorage.clear(); } catch (e) {} return true; })()";

pub(crate) const SOFT_RELOAD: &str = "(function() { window.location.reload(); return true; })()";
