//! Entry points, markers and selector chains of the Vahan citizen portal
//!
//! Everything here is tied to the portal's current markup.

use crate::locator::Locator;
use url::Url;

pub const HOMEPAGE_URL: &str = "https://vahan.parivahan.gov.in/vahanservice/vahan/ui/statevalidation/homepage.xhtml";

/// Paths hit on the portal origin to end any server-side session before starting
pub const LOGOUT_PATHS: &[&str] = &["/vahanservice/logout", "/vahanservice/vahan/logout"];

pub const LOGIN_URL_MARKER: &str = "login.xhtml";
pub const FITNESS_FORM_URL_MARKER: &str = "form_reschedule_fitness.xhtml";
pub const SESSION_CONFLICT_TEXT: &str = "Previous session is already active";

pub const UPDATE_MOBILE_POPUP_CLOSE: Locator = Locator::css("#updatemobileno .btn-close");

pub const REGISTRATION_INPUT: &[Locator] = &[
    Locator::id("regnid"),
    Locator::name("regnid"),
    Locator::xpath("//input[contains(@id, 'regn')]"),
    Locator::xpath("//input[contains(@name, 'regn')]"),
    Locator::xpath("//input[@placeholder]"),
];

pub const CONSENT_CHECKBOX: &[Locator] = &[
    Locator::xpath(
        "//label[contains(normalize-space(.), 'Privacy Policy') or contains(normalize-space(.), 'Terms of Service')]",
    ),
    Locator::xpath("//label[contains(normalize-space(.), 'Privacy') or contains(normalize-space(.), 'Terms')]"),
    Locator::xpath("//div[contains(@class,'ui-chkbox')]//div[contains(@class,'ui-chkbox-box')]"),
];

/// Consent checkbox candidates tried inside each iframe when the document has none
pub const FRAME_CONSENT_CHECKBOX: &[Locator] = &[
    Locator::xpath("//div[contains(@class,'ui-chkbox')]//div[contains(@class,'ui-chkbox-box')]"),
    Locator::xpath("//label[contains(normalize-space(.), 'Privacy')]"),
    Locator::xpath("//input[@type='checkbox']"),
];

pub const PROCEED_BUTTON: Locator = Locator::id("proccedHomeButtonId");

pub const SESSION_CONFLICT_MODAL: &[Locator] = &[
    Locator::xpath("//div[contains(@class,'modal') and contains(@class,'show')]"),
    Locator::xpath("//div[contains(@class,'ui-dialog') and contains(@style,'display')]"),
];

pub const SESSION_CONFLICT_DISMISS: &[Locator] = &[
    Locator::xpath(".//button[contains(@class,'btn-close')]"),
    Locator::xpath(".//button[normalize-space(.)='OK']"),
];

pub const VISIBLE_DIALOG: &[Locator] = &[
    Locator::xpath(
        "//div[contains(@class,'ui-dialog') and contains(@style,'display') and not(contains(@style,'display: none'))]",
    ),
    Locator::xpath("//div[contains(@class,'modal') and contains(@class,'show')]"),
];

pub const DIALOG_PROCEED: &[Locator] = &[
    Locator::xpath(".//button[normalize-space(.)='Proceed']"),
    Locator::xpath(".//a[normalize-space(.)='Proceed']"),
    Locator::xpath(".//span[normalize-space(.)='Proceed']/ancestor::button[1]"),
    Locator::xpath(".//button[contains(@class,'btn') and contains(.,'Proceed')]"),
];

pub const FITNESS_LINK: &[Locator] = &[
    Locator::xpath("//a[.//div[contains(text(), 'Re-Schedule Renewal of Fitness Application')]]"),
    Locator::xpath("//a[contains(@href, 'fitness')]"),
    Locator::xpath("//a[.//div[contains(text(), 'Fitness')]]"),
];

pub const CHASSIS_INPUT: Locator = Locator::id("balanceFeesFine:tf_chasis_no");
pub const VALIDATE_BUTTON: Locator = Locator::id("balanceFeesFine:validate_dtls");
pub const MOBILE_FIELD: Locator = Locator::id("balanceFeesFine:tf_mobile");

/// `scheme://host[:port]` of an absolute URL, without credentials
pub fn origin(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// `url` with a `_cb` query parameter that defeats any cached copy
pub fn cache_busted_url(url: &Url) -> Url {
    let mut busted = url.clone();
    busted.query_pairs_mut().append_pair("_cb", &crate::browser::cache_buster());
    busted
}
