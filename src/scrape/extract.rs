use indexmap::IndexMap;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static CARD_BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".hrcd-cardbody").expect("invalid selector: card body"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").expect("invalid selector: span"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").expect("invalid selector: p"));
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("invalid selector: h1"));
static H3: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").expect("invalid selector: h3"));
static EXPIRED_INSURANCE_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".insurance-alert-box.expired .title").expect("invalid selector: expired insurance title")
});

static RE_FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").expect("invalid regex: number"));

const SECTION_CARD_CLASS: &str = "hrc-details-card";

/// All text under the element
fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Each text node trimmed, empty ones dropped, joined without separator
fn stripped_text(element: ElementRef) -> String {
    element.text().map(str::trim).filter(|s| !s.is_empty()).collect::<String>()
}

/// `Owner Serial No` -> `owner_serial_no`
pub fn field_key(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}

/// A parsed registration details page
pub struct VehiclePage {
    document: Html,
}

impl VehiclePage {
    pub fn parse(html: &str) -> Self {
        Self { document: Html::parse_document(html) }
    }

    /// Trimmed text of the page's `h1`
    pub fn heading(&self) -> String {
        self.document.select(&H1).next().map(|h1| elem_text(h1).trim().to_string()).unwrap_or_default()
    }

    /// Value of the summary card whose label contains `label`, ignoring case
    pub fn card_value(&self, label: &str) -> String {
        let needle = label.to_lowercase();
        for card in self.document.select(&CARD_BODY) {
            let Some(span) = card.select(&SPAN).next() else {
                continue;
            };
            if elem_text(span).to_lowercase().contains(&needle) {
                return card.select(&PARAGRAPH).next().map(stripped_text).unwrap_or_default();
            }
        }
        String::new()
    }

    /// Labelled values of the details card headed by `header`
    ///
    /// Keys are [`field_key`] of the label. Labels missing from the card are
    /// missing from the map.
    pub fn section_fields(&self, header: &str, labels: &[&str]) -> IndexMap<String, String> {
        let mut fields = IndexMap::new();
        let Some(card) = self.section_card(header) else {
            return fields;
        };

        for label in labels {
            let span = card.select(&SPAN).find(|span| elem_text(*span).contains(label));
            if let Some(span) = span {
                let value = self.next_paragraph(span).map(stripped_text).unwrap_or_default();
                fields.insert(field_key(label), value);
            }
        }
        fields
    }

    /// Days since insurance expiry from the expired-insurance banner
    pub fn expired_days(&self) -> Option<u64> {
        let title = self.document.select(&EXPIRED_INSURANCE_TITLE).next()?;
        let text = elem_text(title);
        let digits = RE_FIRST_NUMBER.captures(&text)?.get(1)?;
        digits.as_str().parse().ok()
    }

    fn section_card(&self, header: &str) -> Option<ElementRef<'_>> {
        let needle = header.to_lowercase();
        let heading = self.document.select(&H3).find(|h3| elem_text(*h3).to_lowercase().contains(&needle))?;
        heading.ancestors().filter_map(ElementRef::wrap).find(|ancestor| {
            ancestor.value().name() == "div" && ancestor.value().classes().any(|class| class == SECTION_CARD_CLASS)
        })
    }

    /// First `p` after `element` in document order, its own descendants included
    fn next_paragraph(&self, element: ElementRef<'_>) -> Option<ElementRef<'_>> {
        let start = element.id();
        self.document
            .root_element()
            .descendants()
            .skip_while(|node| node.id() != start)
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|candidate| candidate.value().name() == "p")
    }
}
