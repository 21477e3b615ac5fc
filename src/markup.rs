//! CSS selectors for the retailer's current markup.
//!
//! These follow the site, not a design, and break silently whenever the
//! site changes its templates.

use eyre::{eyre, Result};
use scraper::{ElementRef, Selector};

pub(crate) const PRODUCT_CARD: &str = ".box_product";
pub(crate) const BRAND: &str = ".brandspec";
pub(crate) const TITLE: &str = ".titlespec";
pub(crate) const IMAGE: &str = ".img-responsive";
pub(crate) const PRICE: &str = r#"span[style*="color: #ff3030"]"#;
pub(crate) const DETAIL_LINK: &str = "a.detail.btn.btndes";

pub(crate) const PANEL_HEADING: &str = ".panel-heading";
pub(crate) const PANEL_BODY_CLASS: &str = "panel-body";
pub(crate) const SPEC_ROW: &str = ".row.bor_top";
pub(crate) const SPEC_LABEL: &str = ".quest";
pub(crate) const SPEC_VALUE: &str = ".answer";

/// Marker the site appends to prices, e.g. `12,900.-`.
pub(crate) const PRICE_SUFFIX: &str = ".-";

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| eyre!("invalid selector `{css}`: {e:?}"))
}

/// Text of every element under `element` matching `selector`, joined and trimmed.
///
/// A miss gives an empty string.
pub(crate) fn text_of(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|found| found.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// `attr` of the first element under `element` matching `selector`.
pub(crate) fn attr_of<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
    attr: &str,
) -> Option<&'a str> {
    element
        .select(selector)
        .next()
        .and_then(|found| found.value().attr(attr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn every_selector_parses() {
        for css in [
            PRODUCT_CARD,
            BRAND,
            TITLE,
            IMAGE,
            PRICE,
            DETAIL_LINK,
            PANEL_HEADING,
            SPEC_ROW,
            SPEC_LABEL,
            SPEC_VALUE,
        ] {
            assert!(selector(css).is_ok(), "{css}");
        }
    }

    #[test]
    fn text_joins_all_matches() {
        let html = Html::parse_fragment(
            r#"<div id="c"><b class="x"> Geforce </b><b class="x">RTX </b></div>"#,
        );
        let root = html.root_element();
        assert_eq!(text_of(root, &selector(".x").unwrap()), "Geforce RTX");
        assert_eq!(text_of(root, &selector(".missing").unwrap()), "");
    }
}
