//! Per-field rules for a restaurant detail page.
//!
//! None of these fail: a missing node or an unexpected shape becomes an
//! [`Extracted`] sentinel or `None` so that one odd restaurant never stops
//! the run.

use super::{child_elements, first_element, normalized_text};
use crate::domain::model::Extracted;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

pub const RATING_SELECTOR: &str = "div.restaurant-rating__text-top";
pub const RATING_COUNT_SELECTOR: &str = "div.restaurant-rating__text-bottom";
/// The info panel and the delivery box both render the price, depending on page layout.
pub const DELIVERY_PRICE_SELECTOR: &str =
    ".restaurant-info__delivery-price, .restaurant-delivery__price";
pub const RATING_ACTIVATOR_CLASS: &str = "modal-activator--rating";

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

/// Percentage rating shown in the header, e.g. `<strong>87%</strong>`.
///
/// Unrated restaurants either lack the node or render it empty; both map to
/// `Absent`, never to zero.
pub fn extract_rating(document: &Html) -> Extracted<u8> {
    let Some(node) = first_element(document, RATING_SELECTOR) else {
        return Extracted::Absent;
    };
    let Some(value) = child_elements(node).next() else {
        return Extracted::Absent;
    };

    parse_percentage(&normalized_text(value))
}

pub fn parse_percentage(text: &str) -> Extracted<u8> {
    let Some(number) = text.trim().strip_suffix('%') else {
        return Extracted::Malformed;
    };

    match number.trim_end().parse::<u8>() {
        Ok(n) if n <= 100 => Extracted::Value(n),
        _ => Extracted::Malformed,
    }
}

/// Number of ratings under the percentage.
///
/// The first child is either a plain `<span>` label ("zatím bez hodnocení")
/// meaning zero ratings, or a modal activator link whose text starts with the
/// count.
pub fn extract_rating_count(document: &Html) -> Extracted<u32> {
    let Some(node) = first_element(document, RATING_COUNT_SELECTOR) else {
        return Extracted::Value(0);
    };
    let Some(first) = child_elements(node).next() else {
        return Extracted::Value(0);
    };

    let element = first.value();
    if element.classes().any(|class| class == RATING_ACTIVATOR_CLASS) {
        let text = normalized_text(first);
        return match FIRST_NUMBER.find(&text).map(|m| m.as_str().parse::<u32>()) {
            Some(Ok(count)) => Extracted::Value(count),
            _ => Extracted::Malformed,
        };
    }

    if element.name() == "span" {
        Extracted::Value(0)
    } else {
        Extracted::Malformed
    }
}

/// Delivery price as rendered; tiered prices are kept verbatim.
pub fn extract_delivery_fee(document: &Html) -> Option<String> {
    let node = first_element(document, DELIVERY_PRICE_SELECTOR)?;
    let text = normalized_text(node);
    (!text.is_empty()).then_some(text)
}
