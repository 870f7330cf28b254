//! HTML side of the pipeline: everything that reads a downloaded page.
//!
//! All functions here are synchronous. A parsed [`Html`] tree is not `Send`,
//! so it is built and dropped inside these helpers and never crosses an
//! `.await` in the driver.

pub mod catalog;
pub mod district;
pub mod fields;
pub mod location;

use crate::domain::model::{Extracted, FetchedPage};
use scraper::{ElementRef, Html, Selector};

/// Everything read from one restaurant detail page, from a single parse.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailFields {
    pub rating: Extracted<u8>,
    pub rating_count: Extracted<u32>,
    pub delivery_fee: Option<String>,
    pub address: Option<String>,
}

pub fn read_detail(page: &FetchedPage) -> DetailFields {
    let document = Html::parse_document(&page.body);

    let rating = fields::extract_rating(&document);
    let rating_count = fields::extract_rating_count(&document);
    let delivery_fee = fields::extract_delivery_fee(&document);
    let address = location::find_address(&document, &page.url);

    match rating {
        Extracted::Absent => tracing::debug!("{}: no rating yet", page.url),
        Extracted::Malformed => tracing::warn!("{}: rating node has unexpected text", page.url),
        Extracted::Value(_) => {}
    }
    if rating_count.is_malformed() {
        tracing::warn!("{}: rating count node has unexpected shape", page.url);
    }
    if delivery_fee.is_none() {
        tracing::debug!("{}: no delivery price shown", page.url);
    }

    DetailFields {
        rating,
        rating_count,
        delivery_fee,
        address,
    }
}

pub(crate) fn first_element<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

pub(crate) fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Rendered text with runs of whitespace collapsed to single spaces.
pub(crate) fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
