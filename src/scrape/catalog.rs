use super::first_element;
use crate::domain::model::FetchedPage;
use crate::utils::error::{EtlError, Result};
use scraper::{Html, Selector};

/// The first list on the catalog page holds the Prague restaurants.
pub const CATALOG_LIST_SELECTOR: &str = "ul.catalogue__list";

/// Every `href` inside the Prague catalog list, in document order.
///
/// Duplicates are kept. A page without the list is a hard error: the layout
/// changed and nothing downstream would make sense.
pub fn restaurant_refs(page: &FetchedPage) -> Result<Vec<String>> {
    let document = Html::parse_document(&page.body);

    let list = first_element(&document, CATALOG_LIST_SELECTOR).ok_or_else(|| {
        EtlError::CatalogStructure {
            url: page.url.clone(),
            message: format!("no element matches '{}'", CATALOG_LIST_SELECTOR),
        }
    })?;

    let with_href = Selector::parse("[href]").map_err(|e| EtlError::ProcessingError {
        message: format!("Invalid selector: {}", e),
    })?;

    let refs: Vec<String> = list
        .select(&with_href)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_owned)
        .collect();

    tracing::debug!("Catalog {} lists {} references", page.url, refs.len());
    Ok(refs)
}

/// Restaurant name as exported: the reference path without surrounding slashes.
pub fn restaurant_name(reference: &str) -> String {
    reference.trim_matches('/').to_string()
}
