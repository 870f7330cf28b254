use super::first_element;
use crate::core::Geocoder;
use scraper::Html;
use serde_json::Value;
use url::Url;

pub const MAP_LINK_SELECTOR: &str = r#"a[href*="maps.google"], a[href*="google.com/maps"]"#;

/// Query parameters that carry the human-readable address, in order of preference.
const ADDRESS_PARAMS: [&str; 3] = ["q", "query", "address"];

/// Address and coordinates of one restaurant. Built fresh for every
/// restaurant so a failed lookup can never carry over the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub raw: Option<Value>,
}

/// Reads the address out of the detail page's map link.
pub fn find_address(document: &Html, page_url: &str) -> Option<String> {
    let link = first_element(document, MAP_LINK_SELECTOR)?;
    let href = link.value().attr("href")?;

    let target = match Url::parse(page_url) {
        Ok(base) => base.join(href).ok()?,
        Err(_) => Url::parse(href).ok()?,
    };

    ADDRESS_PARAMS.iter().find_map(|name| {
        target
            .query_pairs()
            .find(|(key, _)| key == *name)
            .map(|(_, value)| value.replace('+', " ").trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Geocodes `address` if there is one. Provider failures are logged and leave
/// the coordinates empty while the address itself is kept.
pub async fn resolve_location<G: Geocoder>(
    geocoder: &G,
    restaurant: &str,
    address: Option<String>,
) -> Location {
    let Some(address) = address else {
        tracing::debug!("{}: no map link, skipping geocoding", restaurant);
        return Location::default();
    };

    match geocoder.geocode(&address).await {
        Ok(response) => {
            let (lat, lng) = response.coordinates.unzip();
            if lat.is_none() {
                tracing::warn!("{}: geocoder found no match for '{}'", restaurant, address);
            }
            Location {
                address: Some(address),
                lat,
                lng,
                raw: Some(response.raw),
            }
        }
        Err(e) => {
            tracing::warn!(
                "{}: geocoding '{}' failed ({:?}): {}",
                restaurant,
                address,
                e.category(),
                e
            );
            Location {
                address: Some(address),
                ..Location::default()
            }
        }
    }
}
