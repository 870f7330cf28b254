use crate::config::AppConfig;
use crate::core::Geocoder;
use crate::domain::model::GeocodeResponse;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Client for the Google Geocoding JSON API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
    region: String,
}

impl GoogleGeocoder {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        region: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            region: region.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.google.endpoint.as_str(),
            config.api_key()?,
            config.google.region.as_str(),
            Duration::from_secs(config.site.timeout_seconds),
        )
    }
}

impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse> {
        let raw: Value = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("address", address),
                ("key", self.api_key.as_str()),
                ("region", self.region.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let status = raw
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match status.as_deref() {
            Some("OK") => {
                let coordinates = first_location(&raw);
                Ok(GeocodeResponse { raw, coordinates })
            }
            Some("ZERO_RESULTS") => Ok(GeocodeResponse {
                raw,
                coordinates: None,
            }),
            status => {
                let detail = raw
                    .get("error_message")
                    .and_then(Value::as_str)
                    .unwrap_or("no error message");
                Err(EtlError::ProcessingError {
                    message: format!(
                        "geocoding provider answered {} for '{}': {}",
                        status.unwrap_or("without status"),
                        address,
                        detail
                    ),
                })
            }
        }
    }
}

/// Latitude and longitude of the first match, if the response has one.
pub fn first_location(raw: &Value) -> Option<(f64, f64)> {
    let location = raw
        .get("results")?
        .as_array()?
        .first()?
        .get("geometry")?
        .get("location")?;
    let lat = location.get("lat")?.as_f64()?;
    let lng = location.get("lng")?.as_f64()?;
    Some((lat, lng))
}
