use crate::domain::model::{Extracted, GeocodingDocument, RestaurantRecord, ScrapedRestaurant};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;

pub const CSV_FILE: &str = "dame_jidlo_prague.csv";
pub const JSON_FILE: &str = "dame_jidlo_prague.json";
pub const GEOCODING_DIR: &str = "geocoding";
pub const SUMMARY_FILE: &str = "run_summary.json";

pub const COLUMNS: [&str; 10] = [
    "id",
    "name",
    "rating",
    "rating_count",
    "delivery_fee",
    "full_address",
    "lat",
    "lng",
    "municipal_district",
    "url",
];

/// One exported row. Field order is the column order.
#[derive(Debug, Serialize)]
struct TableRow<'a> {
    id: usize,
    name: &'a str,
    rating: &'a Extracted<u8>,
    rating_count: &'a Extracted<u32>,
    delivery_fee: Option<&'a str>,
    full_address: Option<&'a str>,
    lat: Option<f64>,
    lng: Option<f64>,
    municipal_district: Option<&'a str>,
    url: &'a str,
}

fn table_rows(records: &[RestaurantRecord]) -> impl Iterator<Item = TableRow<'_>> {
    records.iter().enumerate().map(|(id, record)| TableRow {
        id,
        name: &record.name,
        rating: &record.rating,
        rating_count: &record.rating_count,
        delivery_fee: record.delivery_fee.as_deref(),
        full_address: record.full_address.as_deref(),
        lat: record.lat,
        lng: record.lng,
        municipal_district: record.municipal_district.as_deref(),
        url: &record.url,
    })
}

pub fn to_csv(records: &[RestaurantRecord]) -> Result<String> {
    // Header is written by hand so an empty run still yields the column row.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in table_rows(records) {
        writer.serialize(row)?;
    }

    let data = writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("CSV buffer flush failed: {}", e),
    })?;
    String::from_utf8(data).map_err(|e| EtlError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

pub fn to_json(records: &[RestaurantRecord]) -> Result<String> {
    let rows: Vec<TableRow<'_>> = table_rows(records).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// File stem for a restaurant's geocoding archive. Nested reference paths
/// would otherwise become directories.
pub fn geocoding_file_name(name: &str) -> String {
    let stem = if name.is_empty() {
        "index".to_string()
    } else {
        name.replace('/', "_")
    };
    format!("{}/{}.json", GEOCODING_DIR, stem)
}

pub fn geocoding_documents(scraped: &[ScrapedRestaurant]) -> Result<Vec<GeocodingDocument>> {
    scraped
        .iter()
        .filter_map(|s| s.geocoding.as_ref().map(|raw| (&s.record.name, raw)))
        .map(|(name, raw)| -> Result<GeocodingDocument> {
            Ok(GeocodingDocument {
                file_name: geocoding_file_name(name),
                body: serde_json::to_string_pretty(raw)?,
            })
        })
        .collect()
}
