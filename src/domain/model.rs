use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

pub const ABSENT: &str = "absent";
pub const MALFORMED: &str = "malformed";

/// Outcome of pulling one field out of a page.
///
/// `Absent` means the page has no such data (e.g. a restaurant nobody has
/// rated yet), `Malformed` means the node exists but its text has an
/// unexpected shape. Both serialize as literal strings so consumers can tell
/// them apart from a real zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extracted<T> {
    Value(T),
    Absent,
    Malformed,
}

impl<T> Extracted<T> {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Extracted::Malformed)
    }
}

impl<T: Serialize> Serialize for Extracted<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Extracted::Value(v) => v.serialize(serializer),
            Extracted::Absent => serializer.serialize_str(ABSENT),
            Extracted::Malformed => serializer.serialize_str(MALFORMED),
        }
    }
}

/// A downloaded document. Each restaurant gets its own value, nothing is
/// reused between iterations.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantRecord {
    pub name: String,
    pub url: String,
    pub rating: Extracted<u8>,
    pub rating_count: Extracted<u32>,
    pub delivery_fee: Option<String>,
    pub full_address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub municipal_district: Option<String>,
}

/// What the geocoding provider answered for one address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResponse {
    pub raw: serde_json::Value,
    pub coordinates: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct ScrapedRestaurant {
    pub record: RestaurantRecord,
    pub geocoding: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct GeocodingDocument {
    pub file_name: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub restaurants: usize,
    pub rated: usize,
    pub unrated: usize,
    pub malformed_ratings: usize,
    pub malformed_rating_counts: usize,
    pub geocoded: usize,
    pub without_address: usize,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn from_records(records: &[RestaurantRecord]) -> Self {
        let mut summary = RunSummary {
            restaurants: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.rating {
                Extracted::Value(_) => summary.rated += 1,
                Extracted::Absent => summary.unrated += 1,
                Extracted::Malformed => summary.malformed_ratings += 1,
            }
            if record.rating_count.is_malformed() {
                summary.malformed_rating_counts += 1;
            }
            if record.lat.is_some() && record.lng.is_some() {
                summary.geocoded += 1;
            }
            if record.full_address.is_none() {
                summary.without_address += 1;
            }
        }

        summary.finished_at = Some(Utc::now());
        summary
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<RestaurantRecord>,
    pub csv_output: String,
    pub json_output: String,
    pub geocoding_documents: Vec<GeocodingDocument>,
    pub summary: RunSummary,
}
