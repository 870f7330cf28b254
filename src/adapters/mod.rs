// Adapters layer: concrete implementations for external systems (http, geocoding, storage).

pub mod google;
pub mod http;
pub mod storage;

pub use google::GoogleGeocoder;
pub use http::PageFetcher;
pub use storage::LocalStorage;
