pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod scrape;
pub mod utils;

pub use adapters::{GoogleGeocoder, LocalStorage, PageFetcher};
pub use config::AppConfig;
pub use crate::core::{etl::EtlEngine, pipeline::RestaurantPipeline};
pub use domain::model::{Extracted, RestaurantRecord};
pub use utils::error::{EtlError, Result};
