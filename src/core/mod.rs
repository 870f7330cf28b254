pub mod etl;
pub mod export;
pub mod pipeline;

pub use crate::domain::model::{RestaurantRecord, ScrapedRestaurant, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Geocoder, Pipeline, Storage};
pub use crate::utils::error::Result;
