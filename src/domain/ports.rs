use crate::domain::model::{GeocodeResponse, ScrapedRestaurant, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn catalog_path(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// Turns a free-text address into the provider's raw answer.
pub trait Geocoder: Send + Sync {
    fn geocode(
        &self,
        address: &str,
    ) -> impl std::future::Future<Output = Result<GeocodeResponse>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ScrapedRestaurant>>;
    async fn transform(&self, data: Vec<ScrapedRestaurant>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
