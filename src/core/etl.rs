use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs all three phases; any error aborts before anything is written.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting scrape...");

        tracing::info!("Extracting restaurants...");
        let scraped = self.pipeline.extract().await?;
        tracing::info!("Extracted {} restaurants", scraped.len());

        tracing::info!("Transforming records...");
        let transformed = self.pipeline.transform(scraped).await?;
        tracing::info!("Transformed {} records", transformed.records.len());

        tracing::info!("Loading outputs...");
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
