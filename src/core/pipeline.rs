use crate::adapters::PageFetcher;
use crate::core::export;
use crate::core::{ConfigProvider, Geocoder, Pipeline, Storage};
use crate::domain::model::{RestaurantRecord, RunSummary, ScrapedRestaurant, TransformResult};
use crate::scrape::{self, catalog, district, location};
use crate::utils::error::Result;
use url::Url;

/// Catalog -> detail pages -> records -> files, one restaurant at a time.
pub struct RestaurantPipeline<S: Storage, C: ConfigProvider, G: Geocoder> {
    storage: S,
    config: C,
    geocoder: G,
    fetcher: PageFetcher,
}

impl<S: Storage, C: ConfigProvider, G: Geocoder> RestaurantPipeline<S, C, G> {
    pub fn new(storage: S, config: C, geocoder: G) -> Result<Self> {
        let fetcher = PageFetcher::new(&config)?;
        Ok(Self {
            storage,
            config,
            geocoder,
            fetcher,
        })
    }

    fn site_url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(self.config.base_url())?.join(path)?)
    }

    pub async fn walk_catalog(&self) -> Result<Vec<String>> {
        let catalog_url = self.site_url(self.config.catalog_path())?;
        let page = self.fetcher.fetch(catalog_url.as_str()).await?;
        catalog::restaurant_refs(&page)
    }

    /// Fetches the detail page once and reads every field from that copy.
    pub async fn scrape_restaurant(&self, reference: &str) -> Result<ScrapedRestaurant> {
        let name = catalog::restaurant_name(reference);
        let url = self.site_url(reference)?.to_string();

        let page = self.fetcher.fetch(&url).await?;
        let fields = scrape::read_detail(&page);

        let location = location::resolve_location(&self.geocoder, &name, fields.address).await;
        let municipal_district = district::resolve_district(location.address.as_deref());

        Ok(ScrapedRestaurant {
            record: RestaurantRecord {
                name,
                url,
                rating: fields.rating,
                rating_count: fields.rating_count,
                delivery_fee: fields.delivery_fee,
                full_address: location.address,
                lat: location.lat,
                lng: location.lng,
                municipal_district,
            },
            geocoding: location.raw,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, G: Geocoder> Pipeline for RestaurantPipeline<S, C, G> {
    async fn extract(&self) -> Result<Vec<ScrapedRestaurant>> {
        let references = self.walk_catalog().await?;
        tracing::info!("Found {} restaurants in the catalog", references.len());

        let mut scraped = Vec::with_capacity(references.len());
        for (index, reference) in references.iter().enumerate() {
            tracing::debug!("[{}/{}] {}", index + 1, references.len(), reference);
            scraped.push(self.scrape_restaurant(reference).await?);
        }

        Ok(scraped)
    }

    async fn transform(&self, data: Vec<ScrapedRestaurant>) -> Result<TransformResult> {
        let geocoding_documents = export::geocoding_documents(&data)?;
        let records: Vec<RestaurantRecord> = data.into_iter().map(|s| s.record).collect();

        let csv_output = export::to_csv(&records)?;
        let json_output = export::to_json(&records)?;
        let summary = RunSummary::from_records(&records);

        Ok(TransformResult {
            records,
            csv_output,
            json_output,
            geocoding_documents,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        tracing::debug!(
            "Writing {} rows and {} geocoding documents",
            result.records.len(),
            result.geocoding_documents.len()
        );

        self.storage
            .write_file(export::CSV_FILE, result.csv_output.as_bytes())
            .await?;
        self.storage
            .write_file(export::JSON_FILE, result.json_output.as_bytes())
            .await?;

        for document in &result.geocoding_documents {
            self.storage
                .write_file(&document.file_name, document.body.as_bytes())
                .await?;
        }

        let summary = serde_json::to_vec_pretty(&result.summary)?;
        self.storage.write_file(export::SUMMARY_FILE, &summary).await?;

        let s = &result.summary;
        tracing::info!(
            "📊 {} restaurants: {} rated, {} unrated, {} malformed ratings, {} malformed counts, {} geocoded, {} without address",
            s.restaurants,
            s.rated,
            s.unrated,
            s.malformed_ratings,
            s.malformed_rating_counts,
            s.geocoded,
            s.without_address
        );

        Ok(export::CSV_FILE.to_string())
    }
}
