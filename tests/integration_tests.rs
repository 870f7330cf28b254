use damejidlo_etl::core::export::{CSV_FILE, JSON_FILE, SUMMARY_FILE};
use damejidlo_etl::{AppConfig, EtlEngine, EtlError, GoogleGeocoder, LocalStorage, RestaurantPipeline};
use httpmock::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = r#"<html><body>
<div class="catalogue">
  <ul class="catalogue__list">
    <li><a href="/resto-a/">Resto A</a></li>
    <li><a href="/resto-b/">Resto B</a></li>
  </ul>
  <ul class="catalogue__list">
    <li><a href="/brno-only/">Brno</a></li>
  </ul>
</div>
</body></html>"#;

const RESTO_A: &str = r##"<html><body>
<h1>Resto A</h1>
<div class="restaurant-rating">
  <div class="restaurant-rating__text-top"><strong>87%</strong></div>
  <div class="restaurant-rating__text-bottom">
    <a class="modal-activator--rating" href="#hodnoceni">123 hodnocení</a>
  </div>
</div>
<div class="restaurant-delivery__price">29 Kč</div>
<a class="restaurant-info__map" href="https://maps.google.com/maps?q=Korunn%C3%AD+810%2F104%2C+Praha+10">Zobrazit na mapě</a>
</body></html>"##;

const RESTO_B: &str = r#"<html><body>
<h1>Resto B</h1>
<p>Restaurace momentálně nic nenabízí.</p>
</body></html>"#;

fn html_mock<'a>(server: &'a MockServer, path: &str, body: &str) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(body);
    })
}

fn config(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::with_api_key("test-key");
    config.site.base_url = server.base_url();
    config.google.endpoint = server.url("/maps/api/geocode/json");
    config
}

fn read_json(dir: &Path, file: &str) -> Value {
    let data = std::fs::read(dir.join(file)).unwrap();
    serde_json::from_slice(&data).unwrap()
}

#[tokio::test]
async fn test_end_to_end_two_restaurants() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let catalog_mock = html_mock(&server, "/katalog/", CATALOG);
    let resto_a_mock = html_mock(&server, "/resto-a/", RESTO_A);
    let resto_b_mock = html_mock(&server, "/resto-b/", RESTO_B);
    let brno_mock = html_mock(&server, "/brno-only/", RESTO_B);
    let geocode_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/geocode/json")
            .query_param("address", "Korunní 810/104, Praha 10")
            .query_param("key", "test-key");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Korunní 810/104, 101 00 Praha 10-Vinohrady, Czechia",
                "geometry": {"location": {"lat": 50.0755381, "lng": 14.4624589}}
            }]
        }));
    });

    let config = config(&server);
    let geocoder = GoogleGeocoder::from_config(&config).unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = RestaurantPipeline::new(storage, config, geocoder).unwrap();

    let output = EtlEngine::new(pipeline).run().await.unwrap();
    assert_eq!(output, CSV_FILE);

    catalog_mock.assert_hits(1);
    resto_a_mock.assert_hits(1);
    resto_b_mock.assert_hits(1);
    brno_mock.assert_hits(0);
    // resto-b has no map link, so only one provider call.
    geocode_mock.assert_hits(1);

    let rows = read_json(temp_dir.path(), JSON_FILE);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let a = &rows[0];
    assert_eq!(a["id"], 0);
    assert_eq!(a["name"], "resto-a");
    assert_eq!(a["url"], server.url("/resto-a/"));
    assert_eq!(a["rating"], 87);
    assert_eq!(a["rating_count"], 123);
    assert_eq!(a["delivery_fee"], "29 Kč");
    assert_eq!(a["full_address"], "Korunní 810/104, Praha 10");
    assert!((a["lat"].as_f64().unwrap() - 50.0755381).abs() < 1e-9);
    assert!((a["lng"].as_f64().unwrap() - 14.4624589).abs() < 1e-9);
    assert_eq!(a["municipal_district"], "10");

    let b = &rows[1];
    assert_eq!(b["id"], 1);
    assert_eq!(b["name"], "resto-b");
    assert_eq!(b["rating"], "absent");
    assert_eq!(b["rating_count"], 0);
    assert!(b["delivery_fee"].is_null());
    assert!(b["full_address"].is_null());
    assert!(b["lat"].is_null());
    assert!(b["lng"].is_null());
    assert!(b["municipal_district"].is_null());

    let csv_content = std::fs::read_to_string(temp_dir.path().join(CSV_FILE)).unwrap();
    let mut lines = csv_content.lines();
    assert_eq!(
        lines.next(),
        Some("id,name,rating,rating_count,delivery_fee,full_address,lat,lng,municipal_district,url")
    );
    assert!(lines.next().unwrap().starts_with("0,resto-a,87,123,29 Kč,"));
    assert!(lines.next().unwrap().starts_with("1,resto-b,absent,0,,,,,,"));
    assert_eq!(lines.next(), None);

    let archived = read_json(temp_dir.path(), "geocoding/resto-a.json");
    assert_eq!(archived["status"], "OK");
    assert!(archived["results"][0]["geometry"]["location"]["lat"].is_number());
    assert!(!temp_dir.path().join("geocoding/resto-b.json").exists());

    let summary = read_json(temp_dir.path(), SUMMARY_FILE);
    assert_eq!(summary["restaurants"], 2);
    assert_eq!(summary["rated"], 1);
    assert_eq!(summary["unrated"], 1);
    assert_eq!(summary["geocoded"], 1);
    assert_eq!(summary["without_address"], 1);
}

#[tokio::test]
async fn test_end_to_end_provider_down_keeps_addresses() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    html_mock(&server, "/katalog/", CATALOG);
    html_mock(&server, "/resto-a/", RESTO_A);
    html_mock(&server, "/resto-b/", RESTO_B);
    server.mock(|when, then| {
        when.method(GET).path("/maps/api/geocode/json");
        then.status(503);
    });

    let config = config(&server);
    let geocoder = GoogleGeocoder::from_config(&config).unwrap();
    let pipeline =
        RestaurantPipeline::new(LocalStorage::new(temp_dir.path()), config, geocoder).unwrap();

    EtlEngine::new(pipeline).run().await.unwrap();

    let rows = read_json(temp_dir.path(), JSON_FILE);
    let a = &rows[0];
    assert_eq!(a["full_address"], "Korunní 810/104, Praha 10");
    assert_eq!(a["municipal_district"], "10");
    assert!(a["lat"].is_null());
    assert!(a["lng"].is_null());
    assert!(!temp_dir.path().join("geocoding").exists());
}

#[tokio::test]
async fn test_end_to_end_missing_catalog_exports_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    html_mock(&server, "/katalog/", "<html><body><p>Stránka nenalezena</p></body></html>");

    let config = config(&server);
    let geocoder = GoogleGeocoder::from_config(&config).unwrap();
    let pipeline =
        RestaurantPipeline::new(LocalStorage::new(temp_dir.path()), config, geocoder).unwrap();

    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, EtlError::CatalogStructure { .. }));
    assert!(!temp_dir.path().join(CSV_FILE).exists());
    assert!(!temp_dir.path().join(JSON_FILE).exists());
}
