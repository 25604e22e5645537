mod shared;

use contrib::{Contributions, DayRecord, FileCache, Snapshot};
use serde_json::Value;
use shared::{TestClient, test_config};
use time::OffsetDateTime;

fn cached_calendar(date: time::Date, count: u32) -> Contributions {
    Contributions {
        total: u64::from(count),
        daily: vec![DayRecord {
            date,
            count,
            weekday: date.weekday().number_days_from_sunday(),
        }],
        weeks: 1,
        note: None,
    }
}

#[tokio::test]
async fn health_probe() {
    let dir = tempfile::tempdir().unwrap();
    let client = TestClient::new(test_config(&dir.path().join("cache.json")));

    client.get("/health").await.status(200);
}

#[tokio::test]
async fn contributions_serves_fresh_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache_file = dir.path().join("cache.json");

    let today = OffsetDateTime::now_utc().date();
    let snapshot = Snapshot::fetched(
        cached_calendar(today, 4),
        "octocat",
        OffsetDateTime::now_utc(),
    );
    FileCache::new(&cache_file).store(&snapshot).unwrap();

    let client = TestClient::new(test_config(&cache_file));
    let body: Value = client
        .get("/contributions")
        .await
        .status(200)
        .into_deserialized_json_body()
        .await;

    assert_eq!(body["username"], "octocat");
    assert_eq!(body["contributions"]["total"], 4);
    assert_eq!(body["contributions"]["daily"].as_array().unwrap().len(), 1);
    assert!(body.get("error").is_none());
    assert!(body["last_updated"].is_string());
}

#[tokio::test]
async fn contributions_with_no_source_and_no_cache_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let client = TestClient::new(test_config(&dir.path().join("cache.json")));

    let body: Value = client
        .get("/contributions")
        .await
        .status(200)
        .into_deserialized_json_body()
        .await;

    assert!(body.get("contributions").is_none());
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(body["username"], "octocat");
}

#[tokio::test]
async fn contributions_svg_renders_cached_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let cache_file = dir.path().join("cache.json");

    let today = OffsetDateTime::now_utc().date();
    let snapshot = Snapshot::fetched(
        cached_calendar(today, 4),
        "octocat",
        OffsetDateTime::now_utc(),
    );
    FileCache::new(&cache_file).store(&snapshot).unwrap();

    let client = TestClient::new(test_config(&cache_file));
    let markup = client
        .get("/contributions?format=svg")
        .await
        .status(200)
        .header("content-type", "image/svg+xml")
        .into_text_body()
        .await;

    assert!(markup.starts_with("<svg"));
    assert!(markup.contains("contrib-cell"));
    // today has activity, so one cell sits in the 3-5 tier
    assert!(markup.contains(r##"fill="#1a7d2e""##));
}

#[tokio::test]
async fn contributions_svg_without_data_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let client = TestClient::new(test_config(&dir.path().join("cache.json")));

    let markup = client
        .get("/contributions?format=svg")
        .await
        .status(200)
        .header("content-type", "image/svg+xml")
        .into_text_body()
        .await;

    assert_eq!(markup, "");
}

#[tokio::test]
async fn status_reports_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let client = TestClient::new(test_config(&dir.path().join("cache.json")));

    let body: Value = client
        .get("/status")
        .await
        .status(200)
        .into_deserialized_json_body()
        .await;

    for field in ["cpu", "mem", "disk", "net_in", "net_out"] {
        let value = body[field].as_f64().unwrap_or_else(|| panic!("{field} missing"));
        assert!(value >= 0.0, "{field} = {value}");
    }
    assert!(body["cpu"].as_f64().unwrap() <= 100.0);
    assert!(body["uptime"].is_string());

    let days_left = body["days_left"].as_i64().unwrap();
    assert!((1..=31).contains(&days_left), "days_left = {days_left}");
}

#[tokio::test]
async fn responses_allow_any_origin() {
    let dir = tempfile::tempdir().unwrap();
    let client = TestClient::new(test_config(&dir.path().join("cache.json")));

    let request = http::Request::builder()
        .uri("/contributions")
        .header("origin", "https://dashboard.example")
        .body(axum::body::Body::empty())
        .unwrap();

    client
        .send(request)
        .await
        .status(200)
        .header("access-control-allow-origin", "*");
}
