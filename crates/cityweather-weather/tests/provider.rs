//! Integration tests for WeatherProvider using wiremock.

use std::time::Duration;

use cityweather_i18n::Language;
use cityweather_weather::{Coordinates, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paris_payload() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 2.35, "lat": 48.85},
        "weather": [{"description": "clear sky", "icon": "01d"}],
        "main": {"temp": 18.4, "humidity": 60},
        "name": "Paris"
    })
}

fn provider_for(server: &MockServer, timeout: Duration) -> WeatherProvider {
    WeatherProvider::new(&format!("{}/data/2.5/weather", server.uri()), "test-key", timeout)
        .unwrap()
}

#[tokio::test]
async fn test_fetch_success_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = provider_for(&mock_server, Duration::from_secs(5))
        .fetch("Paris", Language::En)
        .await
        .unwrap();

    assert_eq!(report.city, "Paris");
    assert_eq!(report.temperature, 18.4);
    assert_eq!(report.humidity, 60);
    assert_eq!(report.coordinates, Coordinates { lat: 48.85, lon: 2.35 });
}

#[tokio::test]
async fn test_fetch_maps_language_and_encodes_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "São Paulo"))
        .and(query_param("lang", "kr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    provider_for(&mock_server, Duration::from_secs(5))
        .fetch("São Paulo", Language::Ko)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_fetch_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server, Duration::from_secs(5))
        .fetch("Atlantis", Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound(ref city) if city == "Atlantis"));
}

#[tokio::test]
async fn test_fetch_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server, Duration::from_secs(5))
        .fetch("Paris", Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Provider { status: 401, .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paris_payload())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server, Duration::from_millis(200))
        .fetch("Paris", Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Timeout), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Paris",
            "weather": []
        })))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server, Duration::from_secs(5))
        .fetch("Paris", Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_connection_refused_is_network_error() {
    let provider = WeatherProvider::new(
        "http://127.0.0.1:9/data/2.5/weather",
        "test-key",
        Duration::from_secs(2),
    )
    .unwrap();

    let err = provider.fetch("Paris", Language::En).await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_) | WeatherError::Timeout), "got {:?}", err);
}
