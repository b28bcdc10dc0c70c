//! Integration tests for `NominatimClient` using wiremock HTTP mocks.

use mercado_geo::{GeoError, Geocoder, NominatimClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NominatimClient {
    NominatimClient::new(base_url, 30, "mercado-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_best_match() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "lat": "-23.5505",
            "lon": "-46.6333",
            "display_name": "São Paulo, Brasil"
        },
        {
            "lat": "-23.9999",
            "lon": "-46.9999",
            "display_name": "São Paulo (other)"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "São Paulo, SP"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let hit = client
        .geocode("São Paulo, SP")
        .await
        .expect("should geocode")
        .expect("should find a match");

    assert!((hit.latitude + 23.5505).abs() < 1e-9);
    assert!((hit.longitude + 46.6333).abs() < 1e-9);
}

#[tokio::test]
async fn search_miss_is_ok_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.geocode("Atlantis").await.expect("request succeeds");
    assert!(result.is_none());
}

#[tokio::test]
async fn server_error_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode("anywhere").await.unwrap_err();
    assert!(matches!(err, GeoError::Http(_)));
}

#[tokio::test]
async fn malformed_body_surfaces_as_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode("anywhere").await.unwrap_err();
    assert!(matches!(err, GeoError::Deserialize { .. }));
}

#[tokio::test]
async fn unparseable_coordinates_surface_as_deserialize_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!([{ "lat": "north", "lon": "west" }]);
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode("anywhere").await.unwrap_err();
    assert!(matches!(err, GeoError::Deserialize { .. }));
}

#[test]
fn trailing_slash_in_base_url_is_normalised() {
    assert!(NominatimClient::new("https://geo.example.com///", 10, "mercado-test/0.1").is_ok());
}
