//! Integration tests for `PlacesClient` using wiremock HTTP mocks.
//!
//! Every test stands up its own local server; gates are replaced with
//! `NoDelay` (or a counting gate) so nothing actually sleeps.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zipscout_places::{GridPoint, NoDelay, PlaceCandidate, PlacesClient, PlacesError, RateGate};

fn test_client(base_url: &str) -> PlacesClient<NoDelay, NoDelay> {
    PlacesClient::with_base_url("test-key", 5, "zipscout-test/0.1", base_url)
        .expect("failed to build test PlacesClient")
        .with_gates(NoDelay, NoDelay)
}

/// Gate that records how many times it was awaited.
#[derive(Clone, Default)]
struct CountingGate(Arc<AtomicUsize>);

impl CountingGate {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl RateGate for CountingGate {
    async fn wait(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn candidate(id: &str) -> PlaceCandidate {
    PlaceCandidate {
        place_id: Some(id.to_owned()),
        ..PlaceCandidate::default()
    }
}

const POINT: GridPoint = GridPoint {
    lat: 40.7,
    lng: -74.01,
};

// ---------------------------------------------------------------------------
// Geocoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn geocode_uses_bounds_when_present() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("address", "10001"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "geometry": {
                    "bounds": {
                        "northeast": { "lat": 40.76, "lng": -73.98 },
                        "southwest": { "lat": 40.74, "lng": -74.01 }
                    },
                    "viewport": {
                        "northeast": { "lat": 41.0, "lng": -73.0 },
                        "southwest": { "lat": 40.0, "lng": -75.0 }
                    }
                }
            }]
        })))
        .mount(&server)
        .await;

    let bounds = test_client(&server.uri())
        .geocode_bounds("10001")
        .await
        .expect("should geocode");

    assert!((bounds.south - 40.74).abs() < f64::EPSILON);
    assert!((bounds.north - 40.76).abs() < f64::EPSILON);
    assert!((bounds.west - (-74.01)).abs() < f64::EPSILON);
    assert!((bounds.east - (-73.98)).abs() < f64::EPSILON);
}

#[tokio::test]
async fn geocode_falls_back_to_viewport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "geometry": {
                    "viewport": {
                        "northeast": { "lat": 40.72, "lng": -73.99 },
                        "southwest": { "lat": 40.70, "lng": -74.01 }
                    }
                }
            }]
        })))
        .mount(&server)
        .await;

    let bounds = test_client(&server.uri())
        .geocode_bounds("10002")
        .await
        .expect("should geocode from viewport");

    assert!((bounds.south - 40.70).abs() < f64::EPSILON);
    assert!((bounds.north - 40.72).abs() < f64::EPSILON);
}

#[tokio::test]
async fn geocode_with_no_results_is_no_result_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode_bounds("00000")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PlacesError::NoGeocodeResult { ref postal_code } if postal_code == "00000"),
        "got: {err:?}"
    );
    assert!(err.is_no_result());
}

#[tokio::test]
async fn geocode_without_bounds_or_viewport_is_no_bounds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "geometry": { "location": { "lat": 1.0, "lng": 2.0 } } }]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode_bounds("99999")
        .await
        .unwrap_err();

    assert!(matches!(err, PlacesError::NoBounds { .. }), "got: {err:?}");
}

#[tokio::test]
async fn geocode_request_denied_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode_bounds("10001")
        .await
        .unwrap_err();

    assert!(matches!(err, PlacesError::ApiError { .. }), "got: {err:?}");
    assert!(!err.is_no_result());
}

#[tokio::test]
async fn server_error_is_unexpected_status_without_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode_bounds("10001")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PlacesError::UnexpectedStatus { status: 503, .. }),
        "got: {err:?}"
    );
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode_bounds("10001")
        .await
        .unwrap_err();

    assert!(matches!(err, PlacesError::Deserialize { .. }), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// Nearby search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nearby_single_page_sends_location_and_radius() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("location", "40.7,-74.01"))
        .and(query_param("radius", "2000"))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "place_id": "p1" }, { "place_id": "p2" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .nearby_places(POINT, 2000)
        .await
        .expect("should fetch one page");

    let ids: Vec<_> = places.iter().filter_map(|p| p.place_id.as_deref()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[tokio::test]
async fn nearby_follows_page_tokens_in_order_and_waits_before_each() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "place_id": "p1" }],
            "next_page_token": "TOKEN_2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("pagetoken", "TOKEN_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "place_id": "p2" }],
            "next_page_token": "TOKEN_3"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("pagetoken", "TOKEN_3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "place_id": "p3" }]
        })))
        .mount(&server)
        .await;

    let gate = CountingGate::default();
    let client = test_client(&server.uri()).with_gates(gate.clone(), NoDelay);

    let places = client.nearby_places(POINT, 2000).await.expect("should paginate");
    let ids: Vec<_> = places.iter().filter_map(|p| p.place_id.as_deref()).collect();

    assert_eq!(ids, vec!["p1", "p2", "p3"]);
    assert_eq!(gate.count(), 2, "gate awaited once per token page");
}

#[tokio::test]
async fn nearby_follow_up_page_keeps_location_and_radius() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "place_id": "p1" }],
            "next_page_token": "TOKEN_2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("location", "40.7,-74.01"))
        .and(query_param("radius", "1500"))
        .and(query_param("pagetoken", "TOKEN_2"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "place_id": "p2" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client.nearby_places(POINT, 1500).await.expect("should paginate");

    assert_eq!(places.len(), 2);
}

#[tokio::test]
async fn nearby_stops_after_three_pages_even_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "place_id": "loop" }],
            "next_page_token": "FOREVER"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .nearby_places(POINT, 2000)
        .await
        .expect("should stop at page limit");

    assert_eq!(places.len(), 3);
}

#[tokio::test]
async fn nearby_treats_empty_token_as_last_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "place_id": "p1" }],
            "next_page_token": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .nearby_places(POINT, 2000)
        .await
        .expect("should fetch one page");

    assert_eq!(places.len(), 1);
}

#[tokio::test]
async fn nearby_error_on_later_page_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "place_id": "p1" }],
            "next_page_token": "TOKEN_2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("pagetoken", "TOKEN_2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).nearby_places(POINT, 2000).await;
    assert!(
        matches!(result, Err(PlacesError::UnexpectedStatus { status: 500, .. })),
        "got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Place details and website filter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn place_details_requests_fixed_field_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "p1"))
        .and(query_param(
            "fields",
            "name,website,formatted_address,international_phone_number,url",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": { "name": "Joe's Deli", "url": "https://maps.google.com/?cid=7" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = test_client(&server.uri())
        .place_details("p1")
        .await
        .expect("should fetch details");

    assert_eq!(detail.name.as_deref(), Some("Joe's Deli"));
    assert!(!detail.has_website());
}

#[tokio::test]
async fn place_details_without_result_is_empty_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "NOT_FOUND" })))
        .mount(&server)
        .await;

    let detail = test_client(&server.uri())
        .place_details("gone")
        .await
        .expect("should tolerate missing result");

    assert!(detail.name.is_none());
    assert!(!detail.has_website());
}

#[tokio::test]
async fn places_without_website_dedupes_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "no-site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "name": "Quiet Tailor",
                "formatted_address": "5 Elm St",
                "international_phone_number": "+1 555-0101",
                "url": "https://maps.google.com/?cid=1"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "has-site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "name": "Loud Tailor", "website": "https://loud.example" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "blank-site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "name": "Blank Site Diner", "website": "" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details_gate = CountingGate::default();
    let client = test_client(&server.uri()).with_gates(NoDelay, details_gate.clone());

    let candidates = vec![
        candidate("no-site"),
        candidate("has-site"),
        PlaceCandidate::default(),
        candidate("no-site"),
        candidate("blank-site"),
    ];

    let rows = client
        .places_without_website(&candidates, "10001")
        .await
        .expect("should filter");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].zip_code, "10001");
    assert_eq!(rows[0].name, "Quiet Tailor");
    assert_eq!(rows[0].address, "5 Elm St");
    assert_eq!(rows[0].phone, "+1 555-0101");
    assert_eq!(rows[0].business_page_url, "https://maps.google.com/?cid=1");
    assert_eq!(details_gate.count(), 3, "one gate pass per distinct place");
}

#[tokio::test]
async fn over_query_limit_on_details_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota for this API."
        })))
        .mount(&server)
        .await;

    let result = test_client(&server.uri())
        .places_without_website(&[candidate("p1")], "10001")
        .await;

    assert!(
        matches!(result, Err(PlacesError::ApiError { ref status, .. }) if status == "OVER_QUERY_LIMIT"),
        "got: {result:?}"
    );
}
