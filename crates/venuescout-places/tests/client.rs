//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use std::time::Duration;

use serde_json::json;
use venuescout_places::{PlacesClient, PlacesError, RetryPolicy};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 5, base_url)
        .expect("client construction should not fail")
        .with_retry_policy(RetryPolicy {
            max_retries: 0,
            backoff_base_ms: 0,
        })
        .with_page_token_delay(Duration::ZERO)
}

fn page(ids: &[&str], token: Option<&str>) -> serde_json::Value {
    let results: Vec<_> = ids
        .iter()
        .map(|id| json!({ "place_id": id, "name": format!("Place {id}") }))
        .collect();
    let mut body = json!({ "status": "OK", "results": results });
    if let Some(t) = token {
        body["next_page_token"] = json!(t);
    }
    body
}

#[tokio::test]
async fn search_all_follows_tokens_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("key", "test-key"))
        .and(query_param("query", "VFW live music Minnesota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a", "b"], Some("tok1"))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("pagetoken", "tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["c"], Some("tok2"))))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("pagetoken", "tok2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["d"], None)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_all("VFW live music Minnesota")
        .await
        .expect("search should succeed");

    let ids: Vec<_> = places
        .iter()
        .map(|p| p.place_id.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);

    // Exactly three requests: one per page.
    server.verify().await;
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn search_all_handles_zero_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client.search_all("nothing here").await.unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn search_all_rejects_blank_query_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[], None)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_all("   ").await;
    assert!(matches!(result, Err(PlacesError::InvalidQuery)));
}

#[tokio::test]
async fn search_all_stops_on_cycling_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a"], Some("again"))))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_all("loop").await;
    assert!(
        matches!(result, Err(PlacesError::PaginationLimit { max_pages: 10, .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn http_error_status_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_all("VFW").await;
    assert!(matches!(result, Err(PlacesError::Http(_))), "got: {result:?}");
}

#[tokio::test]
async fn request_denied_surfaces_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_all("VFW").await.unwrap_err();
    assert!(
        matches!(err, PlacesError::ApiStatus { ref status, ref message }
            if status == "REQUEST_DENIED" && message.contains("invalid")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a"], None)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry_policy(RetryPolicy {
        max_retries: 2,
        backoff_base_ms: 0,
    });
    let places = client.search_all("VFW").await.expect("retry should recover");
    assert_eq!(places.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn place_details_parses_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p1"))
        .and(query_param(
            "fields",
            "name,formatted_phone_number,website,formatted_address,url",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "name": "Coon Rapids VFW",
                "formatted_phone_number": "(763) 755-4430",
                "website": "https://coonrapidsvfw.com/",
                "formatted_address": "1919 Coon Rapids Blvd NW, Coon Rapids, MN 55433, USA"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.place_details("p1").await.unwrap();
    assert_eq!(detail.name, "Coon Rapids VFW");
    assert_eq!(detail.formatted_phone_number, "(763) 755-4430");
    assert_eq!(detail.website, "https://coonrapidsvfw.com/");
    assert!(detail.url.is_empty());
}

#[tokio::test]
async fn place_details_missing_result_is_empty_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "NOT_FOUND" })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.place_details("gone").await.unwrap();
    assert!(detail.name.is_empty());
}

#[tokio::test]
async fn place_details_reads_null_fields_as_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "name": "Crystal VFW",
                "formatted_phone_number": null,
                "website": null,
                "url": "https://maps.google.com/?cid=7"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client
        .place_details("p1")
        .await
        .expect("null fields should not fail the lookup");
    assert_eq!(detail.name, "Crystal VFW");
    assert!(detail.website.is_empty());
    assert!(detail.formatted_phone_number.is_empty());
    assert_eq!(detail.url, "https://maps.google.com/?cid=7");
}

#[tokio::test]
async fn search_all_waits_before_each_token_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a"], Some("tok1"))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("pagetoken", "tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["b"], None)))
        .with_priority(1)
        .mount(&server)
        .await;

    let delay = Duration::from_millis(50);
    let client = test_client(&server.uri()).with_page_token_delay(delay);

    let started = std::time::Instant::now();
    let places = client.search_all("VFW").await.unwrap();

    assert_eq!(places.len(), 2);
    assert!(
        started.elapsed() >= delay,
        "token request should wait at least {delay:?}, took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn search_all_does_not_wait_before_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let delay = Duration::from_secs(2);
    let client = test_client(&server.uri()).with_page_token_delay(delay);

    let started = std::time::Instant::now();
    let places = client.search_all("VFW").await.unwrap();

    assert_eq!(places.len(), 1);
    assert!(
        started.elapsed() < delay,
        "single-page query should not wait, took {:?}",
        started.elapsed()
    );
}
