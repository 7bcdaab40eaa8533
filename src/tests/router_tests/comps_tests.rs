// src/tests/router_tests/comps_tests.rs
use crate::router::{handle, serve_request};
use crate::tests::utils::{
    body_json, request, test_app, test_app_with, test_config, TEST_API_KEY,
};
use http::Method;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

const SEARCH_PATH: &str = "/properties/v2/list-for-rent";

/// Any search we don't expect to happen.
fn forbid_search(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", Matcher::Any)
        .with_status(500)
        .expect(0)
        .create()
}

#[test]
fn rent_comps_trims_outliers_and_reports_medians() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", SEARCH_PATH)
        .match_header("x-rapidapi-key", TEST_API_KEY)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("postal_code".into(), "90210".into()),
            Matcher::UrlEncoded("beds_min".into(), "1".into()),
            Matcher::UrlEncoded("beds_max".into(), "3".into()),
            Matcher::UrlEncoded("baths_min".into(), "1.0".into()),
            Matcher::UrlEncoded("baths_max".into(), "3.0".into()),
            Matcher::UrlEncoded("sqft_min".into(), "700".into()),
            Matcher::UrlEncoded("sqft_max".into(), "1300".into()),
            Matcher::UrlEncoded("prop_type".into(), "single_family".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": { "home_search": { "results": [
                    { "list_price": 400, "description": { "sqft": 500 } },
                    { "list_price": 2000, "description": { "sqft": 1000 } },
                    { "list_price": 2200, "description": { "sqft": 1000 } },
                    { "list_price": 2400, "description": { "sqft": 1000 } },
                    { "list_price": 2600, "description": { "sqft": null } },
                    { "list_price": 2800, "description": { "sqft": 1000 } },
                    { "list_price": 12000, "description": { "sqft": 1300 } },
                    { "list_price": 0, "description": { "sqft": 900 } },
                    { "description": { "sqft": 900 } }
                ] } }
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let app = test_app(&server.url());
    let req = request(
        Method::POST,
        "/api/rent-comps",
        r#"{"zip":"90210","beds":2,"baths":2,"sqft":1000,"propertyType":"house"}"#,
    );

    let resp = handle(req, &app.state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["compsCount"], 5);
    assert_eq!(body["medianRent"].as_f64(), Some(2400.0));
    assert_eq!(body["medianRentPerSqft"].as_f64(), Some(2.3));
    assert_eq!(body["zip"], "90210");

    mock.assert();
}

#[test]
fn zero_comps_is_exactly_a_zero_count() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data":{"home_search":{"total":0,"results":[]}}}"#)
        .create();

    let app = test_app(&server.url());
    let resp = handle(
        request(Method::POST, "/api/rent-comps", r#"{"zip":"99950"}"#),
        &app.state,
    )
    .expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({ "compsCount": 0 }));
}

#[test]
fn malformed_body_is_rejected_before_any_search() {
    let mut server = mockito::Server::new();
    let mock = forbid_search(&mut server);
    let app = test_app(&server.url());

    let resp = serve_request(
        request(Method::POST, "/api/rent-comps", "{\"zip\": \"90210\""),
        &app.state,
    );
    assert_eq!(resp.status(), 400);
    assert!(body_json(resp)["error"].is_string());
    mock.assert();
}

#[test]
fn missing_zip_is_rejected_before_any_search() {
    let mut server = mockito::Server::new();
    let mock = forbid_search(&mut server);
    let app = test_app(&server.url());

    let resp = serve_request(
        request(Method::POST, "/api/rent-comps", r#"{"beds": 3, "zip": ""}"#),
        &app.state,
    );
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp), json!({ "error": "ZIP code is required" }));
    mock.assert();
}

#[test]
fn upstream_failure_propagates_status_and_body() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"message":"You are not subscribed to this API."}"#)
        .create();

    let app = test_app(&server.url());
    let resp = serve_request(
        request(Method::POST, "/api/rent-comps", r#"{"zip":"90210"}"#),
        &app.state,
    );
    assert_eq!(resp.status(), 403);

    let body = body_json(resp);
    assert_eq!(body["error"], "Listings API request failed");
    assert_eq!(
        body["details"],
        r#"{"message":"You are not subscribed to this API."}"#
    );
}

#[test]
fn unreachable_upstream_is_a_generic_500() {
    // Nothing listens on port 1.
    let app = test_app("http://127.0.0.1:1");

    let resp = serve_request(
        request(Method::POST, "/api/rent-comps", r#"{"zip":"90210"}"#),
        &app.state,
    );
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp), json!({ "error": "Internal Server Error" }));
}

#[test]
fn missing_api_key_is_a_configuration_error() {
    let mut server = mockito::Server::new();
    let mock = forbid_search(&mut server);

    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&server.url(), &dir);
    config.listings.api_key = None;
    let app = test_app_with(config, dir);

    let resp = serve_request(
        request(Method::POST, "/api/rent-comps", r#"{"zip":"90210"}"#),
        &app.state,
    );
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp), json!({ "error": "Service is not configured" }));
    mock.assert();
}
