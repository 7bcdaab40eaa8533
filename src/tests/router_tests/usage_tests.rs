use crate::router::{handle, serve_request};
use crate::tests::utils::{
    body_json, request, test_app, test_app_with, test_config, TestApp, TEST_ADMIN_KEY,
};
use http::Method;
use serde_json::json;

fn track(app: &TestApp, body: &str) -> serde_json::Value {
    let req = http::Request::builder()
        .method(Method::POST)
        .uri("/api/track-usage")
        .header("User-Agent", "Mozilla/5.0 (test)")
        .body(astra::Body::from(body.to_string()))
        .unwrap();

    let resp = handle(req, &app.state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    body_json(resp)
}

#[test]
fn tracking_appends_and_admin_can_list() {
    let app = test_app("http://127.0.0.1:1");

    let first = track(&app, r#"{"tool":"rent-estimator","data":{"zip":"90210"}}"#);
    let second = track(&app, r#"{"tool":"roi-calculator","event":"submit","page":"/tools/roi"}"#);

    assert_eq!(first["success"], true);
    assert_eq!(first["id"].as_str().map(str::len), Some(22));
    assert_ne!(first["id"], second["id"]);

    let resp = serve_request(
        request(
            Method::GET,
            &format!("/api/track-usage?key={TEST_ADMIN_KEY}"),
            "",
        ),
        &app.state,
    );
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["count"], 2);
    // Newest first.
    assert_eq!(body["events"][0]["id"], second["id"]);
    assert_eq!(body["events"][0]["event"], "submit");
    assert_eq!(body["events"][0]["page"], "/tools/roi");
    assert_eq!(body["events"][1]["tool"], "rent-estimator");
    assert_eq!(body["events"][1]["event"], "use");
    assert_eq!(body["events"][1]["data"], json!({ "zip": "90210" }));
    assert_eq!(body["events"][1]["userAgent"], "Mozilla/5.0 (test)");
}

#[test]
fn admin_key_header_and_filters() {
    let app = test_app("http://127.0.0.1:1");
    track(&app, r#"{"tool":"rent-estimator"}"#);
    track(&app, r#"{"tool":"roi-calculator"}"#);
    track(&app, r#"{"tool":"Rent-Estimator","event":"submit"}"#);

    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/api/track-usage?tool=rent-estimator&limit=1")
        .header("x-admin-key", TEST_ADMIN_KEY)
        .body(astra::Body::empty())
        .unwrap();

    let body = body_json(serve_request(req, &app.state));
    assert_eq!(body["count"], 1);
    assert_eq!(body["events"][0]["event"], "submit");
}

#[test]
fn listing_requires_the_admin_key() {
    let app = test_app("http://127.0.0.1:1");
    track(&app, r#"{"tool":"rent-estimator"}"#);

    let resp = serve_request(request(Method::GET, "/api/track-usage", ""), &app.state);
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp), json!({ "error": "Unauthorized" }));

    let resp = serve_request(
        request(Method::GET, "/api/track-usage?key=guess", ""),
        &app.state,
    );
    assert_eq!(resp.status(), 401);
}

#[test]
fn listing_is_disabled_without_configured_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config("http://127.0.0.1:1", &dir);
    config.admin_key = None;
    let app = test_app_with(config, dir);

    let resp = serve_request(
        request(Method::GET, &format!("/api/track-usage?key={TEST_ADMIN_KEY}"), ""),
        &app.state,
    );
    assert_eq!(resp.status(), 401);
}

#[test]
fn bad_tracking_bodies_are_rejected() {
    let app = test_app("http://127.0.0.1:1");

    for body in ["not json", r#"{"event":"open"}"#, r#"{"tool":"  "}"#] {
        let resp = serve_request(request(Method::POST, "/api/track-usage", body), &app.state);
        assert_eq!(resp.status(), 400, "body {body:?}");
    }

    assert!(!app.dir.path().join("usage-log.jsonl").exists());
}

#[test]
fn bad_filter_is_rejected() {
    let app = test_app("http://127.0.0.1:1");

    let resp = serve_request(
        request(
            Method::GET,
            &format!("/api/track-usage?key={TEST_ADMIN_KEY}&since=last-week"),
            "",
        ),
        &app.state,
    );
    assert_eq!(resp.status(), 400);
}
