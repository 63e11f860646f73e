//! End-to-end checks of the HTTP surface through `Router::handle`.

use std::sync::Arc;

use accountable::store::InMemoryStore;
use accountable::{Request, Response, Router, routes};
use serde_json::{Value, json};

fn app() -> Router {
    routes::api("1.2.3", Arc::new(InMemoryStore::new()))
}

fn body(response: &Response) -> Value {
    serde_json::from_slice(response.body()).expect("json body")
}

const DOC: &str = "/api/v0/db/users/alice/budgets/2024";

#[tokio::test]
async fn root_says_lol() {
    let app = app();
    for path in ["/api/v0/", "/api/v0"] {
        let response = app.handle(Request::new("GET", path)).await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(body(&response), json!({ "message": "lol" }));
    }
}

#[tokio::test]
async fn version_reports_configured_release() {
    let response = app().handle(Request::new("GET", "/api/v0/version")).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(
        body(&response),
        json!({ "message": "Accountable v1.2.3", "version": "1.2.3" })
    );
}

#[tokio::test]
async fn unsupported_method_is_405_on_every_route() {
    let app = app();
    for path in ["/api/v0/", "/api/v0/version", "/healthz", "/readyz"] {
        let response = app.handle(Request::new("POST", path)).await;
        assert_eq!(response.status_code(), 405, "{path}");
        assert_eq!(response.header("allow"), Some("GET"), "{path}");
        assert_eq!(body(&response)["code"], "method-not-allowed");
    }

    let response = app.handle(Request::new("DELETE", "/api/v0/db/users/alice")).await;
    assert_eq!(response.status_code(), 405);
    assert_eq!(response.header("allow"), Some("GET, POST"));
    assert_eq!(body(&response)["code"], "method-not-allowed");

    let response = app.handle(Request::new("PATCH", DOC)).await;
    assert_eq!(response.status_code(), 405);
    assert_eq!(response.header("allow"), Some("DELETE, GET, POST, PUT"));
}

#[tokio::test]
async fn encoded_uid_is_decoded_before_storage() {
    let app = app();

    let created = app.handle(Request::new("POST", "/api/v0/db/users/al%20ice")).await;
    assert_eq!(created.status_code(), 201);
    assert_eq!(body(&created), json!({ "uid": "al ice" }));

    let doc = app
        .handle(Request::new("PUT", "/api/v0/db/users/al%20ice/budgets/2024").with_body(b"{}".to_vec()))
        .await;
    assert_eq!(body(&doc)["uid"], "al ice");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = app().handle(Request::new("GET", "/api/v1/version")).await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(body(&response)["code"], "route-not-found");
}

#[tokio::test]
async fn health_probes_answer() {
    let app = app();
    let live = app.handle(Request::new("GET", "/healthz")).await;
    let ready = app.handle(Request::new("GET", "/readyz")).await;
    assert_eq!((live.status_code(), live.body()), (200, &b"ok"[..]));
    assert_eq!((ready.status_code(), ready.body()), (200, &b"ready"[..]));
}

#[tokio::test]
async fn duplicate_account_is_a_conflict() {
    let app = app();

    let created = app.handle(Request::new("POST", "/api/v0/db/users/alice")).await;
    assert_eq!(created.status_code(), 201);
    assert_eq!(body(&created), json!({ "uid": "alice" }));

    let again = app.handle(Request::new("POST", "/api/v0/db/users/alice")).await;
    assert_eq!(again.status_code(), 409);
    assert_eq!(body(&again)["code"], "account-conflict");
}

#[tokio::test]
async fn missing_account_is_404() {
    let app = app();

    let summary = app.handle(Request::new("GET", "/api/v0/db/users/nobody")).await;
    assert_eq!(summary.status_code(), 404);
    assert_eq!(body(&summary)["code"], "account-not-found");

    let write = app
        .handle(Request::new("PUT", "/api/v0/db/users/nobody/budgets/2024").with_body(b"{}".to_vec()))
        .await;
    assert_eq!(write.status_code(), 404);
    assert_eq!(body(&write)["code"], "account-not-found");
}

#[tokio::test]
async fn document_lifecycle() {
    let app = app();
    app.handle(Request::new("POST", "/api/v0/db/users/alice")).await;

    let put = |limit: u32| {
        Request::new("PUT", DOC)
            .with_header("content-type", "application/json")
            .with_body(json!({ "limit": limit }).to_string())
    };

    let created = app.handle(put(100)).await;
    assert_eq!(created.status_code(), 201);
    assert_eq!(
        body(&created),
        json!({
            "uid": "alice",
            "collectionId": "budgets",
            "documentId": "2024",
            "data": { "limit": 100 }
        })
    );

    let replaced = app.handle(put(250)).await;
    assert_eq!(replaced.status_code(), 200);

    let duplicate = app
        .handle(Request::new("POST", DOC).with_body(b"{}".to_vec()))
        .await;
    assert_eq!(duplicate.status_code(), 409);
    assert_eq!(body(&duplicate)["code"], "document-conflict");

    let read = app.handle(Request::new("GET", DOC)).await;
    assert_eq!(read.status_code(), 200);
    assert_eq!(body(&read)["data"], json!({ "limit": 250 }));

    let summary = app.handle(Request::new("GET", "/api/v0/db/users/alice")).await;
    assert_eq!(body(&summary), json!({ "uid": "alice", "documents": 1 }));

    let deleted = app.handle(Request::new("DELETE", DOC)).await;
    assert_eq!(deleted.status_code(), 204);
    assert!(deleted.body().is_empty());

    let gone = app.handle(Request::new("GET", DOC)).await;
    assert_eq!(gone.status_code(), 404);
    assert_eq!(body(&gone)["code"], "document-not-found");

    let delete_again = app.handle(Request::new("DELETE", DOC)).await;
    assert_eq!(delete_again.status_code(), 404);
}

#[tokio::test]
async fn document_body_must_be_an_object() {
    let app = app();
    app.handle(Request::new("POST", "/api/v0/db/users/alice")).await;

    for bad in [&b""[..], &b"not json"[..], &b"[1,2]"[..], &b"42"[..]] {
        let response = app.handle(Request::new("PUT", DOC).with_body(bad.to_vec())).await;
        assert_eq!(response.status_code(), 400);
        assert_eq!(body(&response)["code"], "invalid-body");
    }
}
