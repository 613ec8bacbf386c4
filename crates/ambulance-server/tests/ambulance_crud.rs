use std::sync::Arc;

use ambulance_core::Ambulance;
use ambulance_server::{AppConfig, build_app, build_app_with_store};
use ambulance_storage::{DocumentStore, DynDocumentStore, StorageError, StoredDocument};
use async_trait::async_trait;
use axum::Router;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

async fn serve(app: Router) -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

async fn start_server() -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    serve(build_app(&AppConfig::default())).await
}

#[tokio::test]
async fn create_read_replace_delete_roundtrip() {
    let (base, shutdown_tx, handle) = start_server().await;
    let client = reqwest::Client::new();

    // Create with explicit id; unknown fields survive
    let doc = json!({
        "id": "a1",
        "name": "Emergency",
        "roomNumber": "101",
        "predefinedConditions": [
            {"code": "C1", "reference": "r", "typicalDurationMinutes": 10, "value": "v"}
        ]
    });
    let resp = client
        .post(format!("{base}/api/ambulance"))
        .json(&doc)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created, doc);

    // Read
    let resp = client
        .get(format!("{base}/api/ambulance/a1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let read: Value = resp.json().await.unwrap();
    assert_eq!(read, doc);

    // Replace without id in body binds to the path id
    let replacement = json!({"name": "Triage"});
    let resp = client
        .put(format!("{base}/api/ambulance/a1"))
        .json(&replacement)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let replaced: Value = resp.json().await.unwrap();
    assert_eq!(replaced["id"], "a1");
    assert_eq!(replaced["name"], "Triage");
    assert_eq!(replaced["predefinedConditions"], json!([]));
    assert!(replaced.get("roomNumber").is_none());

    // Delete
    let resp = client
        .delete(format!("{base}/api/ambulance/a1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/api/ambulance/a1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{base}/api/ambulance/a1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Ambulance not found");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn create_generates_id_and_rejects_duplicates() {
    let (base, shutdown_tx, handle) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/ambulance"))
        .json(&json!({"name": "No id"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["predefinedConditions"], json!([]));

    // Duplicate id conflicts
    let resp = client
        .post(format!("{base}/api/ambulance"))
        .json(&json!({"id": id, "name": "Again"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], 409);
    assert_eq!(body["message"], "Ambulance already exists");

    // The original is untouched
    let read: Value = client
        .get(format!("{base}/api/ambulance/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(read["name"], "No id");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn invalid_bodies_and_ids_are_bad_requests() {
    let (base, shutdown_tx, handle) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/ambulance"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["error"].is_string());

    let resp = client
        .post(format!("{base}/api/ambulance"))
        .json(&json!({"id": "a/b"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Replace: missing target is checked before the body
    let resp = client
        .put(format!("{base}/api/ambulance/ghost"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Replace: body id must match the path
    client
        .post(format!("{base}/api/ambulance"))
        .json(&json!({"id": "a1"}))
        .send()
        .await
        .unwrap();
    let resp = client
        .put(format!("{base}/api/ambulance/a1"))
        .json(&json!({"id": "a2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn repeated_condition_codes_are_rejected() {
    let (base, shutdown_tx, handle) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/ambulance"))
        .json(&json!({
            "id": "a1",
            "predefinedConditions": [
                {"code": "C1", "value": "x"},
                {"code": "C1", "value": "y"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["error"].as_str().unwrap().contains("C1"));

    // Nothing was stored
    let resp = client
        .get(format!("{base}/api/ambulance/a1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .post(format!("{base}/api/ambulance"))
        .json(&json!({"id": "a1", "predefinedConditions": [{"code": "A"}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .put(format!("{base}/api/ambulance/a1"))
        .json(&json!({"predefinedConditions": [{"code": "D"}, {"code": "D"}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // The stored document keeps its original conditions
    let stored: Value = client
        .get(format!("{base}/api/ambulance/a1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored["predefinedConditions"][0]["code"], "A");
    assert_eq!(stored["predefinedConditions"].as_array().unwrap().len(), 1);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

/// Store whose every call fails as if the database were unreachable.
struct UnreachableStore;

#[async_trait]
impl DocumentStore<Ambulance> for UnreachableStore {
    async fn find(&self, _id: &str) -> Result<StoredDocument<Ambulance>, StorageError> {
        Err(StorageError::connection_error("connection refused"))
    }
    async fn create(
        &self,
        _id: &str,
        _document: &Ambulance,
    ) -> Result<StoredDocument<Ambulance>, StorageError> {
        Err(StorageError::connection_error("connection refused"))
    }
    async fn update(
        &self,
        _id: &str,
        _document: &Ambulance,
        _if_match: Option<&str>,
    ) -> Result<StoredDocument<Ambulance>, StorageError> {
        Err(StorageError::connection_error("connection refused"))
    }
    async fn delete(&self, _id: &str) -> Result<(), StorageError> {
        Err(StorageError::connection_error("connection refused"))
    }
    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

#[tokio::test]
async fn store_failures_are_bad_gateway() {
    let store: DynDocumentStore<Ambulance> = Arc::new(UnreachableStore);
    let (base, shutdown_tx, handle) =
        serve(build_app_with_store(&AppConfig::default(), store)).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/ambulance"))
        .json(&json!({"id": "a1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Failed to create ambulance in database");
    assert!(body["error"].as_str().unwrap().contains("connection refused"));

    for resp in [
        client.get(format!("{base}/api/ambulance/a1")).send().await.unwrap(),
        client
            .put(format!("{base}/api/ambulance/a1"))
            .json(&json!({}))
            .send()
            .await
            .unwrap(),
        client.delete(format!("{base}/api/ambulance/a1")).send().await.unwrap(),
        client
            .get(format!("{base}/api/waiting-list/a1/condition"))
            .send()
            .await
            .unwrap(),
    ] {
        assert_eq!(resp.status(), 502);
    }

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
