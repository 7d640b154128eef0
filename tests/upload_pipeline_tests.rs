//! Integration tests for the upload pipeline against a mock processing
//! backend, including the full upload, invalidation, and re-fetch flow.

use std::sync::{Arc, Mutex};

use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use outlet_analytics::backend::HttpBackend;
use outlet_analytics::cache::{QueryCache, keys};
use outlet_analytics::config::AppConfig;
use outlet_analytics::db::init_pool;
use outlet_analytics::migration::MigratorTrait;
use outlet_analytics::models::outlet;
use outlet_analytics::notify::{Notification, Notifier, Severity};
use outlet_analytics::store::OutletStore;
use outlet_analytics::uploader::{UploadState, Uploader};

#[derive(Default)]
struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

impl RecordingNotifier {
    fn last(&self) -> Notification {
        self.notifications.lock().unwrap().last().cloned().unwrap()
    }
}

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        backend_base_url: server.uri(),
        ..Default::default()
    }
}

fn uploader_for(server: &MockServer) -> (Uploader, Arc<QueryCache>, Arc<RecordingNotifier>) {
    let backend = Arc::new(HttpBackend::from_config(&config_for(server)).expect("backend"));
    let cache = Arc::new(QueryCache::new(16));
    let notifier = Arc::new(RecordingNotifier::default());
    let uploader = Uploader::new(backend, cache.clone(), notifier.clone());
    (uploader, cache, notifier)
}

fn parse_success(rows: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": rows,
    }))
}

#[tokio::test]
async fn upload_success_returns_rows_and_invalidates_both_resources() {
    let server = MockServer::start().await;
    let rows = json!([
        {"Outlet": "Jayanagar", "TOTAL REVENUE": 125000.0},
        {"Outlet": "Indiranagar", "TOTAL REVENUE": 98000.0},
    ]);

    Mock::given(method("POST"))
        .and(path("/process-file"))
        .respond_with(parse_success(rows.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload-to-supabase"))
        .and(body_partial_json(json!({"filename": "sales.xlsx"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "outlets_inserted": 2,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (uploader, cache, notifier) = uploader_for(&server);
    let mut events = cache.subscribe();

    let result = uploader.upload("sales.xlsx", b"raw spreadsheet".to_vec()).await;

    // Parsed rows come back unchanged
    assert_eq!(
        result,
        Some(rows.as_array().unwrap().clone())
    );

    // Exactly two invalidations, outlet records first
    assert_eq!(events.recv().await.unwrap(), keys::OUTLETS);
    assert_eq!(events.recv().await.unwrap(), keys::UPLOADED_FILES);
    assert!(events.try_recv().is_err());

    let last = notifier.last();
    assert_eq!(last.severity, Severity::Success);
    assert_eq!(
        last.body.as_deref(),
        Some("2 outlet records saved to database")
    );

    assert_eq!(*uploader.state().borrow(), UploadState::Idle);
}

#[tokio::test]
async fn parse_http_500_never_reaches_the_persist_collaborator() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process-file"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload-to-supabase"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (uploader, cache, notifier) = uploader_for(&server);
    let mut events = cache.subscribe();

    let result = uploader.upload("sales.xlsx", b"raw".to_vec()).await;

    assert!(result.is_none());
    assert!(events.try_recv().is_err());
    assert_eq!(notifier.last().severity, Severity::Error);

    // Terminal reset left the machine clean
    let state = uploader.state();
    assert_eq!(*state.borrow(), UploadState::Idle);
    assert_eq!(state.borrow().progress(), 0);
}

#[tokio::test]
async fn parse_rejection_payload_surfaces_its_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "bad format",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (uploader, _cache, notifier) = uploader_for(&server);

    let result = uploader.upload("sales.xlsx", b"raw".to_vec()).await;

    assert!(result.is_none());
    let last = notifier.last();
    assert_eq!(last.title, "Upload failed");
    assert_eq!(last.body.as_deref(), Some("bad format"));
}

#[tokio::test]
async fn persist_rejection_is_surfaced_as_a_partial_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process-file"))
        .respond_with(parse_success(json!([{"Outlet": "Jayanagar"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload-to-supabase"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "insert failed",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (uploader, cache, notifier) = uploader_for(&server);
    let mut events = cache.subscribe();

    let result = uploader.upload("sales.xlsx", b"raw".to_vec()).await;

    assert!(result.is_none());
    // The file was parsed but nothing was stored, so nothing is invalidated
    assert!(events.try_recv().is_err());

    let last = notifier.last();
    assert_eq!(last.title, "Upload failed after parsing");
    assert_eq!(last.body.as_deref(), Some("insert failed"));
}

#[tokio::test]
async fn successful_upload_refreshes_cached_reads() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process-file"))
        .respond_with(parse_success(json!([{"Outlet": "Koramangala"}])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload-to-supabase"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "outlets_inserted": 1,
        })))
        .mount(&server)
        .await;

    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        ..config_for(&server)
    };
    let db = Arc::new(init_pool(&config).await.expect("pool"));
    outlet_analytics::migration::Migrator::up(db.as_ref(), None)
        .await
        .expect("migrations");

    let cache = Arc::new(QueryCache::new(16));
    let store = OutletStore::new(db.clone(), cache.clone());
    let backend = Arc::new(HttpBackend::from_config(&config).expect("backend"));
    let notifier = Arc::new(RecordingNotifier::default());
    let uploader = Uploader::new(backend, cache.clone(), notifier);

    // Prime the cache with the empty listing
    assert!(store.outlets().await.unwrap().is_empty());

    // The persist collaborator writes the row in production; emulate that
    // write here, invisible to the primed cache.
    let record = outlet::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(chrono::Utc::now().into()),
        updated_at: Set(chrono::Utc::now().into()),
        outlet: Set("Koramangala".to_string()),
        ..Default::default()
    };
    record.insert(db.as_ref()).await.expect("insert");
    assert!(store.outlets().await.unwrap().is_empty());

    let result = uploader.upload("sales.xlsx", b"raw".to_vec()).await;
    assert!(result.is_some());

    // Invalidation made the new row visible
    let outlets = store.outlets().await.unwrap();
    assert_eq!(outlets.len(), 1);
    assert_eq!(outlets[0].outlet, "Koramangala");
}
