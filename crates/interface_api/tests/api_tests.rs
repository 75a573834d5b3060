//! HTTP tests for interface_api

use std::io::Write;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_registry::{InMemoryRecordStore, Provenance, RegistryPortal};
use interface_api::config::RegistryConfig;
use interface_api::create_router;
use interface_api::seed::{build_portal, SeedError};

use test_utils::RegistryFixtures;

fn server_with(portal: RegistryPortal) -> TestServer {
    TestServer::new(create_router(portal, RegistryConfig::default())).unwrap()
}

fn seeded_server() -> TestServer {
    let store = InMemoryRecordStore::from_files(RegistryFixtures::sample_registry()).unwrap();
    server_with(RegistryPortal::new(store))
}

// ============================================================================
// Health & Registry
// ============================================================================

mod registry_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let server = server_with(RegistryPortal::default());
        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let server = server_with(RegistryPortal::default());
        let response = server.get("/api/v1/registry").await;
        assert!(!response.header("x-request-id").is_empty());
    }

    #[tokio::test]
    async fn test_registry_info() {
        let server = seeded_server();
        let body: Value = server.get("/api/v1/registry").await.json();

        assert_eq!(body["fileCount"], 3);
        assert_eq!(body["provenance"], "native");
        assert_eq!(body["label"], Value::Null);
        assert_eq!(body["totalReceived"], 900);
        assert_eq!(body["totalOutstanding"], 600);
        assert_eq!(body["editing"], Value::Null);
    }
}

// ============================================================================
// Files
// ============================================================================

mod file_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_and_search() {
        let server = seeded_server();

        let all: Value = server.get("/api/v1/files").await.json();
        assert_eq!(all["count"], 3);

        let response = server.get("/api/v1/files").add_query_param("q", "sana").await;
        let found: Value = response.json();
        assert_eq!(found["count"], 1);
        assert_eq!(found["files"][0]["fileNo"], "LHR-77");
        assert_eq!(found["files"][0]["ownerCNIC"], "42101-1111111-2");
    }

    #[tokio::test]
    async fn test_summary_formatting() {
        let server = seeded_server();
        let body: Value = server
            .get("/api/v1/files")
            .add_query_param("q", "DIN-002")
            .await
            .json();

        let row = &body["files"][0];
        assert_eq!(row["valueDisplay"], "Rs 2,500,000");
        assert_eq!(row["location"], "Plot: 14 Block: C");
    }

    #[tokio::test]
    async fn test_enroll() {
        let server = seeded_server();
        let response = server
            .post("/api/v1/files")
            .json(&json!({
                "fileNo": "DIN-101",
                "ownerName": "Imran Qureshi",
                "ownerCNIC": "35202-9999999-9",
                "plotValue": "1500000"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let file: Value = response.json();
        assert_eq!(file["plotSize"], "5 Marla-Residential");
        assert_eq!(file["plotValue"], 1_500_000);
        assert_eq!(file["currencyNo"], "-");
        assert_eq!(file["block"], "-");
        assert_eq!(file["transactions"], json!([]));
    }

    #[tokio::test]
    async fn test_enroll_duplicate_conflicts() {
        let server = seeded_server();
        let response = server
            .post("/api/v1/files")
            .json(&json!({ "fileNo": "F1", "ownerName": "Someone" }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["error"], "conflict");
    }

    #[tokio::test]
    async fn test_enroll_requires_file_no() {
        let server = seeded_server();
        let response = server
            .post("/api/v1/files")
            .json(&json!({ "fileNo": "", "ownerName": "Someone" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"], json!(["file_no"]));
    }

    #[tokio::test]
    async fn test_get_file_and_statement() {
        let server = seeded_server();

        let file: Value = server.get("/api/v1/files/F1").await.json();
        assert_eq!(file["paymentReceived"], 900);
        assert_eq!(file["balance"], 600);

        let statement: Value = server.get("/api/v1/files/F1/statement").await.json();
        assert_eq!(statement["entries"][0]["seq"], 1);
        assert_eq!(statement["entries"][1]["seq"], 2);

        server
            .get("/api/v1/files/NOPE")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Ledger Editing
// ============================================================================

mod ledger_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_edit_cycle() {
        let server = seeded_server();

        let begun: Value = server.post("/api/v1/files/F1/ledger").await.json();
        assert_eq!(begun["ledger"]["fileNo"], "F1");
        assert_eq!(begun["ledger"]["entries"][0]["seq"], 1);
        assert_eq!(begun["discarded"], Value::Null);

        let updated: Value = server
            .patch("/api/v1/ledger/entries/0")
            .json(&json!({ "field": "amount_paid", "value": "1200" }))
            .await
            .json();
        assert_eq!(updated["entry"]["balduedeb"], 0);
        assert_eq!(updated["totals"]["balance"], 0);

        let added = server.post("/api/v1/ledger/entries").await;
        added.assert_status(StatusCode::CREATED);
        let added: Value = added.json();
        assert_eq!(added["index"], 2);
        assert_eq!(added["entry"]["seq"], 3);
        assert_eq!(added["entry"]["itemcode"], "F1");

        server
            .patch("/api/v1/ledger/entries/2")
            .json(&json!({ "field": "receivable", "value": 250 }))
            .await
            .assert_status_ok();

        let committed: Value = server.post("/api/v1/ledger/commit").await.json();
        assert_eq!(committed["status"], "committed");
        assert_eq!(committed["totals"]["paymentReceived"], 1700);
        assert_eq!(committed["totals"]["balance"], 250);

        let file: Value = server.get("/api/v1/files/F1").await.json();
        assert_eq!(file["transactions"].as_array().unwrap().len(), 3);
        assert_eq!(file["balance"], 250);

        server
            .get("/api/v1/ledger")
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_remove_keeps_seq() {
        let server = seeded_server();
        server.post("/api/v1/files/F1/ledger").await.assert_status_ok();

        let ledger: Value = server.delete("/api/v1/ledger/entries/0").await.json();
        assert_eq!(ledger["entries"].as_array().unwrap().len(), 1);
        assert_eq!(ledger["entries"][0]["seq"], 2);

        server
            .delete("/api/v1/ledger/entries/5")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_field_requests() {
        let server = seeded_server();
        server.post("/api/v1/files/F1/ledger").await.assert_status_ok();

        server
            .patch("/api/v1/ledger/entries/0")
            .json(&json!({ "field": "balduedeb", "value": 5 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .patch("/api/v1/ledger/entries/0")
            .json(&json!({ "field": "seq", "value": "two" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_second_begin_discards_first() {
        let server = seeded_server();
        server.post("/api/v1/files/F1/ledger").await.assert_status_ok();
        server.post("/api/v1/ledger/entries").await;

        let begun: Value = server.post("/api/v1/files/DIN-002/ledger").await.json();
        assert_eq!(begun["discarded"], "F1");

        let file: Value = server.get("/api/v1/files/F1").await.json();
        assert_eq!(file["transactions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_discard() {
        let server = seeded_server();
        server
            .delete("/api/v1/ledger")
            .await
            .assert_status(StatusCode::CONFLICT);

        server.post("/api/v1/files/F1/ledger").await.assert_status_ok();
        server
            .delete("/api/v1/ledger")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .post("/api/v1/ledger/commit")
            .await
            .assert_status(StatusCode::CONFLICT);
    }
}

// ============================================================================
// Export & Seeding
// ============================================================================

mod export_tests {
    use super::*;

    #[tokio::test]
    async fn test_export_csv() {
        let server = seeded_server();
        let response = server.get("/api/v1/export").await;

        response.assert_status_ok();
        let disposition = response.header("content-disposition");
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"DIN_Property_Registry_"));
        assert!(disposition.ends_with(".csv\""));

        let body = response.text();
        assert_eq!(body.lines().count(), 4);
        assert!(body.starts_with("File Number,Owner Name,"));
    }

    #[tokio::test]
    async fn test_export_empty_registry() {
        let server = server_with(RegistryPortal::default());
        server
            .get("/api/v1/export")
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_seeded_registry_is_imported() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        let files = RegistryFixtures::sample_registry();
        write!(seed, "{}", serde_json::to_string(&files).unwrap()).unwrap();

        let config = RegistryConfig {
            seed_path: Some(seed.path().to_path_buf()),
            ..Default::default()
        };
        let portal = build_portal(&config).unwrap();
        assert_eq!(portal.provenance(), Provenance::Imported);
        assert_eq!(portal.files().len(), 3);

        let server = TestServer::new(create_router(portal, config)).unwrap();
        let body: Value = server.get("/api/v1/registry").await.json();
        assert_eq!(body["label"], "Imported");
    }

    #[test]
    fn test_seed_with_duplicates_is_rejected() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        write!(seed, r#"[{{"fileNo": "A"}}, {{"fileNo": "A"}}]"#).unwrap();

        let config = RegistryConfig {
            seed_path: Some(seed.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(build_portal(&config), Err(SeedError::Registry(_))));
    }

    #[test]
    fn test_seed_must_be_json() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        write!(seed, "not json").unwrap();

        let config = RegistryConfig {
            seed_path: Some(seed.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(build_portal(&config), Err(SeedError::Parse { .. })));
    }
}
