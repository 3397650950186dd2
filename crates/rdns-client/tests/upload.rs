//! Upload client integration tests against a mock cluster.

use std::io::Write;

use rdns_client::{UploadClient, UploadError};
use tempfile::NamedTempFile;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn staged_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ip,hostname").unwrap();
    writeln!(file, "192.0.2.1,host-1.example.com").unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn uploads_to_repository_files_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/repositories/sandbox/files"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = UploadClient::new(server.uri()).unwrap();
    let file = staged_csv();

    client
        .upload_lookup_file("sandbox", "rdns.csv", file.path())
        .await
        .unwrap();
}

#[tokio::test]
async fn sends_default_username_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/repositories/sandbox/files"))
        .and(basic_auth("rdns", "sekrit-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = UploadClient::builder(server.uri())
        .credentials(None, "sekrit-token")
        .build()
        .unwrap();
    let file = staged_csv();

    client
        .upload_lookup_file("sandbox", "rdns.csv", file.path())
        .await
        .unwrap();
}

#[tokio::test]
async fn sends_explicit_username() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/repositories/sandbox/files"))
        .and(basic_auth("ops", "hunter2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = UploadClient::builder(server.uri())
        .credentials(Some("ops".to_string()), "hunter2")
        .build()
        .unwrap();
    let file = staged_csv();

    client
        .upload_lookup_file("sandbox", "rdns.csv", file.path())
        .await
        .unwrap();
}

#[tokio::test]
async fn maps_401_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = UploadClient::new(server.uri()).unwrap();
    let file = staged_csv();

    let err = client
        .upload_lookup_file("sandbox", "rdns.csv", file.path())
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Unauthorized));
}

#[tokio::test]
async fn extracts_json_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "error": "no such repository" })),
        )
        .mount(&server)
        .await;

    let client = UploadClient::new(server.uri()).unwrap();
    let file = staged_csv();

    let err = client
        .upload_lookup_file("sandbox", "rdns.csv", file.path())
        .await
        .unwrap_err();

    match err {
        UploadError::Api { code, message } => {
            assert_eq!(code, 400);
            assert_eq!(message, "no such repository");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_text_error_body_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = UploadClient::new(server.uri()).unwrap();
    let file = staged_csv();

    let err = client
        .upload_lookup_file("sandbox", "rdns.csv", file.path())
        .await
        .unwrap_err();

    match err {
        UploadError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
