// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mockito::Matcher;

const LOCK: &str = "/state/state-locks/demo-1.lock";

fn location() -> RemoteStoreLocation {
    RemoteStoreLocation::new("devstoreaccount1", "a2V5", "state")
}

fn store_for(server: &mockito::ServerGuard) -> AzureBlobStore {
    AzureBlobStore::with_endpoint(&location(), &server.url()).unwrap()
}

fn lease_query() -> Matcher {
    Matcher::UrlEncoded("comp".into(), "lease".into())
}

#[test]
fn blob_url_keeps_endpoint_path_and_encodes_segments() {
    let store =
        AzureBlobStore::with_endpoint(&location(), "http://127.0.0.1:10000/devstoreaccount1/")
            .unwrap();
    assert_eq!(
        store.blob_url("init-stack.lock").unwrap().path(),
        "/devstoreaccount1/state/init-stack.lock"
    );
    assert_eq!(
        store.blob_url("dir/a b.json").unwrap().path(),
        "/devstoreaccount1/state/dir/a%20b.json"
    );

    let store = AzureBlobStore::new(&location()).unwrap();
    assert_eq!(
        store.blob_url(".pulumi/stacks/demo-1.json").unwrap().as_str(),
        "https://devstoreaccount1.blob.core.windows.net/state/.pulumi/stacks/demo-1.json"
    );
}

#[test]
fn rejects_unparseable_endpoint() {
    let err = AzureBlobStore::with_endpoint(&location(), "not a url").unwrap_err();
    assert!(matches!(err, StoreError::InvalidEndpoint { .. }));
}

#[tokio::test]
async fn head_maps_status_to_existence() {
    let mut server = mockito::Server::new_async().await;
    let _found = server
        .mock("HEAD", "/state/.pulumi/stacks/demo-1.json")
        .match_header(
            "authorization",
            Matcher::Regex("^SharedKey devstoreaccount1:".into()),
        )
        .match_header("x-ms-version", API_VERSION)
        .with_status(200)
        .create_async()
        .await;
    let _missing = server
        .mock("HEAD", "/state/.pulumi/stacks/demo-2.json")
        .with_status(404)
        .with_header("x-ms-error-code", "BlobNotFound")
        .create_async()
        .await;

    let store = store_for(&server);
    assert!(store.exists(".pulumi/stacks/demo-1.json").await.unwrap());
    assert!(!store.exists(".pulumi/stacks/demo-2.json").await.unwrap());
}

#[tokio::test]
async fn head_reports_other_statuses_as_service_errors() {
    let mut server = mockito::Server::new_async().await;
    let _denied = server
        .mock("HEAD", "/state/.pulumi/stacks/demo-1.json")
        .with_status(403)
        .with_header("x-ms-error-code", "AuthenticationFailed")
        .create_async()
        .await;

    let err = store_for(&server)
        .exists(".pulumi/stacks/demo-1.json")
        .await
        .unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::AuthenticationFailed));
    assert!(matches!(err, StoreError::Service { status: 403, .. }));
}

#[tokio::test]
async fn create_only_put_sends_condition_and_reads_conflict_category() {
    let mut server = mockito::Server::new_async().await;
    let conflict = server
        .mock("PUT", "/state/init-stack.lock")
        .match_header("if-none-match", "*")
        .match_header("x-ms-blob-type", "BlockBlob")
        .with_status(409)
        .with_header("x-ms-error-code", "BlobAlreadyExists")
        .create_async()
        .await;

    let err = store_for(&server)
        .put("init-stack.lock", Vec::new(), WriteMode::CreateOnly)
        .await
        .unwrap_err();
    conflict.assert_async().await;
    assert_eq!(err.category(), Some(&ErrorCategory::BlobAlreadyExists));
    assert!(err.category().is_some_and(ErrorCategory::means_already_exists));
}

#[tokio::test]
async fn overwrite_put_sends_no_condition() {
    let mut server = mockito::Server::new_async().await;
    let created = server
        .mock("PUT", "/state/init-stack.lock")
        .match_header("if-none-match", Matcher::Missing)
        .match_body("marker")
        .with_status(201)
        .create_async()
        .await;

    store_for(&server)
        .put("init-stack.lock", b"marker".to_vec(), WriteMode::Overwrite)
        .await
        .unwrap();
    created.assert_async().await;
}

#[tokio::test]
async fn put_without_error_code_is_unknown_category() {
    let mut server = mockito::Server::new_async().await;
    let _broken = server
        .mock("PUT", "/state/init-stack.lock")
        .with_status(500)
        .create_async()
        .await;

    let err = store_for(&server)
        .put("init-stack.lock", Vec::new(), WriteMode::CreateOnly)
        .await
        .unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::Unknown));
    assert!(!err.category().is_some_and(ErrorCategory::means_already_exists));
}

#[tokio::test]
async fn acquire_returns_lease_id_header() {
    let mut server = mockito::Server::new_async().await;
    let acquired = server
        .mock("PUT", LOCK)
        .match_query(lease_query())
        .match_header("x-ms-lease-action", "acquire")
        .match_header("x-ms-lease-duration", "-1")
        .with_status(201)
        .with_header("x-ms-lease-id", "4f1c2a7e-lease")
        .create_async()
        .await;

    let lease = store_for(&server)
        .acquire_lease("state-locks/demo-1.lock")
        .await
        .unwrap();
    acquired.assert_async().await;
    assert_eq!(lease, "4f1c2a7e-lease");
}

#[tokio::test]
async fn acquire_without_lease_id_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _acquired = server
        .mock("PUT", LOCK)
        .match_query(lease_query())
        .with_status(201)
        .create_async()
        .await;

    let err = store_for(&server)
        .acquire_lease("state-locks/demo-1.lock")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::MissingLeaseId(ref blob) if blob == "state-locks/demo-1.lock"));
}

#[tokio::test]
async fn acquire_on_held_lease_reads_category() {
    let mut server = mockito::Server::new_async().await;
    let _held = server
        .mock("PUT", LOCK)
        .match_query(lease_query())
        .with_status(409)
        .with_header("x-ms-error-code", "LeaseAlreadyPresent")
        .create_async()
        .await;

    let err = store_for(&server)
        .acquire_lease("state-locks/demo-1.lock")
        .await
        .unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::LeaseAlreadyPresent));
    assert!(err.category().is_some_and(ErrorCategory::means_lease_unavailable));
}

#[tokio::test]
async fn release_sends_exact_lease_id() {
    let mut server = mockito::Server::new_async().await;
    let released = server
        .mock("PUT", LOCK)
        .match_query(lease_query())
        .match_header("x-ms-lease-action", "release")
        .match_header("x-ms-lease-id", "4f1c2a7e-lease")
        .with_status(200)
        .create_async()
        .await;

    store_for(&server)
        .release_lease("state-locks/demo-1.lock", "4f1c2a7e-lease")
        .await
        .unwrap();
    released.assert_async().await;
}

#[tokio::test]
async fn release_with_wrong_lease_reads_category() {
    let mut server = mockito::Server::new_async().await;
    let _mismatch = server
        .mock("PUT", LOCK)
        .match_query(lease_query())
        .with_status(409)
        .with_header("x-ms-error-code", "LeaseIdMismatchWithLeaseOperation")
        .create_async()
        .await;

    let err = store_for(&server)
        .release_lease("state-locks/demo-1.lock", "stale")
        .await
        .unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::LeaseIdMismatch));
}
