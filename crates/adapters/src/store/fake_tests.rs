// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn create_only_refuses_existing_blob() {
    let store = FakeBlobStore::new();
    store.put("a.lock", b"x".to_vec(), WriteMode::CreateOnly).await.unwrap();

    let err = store
        .put("a.lock", b"y".to_vec(), WriteMode::CreateOnly)
        .await
        .unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::BlobAlreadyExists));
    assert_eq!(store.content("a.lock").unwrap(), b"x");
}

#[tokio::test]
async fn lease_lifecycle() {
    let store = FakeBlobStore::new();
    store.insert("a.lock", b"");

    let lease = store.acquire_lease("a.lock").await.unwrap();
    assert!(store.is_leased("a.lock"));

    let err = store.acquire_lease("a.lock").await.unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::LeaseAlreadyPresent));

    let err = store.release_lease("a.lock", "wrong").await.unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::LeaseIdMismatch));

    store.release_lease("a.lock", &lease).await.unwrap();
    assert!(!store.is_leased("a.lock"));
}

#[tokio::test]
async fn lease_on_missing_blob_fails() {
    let store = FakeBlobStore::new();
    let err = store.acquire_lease("missing.lock").await.unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::BlobNotFound));
}

#[tokio::test]
async fn overwrite_of_leased_blob_needs_lease() {
    let store = FakeBlobStore::new();
    store.insert("a.lock", b"");
    store.acquire_lease("a.lock").await.unwrap();

    let err = store
        .put("a.lock", b"new".to_vec(), WriteMode::Overwrite)
        .await
        .unwrap_err();
    assert_eq!(err.category(), Some(&ErrorCategory::LeaseIdMissing));
}

#[tokio::test]
async fn injected_failure_applies_until_cleared() {
    let store = FakeBlobStore::new();
    store.fail(StoreOp::Exists, 403, ErrorCategory::AuthenticationFailed);
    assert!(store.exists("x").await.is_err());

    store.clear_failures();
    assert!(!store.exists("x").await.unwrap());
    assert_eq!(store.calls().len(), 2);
}
