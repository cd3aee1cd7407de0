// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Azure Blob Storage adapter over the REST API

use super::{BlobStore, ErrorCategory, SharedKeySigner, StoreError, WriteMode};
use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode, Url};
use sl_core::RemoteStoreLocation;

const API_VERSION: &str = "2021-08-06";

/// Blob store for one container, authenticated with the account access key
#[derive(Clone, Debug)]
pub struct AzureBlobStore {
    client: reqwest::Client,
    signer: SharedKeySigner,
    endpoint: Url,
    container: String,
}

/// One outgoing request, before signing
struct BlobRequest<'a> {
    operation: &'static str,
    method: Method,
    blob: &'a str,
    query: Vec<(&'static str, &'static str)>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl AzureBlobStore {
    pub fn new(location: &RemoteStoreLocation) -> Result<Self, StoreError> {
        let endpoint = format!("https://{}.blob.core.windows.net", location.account_name);
        Self::with_endpoint(location, &endpoint)
    }

    /// Use a non-default service endpoint (sovereign clouds, local emulators)
    pub fn with_endpoint(location: &RemoteStoreLocation, endpoint: &str) -> Result<Self, StoreError> {
        let invalid = |message: String| StoreError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message,
        };
        let endpoint_url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if endpoint_url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            signer: SharedKeySigner::new(location.account_name.clone(), location.access_key())?,
            endpoint: endpoint_url,
            container: location.container_name.clone(),
        })
    }

    /// Full URL of `blob`, path segments percent-encoded
    fn blob_url(&self, blob: &str) -> Result<Url, StoreError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
                message: "not a base URL".to_string(),
            })?
            .pop_if_empty()
            .push(&self.container)
            .extend(blob.split('/'));
        Ok(url)
    }

    async fn send(&self, req: BlobRequest<'_>) -> Result<Response, StoreError> {
        let url = self.blob_url(req.blob)?;
        let mut headers = req.headers;
        headers.push((
            "x-ms-date".to_string(),
            chrono::Utc::now()
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string(),
        ));
        headers.push(("x-ms-version".to_string(), API_VERSION.to_string()));
        headers.push(("content-length".to_string(), req.body.len().to_string()));

        let string_to_sign =
            self.signer
                .string_to_sign(req.method.as_str(), &headers, url.path(), &req.query);
        let authorization = self.signer.authorization(&string_to_sign);

        let mut builder = self
            .client
            .request(req.method, url)
            .query(&req.query)
            .header("authorization", authorization);
        for (name, value) in &headers {
            // reqwest derives content-length from the body
            if name != "content-length" {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }

        builder
            .body(req.body)
            .send()
            .await
            .map_err(|e| StoreError::Transport {
                operation: req.operation,
                blob: req.blob.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn exists(&self, blob: &str) -> Result<bool, StoreError> {
        let response = self
            .send(BlobRequest {
                operation: "head",
                method: Method::HEAD,
                blob,
                query: Vec::new(),
                headers: Vec::new(),
                body: Vec::new(),
            })
            .await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(service_error("head", blob, &response)),
        }
    }

    async fn put(&self, blob: &str, content: Vec<u8>, mode: WriteMode) -> Result<(), StoreError> {
        let mut headers = vec![("x-ms-blob-type".to_string(), "BlockBlob".to_string())];
        if mode == WriteMode::CreateOnly {
            headers.push(("if-none-match".to_string(), "*".to_string()));
        }

        let response = self
            .send(BlobRequest {
                operation: "put",
                method: Method::PUT,
                blob,
                query: Vec::new(),
                headers,
                body: content,
            })
            .await?;

        if response.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(service_error("put", blob, &response))
        }
    }

    async fn acquire_lease(&self, blob: &str) -> Result<String, StoreError> {
        let response = self
            .send(BlobRequest {
                operation: "lease acquire",
                method: Method::PUT,
                blob,
                query: vec![("comp", "lease")],
                headers: vec![
                    ("x-ms-lease-action".to_string(), "acquire".to_string()),
                    ("x-ms-lease-duration".to_string(), "-1".to_string()),
                ],
                body: Vec::new(),
            })
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(service_error("lease acquire", blob, &response));
        }

        response
            .headers()
            .get("x-ms-lease-id")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| StoreError::MissingLeaseId(blob.to_string()))
    }

    async fn release_lease(&self, blob: &str, lease_id: &str) -> Result<(), StoreError> {
        let response = self
            .send(BlobRequest {
                operation: "lease release",
                method: Method::PUT,
                blob,
                query: vec![("comp", "lease")],
                headers: vec![
                    ("x-ms-lease-action".to_string(), "release".to_string()),
                    ("x-ms-lease-id".to_string(), lease_id.to_string()),
                ],
                body: Vec::new(),
            })
            .await?;

        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(service_error("lease release", blob, &response))
        }
    }
}

fn service_error(operation: &'static str, blob: &str, response: &Response) -> StoreError {
    let code = response
        .headers()
        .get("x-ms-error-code")
        .and_then(|v| v.to_str().ok());
    StoreError::Service {
        operation,
        blob: blob.to_string(),
        status: response.status().as_u16(),
        category: ErrorCategory::from_code(code),
    }
}

#[cfg(test)]
#[path = "azblob_tests.rs"]
mod tests;
