// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! Cluster API client seam and its kube-rs implementation

use crate::config::Config;
use crate::constants::api::MANIFEST_CONTENT_TYPE;
use crate::error::ClusterError;
use anyhow::Context;
use http::{header, Method, Request};
use kube::{Client, Config as KConfig};
use std::future::Future;
use tracing::{debug, instrument};

/// Sends a request to the cluster API and returns the response body.
/// Non-2xx answers surface as `ClusterError::Status`.
pub trait ClusterClient {
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> impl Future<Output = Result<String, ClusterError>> + Send;
}

/// `ClusterClient` backed by a `kube::Client`; paths are resolved against
/// the client's cluster URL.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ClusterClient for KubeClusterClient {
    #[instrument(skip(self, body), fields(has_body = body.is_some()))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<String, ClusterError> {
        let mut builder = Request::builder().method(method).uri(path);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, MANIFEST_CONTENT_TYPE);
        }
        let request = builder
            .body(body.map(String::into_bytes).unwrap_or_default())
            .map_err(|e| ClusterError::Transport(kube::Error::HttpError(e)))?;

        let response = self.client.request_text(request).await?;
        debug!("Cluster API answered with {} bytes", response.len());
        Ok(response)
    }
}

/// Create a Kubernetes client from the inferred configuration, pointing it at
/// the configured cluster URL when one is set
pub async fn create_client(config: &Config) -> anyhow::Result<Client> {
    let mut c = KConfig::infer()
        .await
        .context("Failed to infer Kubernetes configuration")?;

    if let Some(cluster_url) = &config.cluster_url {
        debug!("Overriding cluster URL {} with {}", c.cluster_url, cluster_url);
        c.cluster_url = cluster_url
            .parse()
            .with_context(|| format!("Invalid CLUSTER_API_URL: {}", cluster_url))?;
    }

    Client::try_from(c).context("Failed to create Kubernetes client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Response;
    use http_body_util::BodyExt;
    use kube::client::Body;

    fn mock_client() -> (
        KubeClusterClient,
        tower_test::mock::Handle<Request<Body>, Response<Body>>,
    ) {
        let (service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
        (KubeClusterClient::new(Client::new(service, "default")), handle)
    }

    #[tokio::test]
    async fn test_send_with_body_sets_content_type() {
        let (client, mut handle) = mock_client();

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::PUT);
            assert_eq!(
                request.uri().path(),
                "/api/v1/namespaces/paas-abc123-caas/resourcequotas/paas-abc123-caas-resourcequota"
            );
            assert_eq!(
                request.headers().get(header::CONTENT_TYPE).unwrap(),
                MANIFEST_CONTENT_TYPE
            );
            let body = request.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&body[..], b"kind: ResourceQuota\n");

            send.send_response(
                Response::builder()
                    .body(Body::from(br#"{"kind":"ResourceQuota"}"#.to_vec()))
                    .unwrap(),
            );
        });

        let response = client
            .send(
                Method::PUT,
                "/api/v1/namespaces/paas-abc123-caas/resourcequotas/paas-abc123-caas-resourcequota",
                Some("kind: ResourceQuota\n".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(response, r#"{"kind":"ResourceQuota"}"#);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_send_without_body_omits_content_type() {
        let (client, mut handle) = mock_client();

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::DELETE);
            assert!(request.headers().get(header::CONTENT_TYPE).is_none());
            send.send_response(Response::builder().body(Body::from(b"{}".to_vec())).unwrap());
        });

        client
            .send(Method::DELETE, "/api/v1/namespaces/paas-abc123-caas", None)
            .await
            .unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_send_maps_error_status() {
        let (client, mut handle) = mock_client();

        let server = tokio::spawn(async move {
            let (_request, send) = handle.next_request().await.expect("service not called");
            let body = crate::test_utils::status_json(409, "AlreadyExists", "namespace exists");
            send.send_response(
                Response::builder()
                    .status(409)
                    .body(Body::from(body.into_bytes()))
                    .unwrap(),
            );
        });

        let err = client
            .send(Method::POST, "/api/v1/namespaces", Some("kind: Namespace\n".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, ClusterError::Status { code: 409, .. }));
        server.await.unwrap();
    }
}
