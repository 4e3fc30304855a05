//! HTTP gateway to the storefront backend.
//!
//! Every service call funnels through [`Gateway`], which attaches the current
//! bearer token and owns the single-retry refresh discipline: a `401` on an
//! authenticated call triggers at most one `POST /refresh` followed by one
//! replay of the original request. A second `401` is terminal and surfaces
//! [`ApiError::Unauthenticated`]; only a failed refresh invalidates the
//! stored credentials. A `401` on a call that merely carried a bad payload
//! (a rejected sign-in, say) must not destroy a live session.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::auth::{CredentialStore, TokenPair};
use crate::config::ClientConfig;
use crate::error::{ApiError, error_message};

// ============================================================================
// Refresh flow
// ============================================================================

/// Where a request stands in the refresh discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshFlow {
    /// First attempt, nothing refreshed yet.
    Initial,
    /// The refresh call is in flight.
    Refreshing,
    /// The request has been replayed once with fresh credentials.
    Retried,
    /// Refresh failed or was exhausted; the session is gone.
    Failed,
}

/// What to do with a response, given where the request stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowStep {
    /// Hand the response back, success or plain error alike.
    Complete,
    /// Exchange the refresh token and replay the request once.
    Refresh,
    /// Stop; the request stays unauthorized.
    GiveUp,
}

/// Pure decision table for the refresh discipline.
///
/// Only the very first `401` of a request with a stored pair earns a
/// refresh; everything else either completes or gives up.
fn step(flow: RefreshFlow, unauthorized: bool, has_pair: bool) -> (FlowStep, RefreshFlow) {
    match (flow, unauthorized, has_pair) {
        (flow, false, _) => (FlowStep::Complete, flow),
        (RefreshFlow::Initial, true, true) => (FlowStep::Refresh, RefreshFlow::Refreshing),
        (_, true, _) => (FlowStep::GiveUp, RefreshFlow::Failed),
    }
}

// ============================================================================
// Gateway
// ============================================================================

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

struct GatewayInner {
    http: reqwest::Client,
    /// Base URL without a trailing slash; paths are appended verbatim.
    base_url: String,
    credentials: Arc<CredentialStore>,
}

/// Shared, cheaply clonable handle to the backend.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

impl Gateway {
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<CredentialStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let base_url = config.api_base_url.as_str().trim_end_matches('/').to_owned();
        Ok(Self {
            inner: Arc::new(GatewayInner {
                http,
                base_url,
                credentials,
            }),
        })
    }

    pub(crate) fn credentials(&self) -> &Arc<CredentialStore> {
        &self.inner.credentials
    }

    // ------------------------------------------------------------------
    // Typed helpers
    // ------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with(path, &[]).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, query, None).await?;
        read_json(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, &[], Some(&body)).await?;
        read_json(response).await
    }

    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, &[], Some(&body)).await?;
        Ok(())
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::PUT, path, &[], Some(&body)).await?;
        read_json(response).await
    }

    pub async fn patch_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body = serde_json::to_value(body)?;
        self.send(Method::PATCH, path, &[], Some(&body)).await?;
        Ok(())
    }

    pub async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    /// Issue a request, applying the refresh discipline, and return the
    /// response once its status is a success.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{path}", self.inner.base_url);
        let request_id = Uuid::new_v4();
        let mut flow = RefreshFlow::Initial;

        loop {
            let bearer = self.inner.credentials.current().map(|pair| pair.access);
            tracing::debug!(%request_id, %method, path, authenticated = bearer.is_some(), "dispatching request");

            let response = self
                .dispatch(&method, &url, query, body, bearer.as_deref())
                .await?;

            let unauthorized = response.status() == StatusCode::UNAUTHORIZED;
            let has_pair = self.inner.credentials.current().is_some();
            let (action, next) = step(flow, unauthorized, has_pair);
            flow = next;

            match action {
                FlowStep::Complete => return check_status(response).await,
                FlowStep::Refresh => match self.refresh_credentials().await {
                    Ok(()) => {
                        flow = RefreshFlow::Retried;
                        tracing::debug!(%request_id, "credentials refreshed; replaying request");
                    }
                    Err(err) => {
                        flow = RefreshFlow::Failed;
                        tracing::warn!(%request_id, state = ?flow, error = %err, "credential refresh failed");
                        self.inner.credentials.invalidate();
                        return Err(ApiError::Unauthenticated);
                    }
                },
                FlowStep::GiveUp => {
                    tracing::warn!(%request_id, state = ?flow, "request still unauthorized");
                    return Err(ApiError::Unauthenticated);
                }
            }
        }
    }

    async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut builder = self.inner.http.request(method.clone(), url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(json) = body {
            builder = builder.json(json);
        }
        Ok(builder.send().await?)
    }

    /// Exchange the stored refresh token for a fresh pair.
    ///
    /// Sent without a bearer header; the refresh token in the body is the
    /// whole proof of identity.
    async fn refresh_credentials(&self) -> Result<(), ApiError> {
        let Some(pair) = self.inner.credentials.current() else {
            return Err(ApiError::Unauthenticated);
        };

        let url = format!("{}/refresh", self.inner.base_url);
        let response = self
            .inner
            .http
            .post(url)
            .json(&RefreshRequest {
                refresh: &pair.refresh,
            })
            .send()
            .await?;
        let response = check_status(response).await?;

        let fresh: TokenPair = read_json(response).await?;
        self.inner.credentials.install(fresh);
        Ok(())
    }
}

/// Turn a non-success status into [`ApiError::Status`], extracting the
/// backend's message from the body when it offers one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_unauthorized_with_pair_refreshes() {
        assert_eq!(
            step(RefreshFlow::Initial, true, true),
            (FlowStep::Refresh, RefreshFlow::Refreshing)
        );
    }

    #[test]
    fn test_unauthorized_without_pair_gives_up() {
        assert_eq!(
            step(RefreshFlow::Initial, true, false),
            (FlowStep::GiveUp, RefreshFlow::Failed)
        );
    }

    #[test]
    fn test_second_unauthorized_gives_up() {
        assert_eq!(
            step(RefreshFlow::Retried, true, true),
            (FlowStep::GiveUp, RefreshFlow::Failed)
        );
    }

    #[test]
    fn test_success_completes_in_any_state() {
        assert_eq!(
            step(RefreshFlow::Initial, false, true),
            (FlowStep::Complete, RefreshFlow::Initial)
        );
        assert_eq!(
            step(RefreshFlow::Retried, false, true),
            (FlowStep::Complete, RefreshFlow::Retried)
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_surfaces_transport_error() {
        let storage: Arc<dyn crate::storage::KeyValueStore> =
            Arc::new(crate::storage::MemoryStore::new());
        let credentials = Arc::new(CredentialStore::new(storage));
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".parse().expect("url"),
            ..ClientConfig::default()
        };
        let gateway = Gateway::new(&config, credentials).expect("gateway");

        let result: Result<serde_json::Value, ApiError> = gateway.get("/products").await;
        assert!(matches!(result, Err(ApiError::Http(_))));
    }
}
