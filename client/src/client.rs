//! Bearer-token transport shared by every endpoint module.
//!
//! One request, one typed response (or a taxonomy error); pagination and
//! rate-limit metadata are lifted off the headers before the body is
//! consumed so every list call returns them alongside the items.

use crate::pagination::{self, PageInfo};
use crate::ratelimit;
use crate::urls::Paths;
use errors::{ConnectorError, ConnectorResult};
use fl_core::RateLimit;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 30;

// Non-2xx bodies are captured for diagnostics but never unbounded.
const ERROR_BODY_LIMIT: usize = 2048;

pub struct FaultlineClient {
    http: Client,
    paths: Paths,
    api_token: String
}

/// One page of a paginated listing plus its response metadata.
#[derive(Debug, Clone)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub page: PageInfo,
    pub rate_limit: Option<RateLimit>
}

impl FaultlineClient {
    pub fn new(base_url: &str, api_token: &str) -> ConnectorResult<Self> {
        Self::with_timeout(base_url, api_token, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: &str,
        api_token: &str,
        timeout: Duration
    ) -> ConnectorResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ConnectorError::Transport {
                operation: "build-http-client",
                url: base_url.to_string(),
                source
            })?;

        Ok(Self {
            http,
            paths: Paths::new(base_url),
            api_token: api_token.to_string()
        })
    }

    pub(crate) fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Fetch one page of a paginated collection. An empty `cursor` means
    /// the first page.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String,
        cursor: &str
    ) -> ConnectorResult<ListResponse<T>> {
        debug!(url = %url, operation, cursor, "faultline api request");

        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json");
        if !cursor.is_empty() {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ConnectorError::Transport {
                operation,
                url: url.clone(),
                source
            })?;
        let response = check_status(operation, response).await?;

        let page = pagination::parse_link_header(response.headers());
        let rate_limit = ratelimit::parse_rate_limit(response.headers());
        let items = response
            .json::<Vec<T>>()
            .await
            .map_err(|source| ConnectorError::Transport {
                operation,
                url: url.clone(),
                source
            })?;

        Ok(ListResponse {
            items,
            page,
            rate_limit
        })
    }

    /// Fetch a single detailed object.
    pub(crate) async fn get_one<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String
    ) -> ConnectorResult<T> {
        debug!(url = %url, operation, "faultline api request");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ConnectorError::Transport {
                operation,
                url: url.clone(),
                source
            })?;
        let response = check_status(operation, response).await?;

        response
            .json::<T>()
            .await
            .map_err(|source| ConnectorError::Transport {
                operation,
                url: url.clone(),
                source
            })
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        url: String,
        body: &B
    ) -> ConnectorResult<()> {
        debug!(url = %url, operation, "faultline api write");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await
            .map_err(|source| ConnectorError::Transport {
                operation,
                url: url.clone(),
                source
            })?;
        check_status(operation, response).await.map(|_| ())
    }

    pub(crate) async fn post_empty(
        &self,
        operation: &'static str,
        url: String
    ) -> ConnectorResult<()> {
        debug!(url = %url, operation, "faultline api write");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|source| ConnectorError::Transport {
                operation,
                url: url.clone(),
                source
            })?;
        check_status(operation, response).await.map(|_| ())
    }

    pub(crate) async fn delete(
        &self,
        operation: &'static str,
        url: String
    ) -> ConnectorResult<()> {
        debug!(url = %url, operation, "faultline api write");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|source| ConnectorError::Transport {
                operation,
                url: url.clone(),
                source
            })?;
        check_status(operation, response).await.map(|_| ())
    }
}

async fn check_status(operation: &'static str, response: Response) -> ConnectorResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // The final URL (cursor included) pins the failure to one container.
    let url = response.url().to_string();
    let mut body = response.text().await.unwrap_or_default();
    body.truncate(ERROR_BODY_LIMIT);
    Err(ConnectorError::Status {
        operation,
        url,
        status: status.as_u16(),
        body
    })
}
