//! Outbound HTTP transport for the upstream API.

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use thiserror::Error;

use crate::Result;

/// Status and body of an upstream response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The request could not be completed at all (DNS, connect, timeout, or
/// the body stream broke off).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// Performs one GET and hands back whatever the server answered.
///
/// Implementations must not retry and must not treat non-2xx statuses as
/// errors; classification happens in [`crate::clash::http`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> std::result::Result<RawResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("clash-lookup/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> std::result::Result<RawResponse, TransportError> {
        let response = self.client.get(url).headers(headers).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}
