//! The reader abstraction every provider format implements.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use whatsup_types::SharedDetails;

use crate::{AdapterError, Transport};

/// Reads one service's status in a specific provider format.
///
/// Readers are stateless: the same instance is shared by every site that
/// uses its format and may be called concurrently.
#[async_trait]
pub trait StatusReader: Send + Sync + Debug {
    /// The service type this reader handles, as written in configuration.
    fn service_type(&self) -> &'static str;

    /// Fetch and decode the status of `site_name`, found at `path`.
    ///
    /// Makes exactly one request through `transport`.
    async fn read_status(
        &self,
        transport: &dyn Transport,
        site_name: &str,
        path: &str,
    ) -> Result<SharedDetails, AdapterError>;
}

/// Fetch `path` and decode the body as `T`.
pub(crate) async fn fetch_json<T>(
    transport: &dyn Transport,
    site_name: &str,
    path: &str,
) -> Result<T, AdapterError>
where
    T: DeserializeOwned,
{
    let body = transport
        .get(site_name, path)
        .await
        .map_err(|source| AdapterError::RequestFailed {
            site: site_name.to_string(),
            source,
        })?;

    debug!(site = site_name, bytes = body.len(), "decoding status page");

    serde_json::from_slice(&body).map_err(|source| AdapterError::DecodeFailed {
        site: site_name.to_string(),
        source,
    })
}
