//! Network access for readers.
//!
//! Readers never build HTTP requests themselves. They ask a [`Transport`]
//! for the raw bytes behind a site's path, which keeps them testable and
//! leaves timeouts, TLS and name resolution to the transport.

use async_trait::async_trait;

use crate::TransportError;

/// Fetches raw status page bytes for a configured site.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single GET for `path` on the site named `site_name`.
    ///
    /// Implementations must not retry; one call is one attempt.
    async fn get(&self, site_name: &str, path: &str) -> Result<Vec<u8>, TransportError>;
}

#[cfg(feature = "http")]
pub use http::{HttpTransport, HttpTransportBuilder, DEFAULT_TIMEOUT};

#[cfg(feature = "http")]
mod http {
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::{Client, Url};
    use tracing::debug;

    use super::Transport;
    use crate::TransportError;

    /// Per-request timeout budget.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// [`Transport`] backed by a shared `reqwest` client.
    ///
    /// Each site name maps to the base URL (scheme, host and port) of its
    /// status page; request paths are resolved against that base.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: Client,
        bases: HashMap<String, Url>,
    }

    impl HttpTransport {
        /// Create a new builder for configuring the transport.
        pub fn builder() -> HttpTransportBuilder {
            HttpTransportBuilder::default()
        }

        /// Build a transport for the given site name to URL map with the
        /// default timeout.
        pub fn from_bases<I, S>(bases: I) -> Result<Self, TransportError>
        where
            I: IntoIterator<Item = (S, Url)>,
            S: Into<String>,
        {
            Self::builder().sites(bases).build()
        }

        /// Base URL registered for a site.
        pub fn base_url(&self, site_name: &str) -> Option<&Url> {
            self.bases.get(site_name)
        }

        fn resolve(&self, site_name: &str, path: &str) -> Result<Url, TransportError> {
            let base = self
                .bases
                .get(site_name)
                .ok_or_else(|| TransportError::UnknownSite(site_name.to_string()))?;

            base.join(path).map_err(|e| TransportError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
        }
    }

    #[async_trait]
    impl Transport for HttpTransport {
        async fn get(&self, site_name: &str, path: &str) -> Result<Vec<u8>, TransportError> {
            let url = self.resolve(site_name, path)?;
            debug!(site = site_name, %url, "requesting status page");

            let response = self.client.get(url).send().await?;

            if !response.status().is_success() {
                return Err(TransportError::Status(response.status().as_u16()));
            }

            let body = response.bytes().await?;
            Ok(body.to_vec())
        }
    }

    /// Builder for HttpTransport.
    #[derive(Debug, Default)]
    pub struct HttpTransportBuilder {
        bases: HashMap<String, Url>,
        timeout: Option<Duration>,
    }

    impl HttpTransportBuilder {
        /// Register a site. Only the scheme, host and port of `url` are kept.
        pub fn site(mut self, name: impl Into<String>, url: Url) -> Self {
            self.bases.insert(name.into(), base_of(url));
            self
        }

        /// Register several sites at once.
        pub fn sites<I, S>(mut self, sites: I) -> Self
        where
            I: IntoIterator<Item = (S, Url)>,
            S: Into<String>,
        {
            for (name, url) in sites {
                self = self.site(name, url);
            }
            self
        }

        /// Set the request timeout (default: 10 seconds).
        pub fn timeout(mut self, timeout: Duration) -> Self {
            self.timeout = Some(timeout);
            self
        }

        /// Build the transport.
        pub fn build(self) -> Result<HttpTransport, TransportError> {
            let client = Client::builder()
                .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .user_agent(concat!("whats-up/", env!("CARGO_PKG_VERSION")))
                .build()?;

            Ok(HttpTransport {
                client,
                bases: self.bases,
            })
        }
    }

    fn base_of(mut url: Url) -> Url {
        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);
        url
    }

}
