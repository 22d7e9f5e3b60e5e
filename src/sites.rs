//! Monitored site configuration.
//!
//! Sites are read from a JSON file mapping a display name to the site's
//! status page and provider type:
//!
//! ```json
//! {
//!   "CircleCI": { "url": "https://status.circleci.com/api/v2/status.json", "type": "statuspage.io" },
//!   "Slack": { "url": "https://status.slack.com/api/v2.0.0/current", "type": "slack" }
//! }
//! ```
//!
//! A missing file is not an error: an empty configuration is written in its
//! place so there is something to edit.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use whatsup_adapters::{HttpTransport, TransportError};

/// Default location of the sites file, relative to the plugin's directory.
pub const DEFAULT_SITES_FILE: &str = "./.whats-up.json";

const EMPTY_CONFIGURATION: &str = "{\n}";

/// A monitored status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Full URL of the status document.
    pub url: Url,

    /// Provider format, e.g. `statuspage.io` or `slack`.
    #[serde(rename = "type")]
    pub service_type: String,

    /// Request path to use instead of the URL's own path.
    ///
    /// Resolved from the host root: with a URL of `https://host/status/` and
    /// a slug of `api/v2/status.json` the request goes to
    /// `https://host/api/v2/status.json`, not under `/status/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Site {
    /// Path requested from the site's host.
    pub fn path(&self) -> &str {
        self.slug.as_deref().unwrap_or_else(|| self.url.path())
    }
}

/// Monitored sites keyed by display name.
pub type Sites = BTreeMap<String, Site>;

/// Errors loading the sites file. Any of these stops the run before a
/// single site is queried.
#[derive(Debug, Error)]
pub enum SitesError {
    #[error("unable to create default What's Up configuration at {}: {source}", .path.display())]
    WriteDefault {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read What's Up configuration at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing What's Up configuration at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the sites file, creating an empty one if it does not exist.
pub fn load_sites(path: &Path) -> Result<Sites, SitesError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no configuration found, writing an empty one");
            fs::write(path, EMPTY_CONFIGURATION).map_err(|source| SitesError::WriteDefault {
                path: path.to_path_buf(),
                source,
            })?;
            EMPTY_CONFIGURATION.to_string()
        }
        Err(source) => {
            return Err(SitesError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    parse_sites(&content).map_err(|source| SitesError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse sites from a JSON string.
pub fn parse_sites(content: &str) -> Result<Sites, serde_json::Error> {
    let sites: Sites = serde_json::from_str(content)?;
    debug!(count = sites.len(), "parsed sites");
    Ok(sites)
}

/// Build an HTTP transport that knows the base URL of every site.
pub fn http_transport(sites: &Sites) -> Result<HttpTransport, TransportError> {
    HttpTransport::from_bases(sites.iter().map(|(name, site)| (name.clone(), site.url.clone())))
}
