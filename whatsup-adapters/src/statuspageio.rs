//! Reader for status pages following the statuspage.io format.
//!
//! Statuspage powered pages publish a summary document, usually at
//! `/api/v2/status.json`, that carries a ready-made indicator:
//!
//! ```json
//! {
//!   "page": {
//!     "id": "6w4r0ttlx5ft",
//!     "name": "CircleCI",
//!     "url": "https://status.circleci.com",
//!     "time_zone": "Etc/UTC",
//!     "updated_at": "2024-05-01T12:00:00.000Z"
//!   },
//!   "status": { "indicator": "minor", "description": "Partially Degraded Service" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use whatsup_types::{Details, SharedDetails};

use crate::reader::{fetch_json, StatusReader};
use crate::{AdapterError, Transport};

/// Service type used in configuration.
pub const SERVICE_TYPE: &str = "statuspage.io";

/// Page information.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub time_zone: String,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Status information.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub indicator: String,
    #[serde(default)]
    pub description: String,
}

/// The document served by statuspage.io powered status pages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    pub page: Page,
    pub status: Status,
}

impl Details for Response {
    fn indicator(&self) -> String {
        self.status.indicator.clone()
    }

    fn name(&self) -> String {
        self.page.name.clone()
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.page.updated_at
    }

    fn url(&self) -> String {
        self.page.url.clone()
    }
}

/// Reader for statuspage.io pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatuspageIoReader;

#[async_trait]
impl StatusReader for StatuspageIoReader {
    fn service_type(&self) -> &'static str {
        SERVICE_TYPE
    }

    async fn read_status(
        &self,
        transport: &dyn Transport,
        site_name: &str,
        path: &str,
    ) -> Result<SharedDetails, AdapterError> {
        let response: Response = fetch_json(transport, site_name, path).await?;
        Ok(Arc::new(response))
    }
}
