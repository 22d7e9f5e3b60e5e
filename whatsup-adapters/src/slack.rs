//! Reader for the Slack status API.
//!
//! Slack does not publish a severity. Its `current` document reports
//! `"ok"` when all is well and `"active"` while incidents are open, so the
//! reader treats any active incident as a major outage. Other labels are
//! passed through untouched and end up classified as `none`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use whatsup_types::{Details, SharedDetails};

use crate::reader::{fetch_json, StatusReader};
use crate::{AdapterError, Transport};

/// Service type used in configuration.
pub const SERVICE_TYPE: &str = "slack";

/// Public page for Slack's status history.
pub const STATUS_PAGE_URL: &str = "https://status.slack.com/";

/// Additional details about an incident.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub body: String,
}

/// A single reported incident.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Incident {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub date_updated: DateTime<Utc>,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// The document served by the Slack status API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    pub status: String,
    #[serde(default)]
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub date_updated: DateTime<Utc>,
    #[serde(default)]
    pub active_incidents: Vec<Incident>,
}

impl Details for Response {
    fn indicator(&self) -> String {
        if self.status == "active" {
            return "major".to_string();
        }
        self.status.clone()
    }

    fn name(&self) -> String {
        "Slack".to_string()
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.date_updated
    }

    fn url(&self) -> String {
        STATUS_PAGE_URL.to_string()
    }
}

/// Reader for the Slack status API.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackReader;

#[async_trait]
impl StatusReader for SlackReader {
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
