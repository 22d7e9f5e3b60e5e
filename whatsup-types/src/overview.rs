//! Overview - the aggregate result of one polling run.

use std::collections::BTreeMap;

use crate::{SharedDetails, Severity, StatusError};

/// A site that could not be classified.
#[derive(Debug, Clone)]
pub struct OverviewError {
    /// Configured name of the site.
    pub site_name: String,
    /// Configured URL of the site, used as the link for the error row.
    pub site_url: String,
    /// Whatever details the provider produced before failing, if any.
    ///
    /// Reader failures carry no partial response, so sites that fail
    /// during the aggregator's checks always leave this `None`.
    pub details: Option<SharedDetails>,
    pub error: StatusError,
}

/// Overall status across every monitored service, along with each
/// service grouped by severity.
///
/// The most severe status wins: a single major outage makes the whole
/// overview major regardless of how many sites are fine or failing.
#[derive(Debug, Clone, Default)]
pub struct Overview {
    /// Highest severity among successfully classified sites.
    pub overall_status: Severity,

    /// Longest display name among successfully classified sites, in
    /// characters. Used by renderers to align columns.
    pub largest_name_length: usize,

    /// Successfully classified sites, in arrival order within each bucket.
    pub by_severity: BTreeMap<Severity, Vec<SharedDetails>>,

    /// Sites that failed, in arrival order.
    pub errors: Vec<OverviewError>,
}

impl Overview {
    /// Create an empty overview with an overall status of `none`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a successful result and merge it into the overview.
    ///
    /// Returns the severity the details were filed under.
    pub fn record(&mut self, details: SharedDetails) -> Severity {
        let severity = details.severity();

        // Unrecognized indicators land in the none bucket and never lower
        // the overall status.
        if severity > self.overall_status {
            self.overall_status = severity;
        }

        self.largest_name_length = self
            .largest_name_length
            .max(details.name().chars().count());

        self.by_severity.entry(severity).or_default().push(details);
        severity
    }

    /// Record a failed site. Errors never affect the overall status.
    pub fn record_error(&mut self, error: OverviewError) {
        self.errors.push(error);
    }

    /// Details filed under the given severity.
    pub fn bucket(&self, severity: Severity) -> &[SharedDetails] {
        self.by_severity
            .get(&severity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of successfully classified sites.
    pub fn classified(&self) -> usize {
        self.by_severity.values().map(Vec::len).sum()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.classified() == 0 && self.errors.is_empty()
    }

    /// Check if any site failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
