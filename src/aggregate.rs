//! Concurrent collection of every site's status into one [`Overview`].
//!
//! ```text
//!            ┌──▶ task(site A) ──┐
//! Sites ─────┼──▶ task(site B) ──┼──▶ mpsc ──▶ collector ──▶ Overview
//!            └──▶ task(site C) ──┘
//! ```
//!
//! Each task resolves its reader, queries the site and sends back exactly
//! one [`SiteOutcome`]. Only the collector touches the overview, so no
//! locking is needed and a failing site never affects its siblings.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use whatsup_adapters::{AdapterError, ReaderRegistry, Transport};
use whatsup_types::{ErrorCode, Overview, OverviewError, SharedDetails, StatusError};

use crate::sites::{Site, Sites};

/// Result of checking a single site.
#[derive(Debug)]
pub enum SiteOutcome {
    Classified(SharedDetails),
    Failed(OverviewError),
}

/// Builds overviews by querying every configured site in parallel.
#[derive(Clone)]
pub struct Aggregator {
    registry: Arc<ReaderRegistry>,
    transport: Arc<dyn Transport>,
    max_in_flight: Option<usize>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("registry", &self.registry)
            .field("max_in_flight", &self.max_in_flight)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Create an aggregator that dispatches through `registry` and reaches
    /// the network through `transport`.
    pub fn new(registry: ReaderRegistry, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry: Arc::new(registry),
            transport,
            max_in_flight: None,
        }
    }

    /// Limit how many sites are queried at once (minimum 1).
    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = Some(limit.max(1));
        self
    }

    /// Query every site and merge the results.
    ///
    /// Waits for one outcome per site; there is no early exit. Per-site
    /// failures are recorded in [`Overview::errors`], never returned.
    pub async fn overview(&self, sites: &Sites) -> Overview {
        let mut overview = Overview::new();
        if sites.is_empty() {
            return overview;
        }

        let (tx, mut rx) = mpsc::channel(sites.len());
        let limiter = self.max_in_flight.map(|n| Arc::new(Semaphore::new(n)));

        let mut tasks: Vec<(String, String, JoinHandle<()>)> = Vec::with_capacity(sites.len());
        for (name, site) in sites {
            let tx = tx.clone();
            let registry = Arc::clone(&self.registry);
            let transport = Arc::clone(&self.transport);
            let limiter = limiter.clone();
            let task_name = name.clone();
            let task_site = site.clone();

            debug!(site = %name, service_type = %site.service_type, "dispatching");

            let handle = tokio::spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };
                let outcome =
                    check_site(&registry, transport.as_ref(), &task_name, &task_site).await;
                // The collector only stops receiving once every sender is gone.
                let _ = tx.send(outcome).await;
            });

            tasks.push((name.clone(), site.url.to_string(), handle));
        }
        drop(tx);

        while let Some(outcome) = rx.recv().await {
            merge(&mut overview, outcome);
        }

        // A task that panicked dropped its sender without reporting.
        for (name, url, handle) in tasks {
            if let Err(e) = handle.await {
                warn!(site = %name, error = %e, "status check aborted");
                let error = StatusError::new(
                    ErrorCode::RequestFailed,
                    format!("status check for {} aborted: {}", name, e),
                );
                overview.record_error(OverviewError {
                    site_name: name,
                    site_url: url,
                    details: None,
                    error,
                });
            }
        }

        info!(
            overall = %overview.overall_status,
            classified = overview.classified(),
            errors = overview.errors.len(),
            "overview complete"
        );

        overview
    }
}

/// Resolve the site's reader and query it.
pub async fn check_site(
    registry: &ReaderRegistry,
    transport: &dyn Transport,
    name: &str,
    site: &Site,
) -> SiteOutcome {
    let reader = match registry.resolve(&site.service_type) {
        Ok(reader) => reader,
        Err(e) => {
            let message = format!(
                "{} uses an unsupported service type {}",
                name, site.service_type
            );
            return SiteOutcome::Failed(OverviewError {
                site_name: name.to_string(),
                site_url: site.url.to_string(),
                details: None,
                error: StatusError::new(ErrorCode::UnsupportedServiceType, message).with_cause(e),
            });
        }
    };

    match reader.read_status(transport, name, site.path()).await {
        Ok(details) => SiteOutcome::Classified(details),
        Err(e) => SiteOutcome::Failed(OverviewError {
            site_name: name.to_string(),
            site_url: site.url.to_string(),
            details: None,
            error: adapter_error(e),
        }),
    }
}

fn adapter_error(err: AdapterError) -> StatusError {
    let code = match &err {
        AdapterError::RequestFailed { .. } => ErrorCode::RequestFailed,
        AdapterError::DecodeFailed { .. } => ErrorCode::DecodeFailed,
    };
    StatusError::new(code, err.to_string()).with_cause(err)
}

fn merge(overview: &mut Overview, outcome: SiteOutcome) {
    match outcome {
        SiteOutcome::Classified(details) => {
            let severity = overview.record(details);
            debug!(%severity, "site classified");
        }
        SiteOutcome::Failed(error) => {
            warn!(site = %error.site_name, error = %error.error, "site check failed");
            overview.record_error(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashMap};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use whatsup_adapters::{StatusReader, TransportError};
    use whatsup_types::Severity;

    /// Serves a statuspage.io document per site, or fails the request.
    #[derive(Debug, Default)]
    struct FakeTransport {
        pages: HashMap<String, Option<String>>,
        barrier: Option<Barrier>,
    }

    impl FakeTransport {
        fn page(mut self, site: &str, indicator: &str) -> Self {
            let body = format!(
                r#"{{"page":{{"name":"{}","url":"https://status.{}.test"}},"status":{{"indicator":"{}"}}}}"#,
                site,
                site.to_lowercase(),
                indicator
            );
            self.pages.insert(site.to_string(), Some(body));
            self
        }

        fn raw(mut self, site: &str, body: &str) -> Self {
            self.pages.insert(site.to_string(), Some(body.to_string()));
            self
        }

        fn failing(mut self, site: &str) -> Self {
            self.pages.insert(site.to_string(), None);
            self
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, site_name: &str, _path: &str) -> Result<Vec<u8>, TransportError> {
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            match self.pages.get(site_name) {
                Some(Some(body)) => Ok(body.clone().into_bytes()),
                Some(None) => Err(TransportError::Status(503)),
                None => Err(TransportError::UnknownSite(site_name.to_string())),
            }
        }
    }

    #[derive(Debug)]
    struct PanickingReader;

    #[async_trait]
    impl StatusReader for PanickingReader {
        fn service_type(&self) -> &'static str {
            "explosive"
        }

        async fn read_status(
            &self,
            _transport: &dyn Transport,
            _site_name: &str,
            _path: &str,
        ) -> Result<SharedDetails, AdapterError> {
            panic!("reader blew up");
        }
    }

    fn site(service_type: &str) -> Site {
        Site {
            url: "https://status.example.test/api/v2/status.json".parse().unwrap(),
            service_type: service_type.to_string(),
            slug: None,
        }
    }

    fn sites(entries: &[(&str, &str)]) -> Sites {
        entries
            .iter()
            .map(|(name, service_type)| (name.to_string(), site(service_type)))
            .collect()
    }

    fn aggregator(transport: FakeTransport) -> Aggregator {
        Aggregator::new(ReaderRegistry::builtin(), Arc::new(transport))
    }

    fn names(overview: &Overview, severity: Severity) -> BTreeSet<String> {
        overview.bucket(severity).iter().map(|d| d.name()).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_no_sites() {
        let overview = aggregator(FakeTransport::default())
            .overview(&Sites::new())
            .await;

        assert_eq!(overview.overall_status, Severity::None);
        assert!(overview.is_empty());
        assert_eq!(overview.largest_name_length, 0);
    }

    #[tokio::test]
    async fn test_major_and_minor() {
        let transport = FakeTransport::default()
            .page("A", "major")
            .page("B", "minor");
        let overview = aggregator(transport)
            .overview(&sites(&[("A", "statuspage.io"), ("B", "statuspage.io")]))
            .await;

        assert_eq!(overview.overall_status, Severity::Major);
        assert_eq!(names(&overview, Severity::Major), set(&["A"]));
        assert_eq!(names(&overview, Severity::Minor), set(&["B"]));
        assert!(overview.bucket(Severity::None).is_empty());
        assert!(overview.errors.is_empty());
    }

    #[tokio::test]
    async fn test_minor_and_none() {
        let transport = FakeTransport::default()
            .page("A", "minor")
            .page("B", "none");
        let overview = aggregator(transport)
            .overview(&sites(&[("A", "statuspage.io"), ("B", "statuspage.io")]))
            .await;

        assert_eq!(overview.overall_status, Severity::Minor);
        assert_eq!(names(&overview, Severity::None), set(&["B"]));
    }

    #[tokio::test]
    async fn test_unsupported_service_type() {
        let overview = aggregator(FakeTransport::default())
            .overview(&sites(&[("A", "pagerduty")]))
            .await;

        assert_eq!(overview.overall_status, Severity::None);
        assert_eq!(overview.classified(), 0);
        assert_eq!(overview.errors.len(), 1);

        let error = &overview.errors[0];
        assert_eq!(error.site_name, "A");
        assert!(error.details.is_none());
        assert_eq!(error.error.code, ErrorCode::UnsupportedServiceType);
        assert_eq!(error.error.message, "A uses an unsupported service type pagerduty");
        assert!(error.error.cause.is_some());
    }

    #[tokio::test]
    async fn test_request_failure_is_isolated() {
        let transport = FakeTransport::default().page("A", "none").failing("B");
        let overview = aggregator(transport)
            .overview(&sites(&[("A", "statuspage.io"), ("B", "statuspage.io")]))
            .await;

        assert_eq!(overview.overall_status, Severity::None);
        assert_eq!(names(&overview, Severity::None), set(&["A"]));
        assert_eq!(overview.errors.len(), 1);
        assert_eq!(overview.errors[0].site_name, "B");
        assert_eq!(overview.errors[0].error.code, ErrorCode::RequestFailed);
        assert!(overview.errors[0]
            .error
            .message
            .contains("unable to make client request for B"));
        assert!(overview.errors[0].details.is_none());
    }

    #[tokio::test]
    async fn test_decode_failure() {
        let transport = FakeTransport::default()
            .page("A", "minor")
            .raw("B", "<html>down for maintenance</html>");
        let overview = aggregator(transport)
            .overview(&sites(&[("A", "statuspage.io"), ("B", "statuspage.io")]))
            .await;

        assert_eq!(overview.overall_status, Severity::Minor);
        assert_eq!(overview.errors.len(), 1);
        assert_eq!(overview.errors[0].error.code, ErrorCode::DecodeFailed);
        assert!(overview.errors[0].details.is_none());
    }

    #[tokio::test]
    async fn test_mixed_providers() {
        let transport = FakeTransport::default()
            .page("CodeClimate", "minor")
            .page("CircleCI", "major")
            .raw("Slack", r#"{"status":"ok"}"#);
        let overview = aggregator(transport)
            .overview(&sites(&[
                ("CodeClimate", "statuspage.io"),
                ("CircleCI", "statuspage.io"),
                ("Slack", "slack"),
            ]))
            .await;

        assert_eq!(overview.overall_status, Severity::Major);
        assert_eq!(names(&overview, Severity::Major), set(&["CircleCI"]));
        assert_eq!(names(&overview, Severity::Minor), set(&["CodeClimate"]));
        assert_eq!(names(&overview, Severity::None), set(&["Slack"]));
        assert_eq!(overview.largest_name_length, 11);
    }

    #[tokio::test]
    async fn test_slack_active_incident_is_major() {
        let transport = FakeTransport::default()
            .page("GitHub", "minor")
            .raw("Slack", r#"{"status":"active"}"#);
        let overview = aggregator(transport)
            .overview(&sites(&[("GitHub", "statuspage.io"), ("Slack", "slack")]))
            .await;

        assert_eq!(overview.overall_status, Severity::Major);
        assert_eq!(names(&overview, Severity::Major), set(&["Slack"]));
    }

    #[tokio::test]
    async fn test_name_length_ignores_errors() {
        let transport = FakeTransport::default()
            .page("Git", "none")
            .failing("An Extremely Long Site Name");
        let overview = aggregator(transport)
            .overview(&sites(&[
                ("Git", "statuspage.io"),
                ("An Extremely Long Site Name", "statuspage.io"),
                ("Another Long Unsupported Site", "carrier-pigeon"),
            ]))
            .await;

        assert_eq!(overview.largest_name_length, 3);
        assert_eq!(overview.errors.len(), 2);
    }

    #[tokio::test]
    async fn test_all_errors() {
        let transport = FakeTransport::default().failing("A").failing("B");
        let overview = aggregator(transport)
            .overview(&sites(&[("A", "statuspage.io"), ("B", "statuspage.io")]))
            .await;

        assert_eq!(overview.overall_status, Severity::None);
        assert_eq!(overview.largest_name_length, 0);
        assert_eq!(overview.errors.len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_runs_agree() {
        let transport = FakeTransport::default()
            .page("A", "none")
            .page("B", "minor")
            .page("C", "major")
            .page("D", "minor")
            .failing("E");
        let aggregator = aggregator(transport);
        let sites = sites(&[
            ("A", "statuspage.io"),
            ("B", "statuspage.io"),
            ("C", "statuspage.io"),
            ("D", "statuspage.io"),
            ("E", "statuspage.io"),
        ]);

        let first = aggregator.overview(&sites).await;
        for _ in 0..5 {
            let next = aggregator.overview(&sites).await;
            assert_eq!(next.overall_status, first.overall_status);
            for severity in Severity::DESCENDING {
                assert_eq!(names(&next, severity), names(&first, severity));
            }
            assert_eq!(next.errors.len(), first.errors.len());
        }
        assert_eq!(first.overall_status, Severity::Major);
        assert_eq!(names(&first, Severity::Minor), set(&["B", "D"]));
    }

    #[tokio::test]
    async fn test_sites_are_queried_concurrently() {
        let site_names = ["A", "B", "C", "D"];
        let mut transport = FakeTransport {
            barrier: Some(Barrier::new(site_names.len())),
            ..Default::default()
        };
        for name in site_names {
            transport = transport.page(name, "none");
        }
        let sites: Sites = site_names
            .iter()
            .map(|name| (name.to_string(), site("statuspage.io")))
            .collect();

        // Every request blocks until all of them are in flight.
        let overview = tokio::time::timeout(
            Duration::from_secs(5),
            aggregator(transport).overview(&sites),
        )
        .await
        .expect("requests were not issued concurrently");

        assert_eq!(overview.bucket(Severity::None).len(), 4);
    }

    #[tokio::test]
    async fn test_max_in_flight_still_reports_every_site() {
        let transport = FakeTransport::default()
            .page("A", "minor")
            .page("B", "none")
            .failing("C");
        let overview = aggregator(transport)
            .with_max_in_flight(1)
            .overview(&sites(&[
                ("A", "statuspage.io"),
                ("B", "statuspage.io"),
                ("C", "statuspage.io"),
            ]))
            .await;

        assert_eq!(overview.overall_status, Severity::Minor);
        assert_eq!(overview.classified(), 2);
        assert_eq!(overview.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_panicking_reader_is_reported() {
        let registry = ReaderRegistry::builtin().with_reader(PanickingReader);
        let transport = FakeTransport::default().page("A", "major");
        let aggregator = Aggregator::new(registry, Arc::new(transport));

        let overview = aggregator
            .overview(&sites(&[("A", "statuspage.io"), ("Boom", "explosive")]))
            .await;

        assert_eq!(overview.overall_status, Severity::Major);
        assert_eq!(overview.errors.len(), 1);
        assert_eq!(overview.errors[0].site_name, "Boom");
        assert_eq!(overview.errors[0].error.code, ErrorCode::RequestFailed);
    }

    #[tokio::test]
    async fn test_check_site_uses_slug() {
        #[derive(Debug)]
        struct PathEcho;

        #[async_trait]
        impl Transport for PathEcho {
            async fn get(&self, _site: &str, path: &str) -> Result<Vec<u8>, TransportError> {
                Ok(format!(r#"{{"status":"{}"}}"#, path).into_bytes())
            }
        }

        let mut slack = site("slack");
        slack.slug = Some("/api/v2.0.0/current".to_string());

        let outcome = check_site(&ReaderRegistry::builtin(), &PathEcho, "Slack", &slack).await;
        match outcome {
            SiteOutcome::Classified(details) => {
                assert_eq!(details.indicator(), "/api/v2.0.0/current")
            }
            SiteOutcome::Failed(e) => panic!("unexpected failure: {}", e.error),
        }
    }
}
