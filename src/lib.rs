//! # whats-up
//!
//! An xbar plugin and library that checks third-party status pages and
//! reports the worst outage across all of them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            whats-up                              │
//! │  ┌─────────┐    ┌───────────┐    ┌──────────┐    ┌────────────┐  │
//! │  │  sites  │───▶│ aggregate │───▶│ Overview │───▶│   render   │  │
//! │  │ (config)│    │ (fan-out) │    │ (types)  │    │   (xbar)   │  │
//! │  └─────────┘    └─────┬─────┘    └──────────┘    └────────────┘  │
//! │                       │                                          │
//! │                       ▼                                          │
//! │              ┌─────────────────┐                                 │
//! │              │ ReaderRegistry  │◀── statuspage.io | slack        │
//! │              │   + Transport   │                                 │
//! │              └─────────────────┘                                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`sites`]**: the monitored sites and the JSON file they live in
//! - **[`settings`]**: layered runtime settings
//! - **[`aggregate`]**: queries every site concurrently and builds an
//!   [`Overview`]
//! - **[`render`]**: writes the overview in xbar's line format
//!
//! ## Usage
//!
//! ```bash
//! # Check the sites in ./.whats-up.json
//! whats-up
//!
//! # Use another sites file and log what happens to stderr
//! RUST_LOG=whats_up=debug whats-up --config ~/.config/whats-up.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use whats_up::{http_transport, Aggregator, ReaderRegistry, Severity, Sites};
//!
//! # tokio_test::block_on(async {
//! let sites = Sites::new();
//! let transport = http_transport(&sites).unwrap();
//! let aggregator = Aggregator::new(ReaderRegistry::builtin(), Arc::new(transport));
//!
//! let overview = aggregator.overview(&sites).await;
//! assert_eq!(overview.overall_status, Severity::None);
//! # });
//! ```

pub mod aggregate;
pub mod render;
pub mod settings;
pub mod sites;

// Re-export main types for convenience
pub use aggregate::{Aggregator, SiteOutcome};
pub use settings::Settings;
pub use sites::{http_transport, load_sites, parse_sites, Site, Sites, SitesError};
pub use whatsup_adapters::{ReaderRegistry, StatusReader, Transport};
pub use whatsup_types::{Details, ErrorCode, Overview, OverviewError, Severity, StatusError};
