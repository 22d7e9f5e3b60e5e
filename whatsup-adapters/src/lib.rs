//! # whatsup-adapters
//!
//! Readers that fetch a service's status page and normalize it into
//! [`whatsup_types::Details`].
//!
//! ## Supported Formats
//!
//! - **statuspage.io** ([`statuspageio`]) - the `/api/v2/status.json` document
//!   served by Atlassian Statuspage powered pages
//! - **Slack** ([`slack`]) - the `api/v2.0.0/current` document served by
//!   status.slack.com
//!
//! Readers are looked up by their service type through a [`ReaderRegistry`]
//! and talk to the network only through a [`Transport`], so they can be
//! exercised without a network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "http")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use whatsup_adapters::{HttpTransport, ReaderRegistry};
//!
//! let transport = HttpTransport::builder()
//!     .site("CircleCI", "https://status.circleci.com".parse()?)
//!     .build()?;
//!
//! let registry = ReaderRegistry::builtin();
//! let reader = registry.resolve("statuspage.io")?;
//! let details = reader
//!     .read_status(&transport, "CircleCI", "/api/v2/status.json")
//!     .await?;
//!
//! println!("{} is {}", details.name(), details.indicator());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod reader;
pub mod registry;
pub mod slack;
pub mod statuspageio;
pub mod transport;

pub use error::{AdapterError, TransportError};
pub use reader::StatusReader;
pub use registry::{ReaderRegistry, UnsupportedServiceType};
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::{HttpTransport, HttpTransportBuilder, DEFAULT_TIMEOUT};

// Re-export types for convenience
pub use whatsup_types::{Details, SharedDetails};
