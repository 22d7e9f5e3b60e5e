//! # whatsup-types
//!
//! Core types shared by every part of what's-up. Provider adapters produce
//! [`Details`], the aggregator folds them into an [`Overview`], and the
//! renderer consumes the overview.
//!
//! ## Features
//!
//! - `serde`: serialization for [`Severity`] and [`ErrorCode`]
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{DateTime, Utc};
//! use whatsup_types::{Details, Overview, Severity};
//!
//! #[derive(Debug)]
//! struct Fixed(&'static str);
//!
//! impl Details for Fixed {
//!     fn indicator(&self) -> String { self.0.to_string() }
//!     fn name(&self) -> String { "Example".to_string() }
//!     fn updated_at(&self) -> DateTime<Utc> { DateTime::<Utc>::UNIX_EPOCH }
//!     fn url(&self) -> String { "https://status.example.com".to_string() }
//! }
//!
//! let mut overview = Overview::new();
//! overview.record(Arc::new(Fixed("minor")));
//! overview.record(Arc::new(Fixed("none")));
//!
//! assert_eq!(overview.overall_status, Severity::Minor);
//! assert_eq!(overview.largest_name_length, 7);
//! ```

mod details;
mod error;
mod overview;
mod severity;

pub use details::*;
pub use error::*;
pub use overview::*;
pub use severity::*;
