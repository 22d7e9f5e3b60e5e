//! The common shape every provider response is normalized into.

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::Severity;

/// Status information extracted from one service's status page.
///
/// Each provider format has its own response type implementing this trait.
/// Implementations are immutable once decoded and are shared between the
/// aggregator and the renderer as [`SharedDetails`].
pub trait Details: Send + Sync + Debug {
    /// The service's current status indicator.
    ///
    /// Normally `"major"`, `"minor"` or `"none"`, but a provider may return
    /// its own raw label. Use [`Details::severity`] to classify it.
    fn indicator(&self) -> String;

    /// Display name of the service.
    fn name(&self) -> String;

    /// When the service last updated its status.
    fn updated_at(&self) -> DateTime<Utc>;

    /// Page with more details about current and past incidents.
    fn url(&self) -> String;

    /// The indicator classified into a [`Severity`].
    fn severity(&self) -> Severity {
        Severity::from_indicator(&self.indicator())
    }
}

/// Reference-counted handle to a provider's details.
pub type SharedDetails = Arc<dyn Details>;
