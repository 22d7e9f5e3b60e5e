//! Lookup from a configured service type to the reader that handles it.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::slack::SlackReader;
use crate::statuspageio::StatuspageIoReader;
use crate::StatusReader;

/// No reader is registered for the requested service type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reader not implemented for type {0}")]
pub struct UnsupportedServiceType(pub String);

/// Table of readers keyed by their service type.
///
/// Adding a provider means registering another [`StatusReader`]; nothing
/// that consumes the registry needs to change.
///
/// # Example
///
/// ```rust
/// use whatsup_adapters::ReaderRegistry;
///
/// let registry = ReaderRegistry::builtin();
/// assert!(registry.resolve("slack").is_ok());
/// assert!(registry.resolve("pagerduty").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReaderRegistry {
    readers: HashMap<&'static str, Arc<dyn StatusReader>>,
}

impl ReaderRegistry {
    /// A registry with no readers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with every reader shipped in this crate.
    pub fn builtin() -> Self {
        Self::empty()
            .with_reader(StatuspageIoReader)
            .with_reader(SlackReader)
    }

    /// Register a reader under its service type, replacing any previous one.
    pub fn register(&mut self, reader: Arc<dyn StatusReader>) {
        self.readers.insert(reader.service_type(), reader);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_reader<R>(mut self, reader: R) -> Self
    where
        R: StatusReader + 'static,
    {
        self.register(Arc::new(reader));
        self
    }

    /// Find the reader for `service_type`.
    pub fn resolve(
        &self,
        service_type: &str,
    ) -> Result<Arc<dyn StatusReader>, UnsupportedServiceType> {
        self.readers
            .get(service_type)
            .cloned()
            .ok_or_else(|| UnsupportedServiceType(service_type.to_string()))
    }

    /// Registered service types, sorted.
    pub fn service_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.readers.keys().copied().collect();
        types.sort_unstable();
        types
    }
}
