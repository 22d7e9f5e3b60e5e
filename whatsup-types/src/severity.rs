//! Severity ranking for status indicators.

use core::fmt;

/// Normalized severity of a service's reported status.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `None < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Operational, or any indicator we do not recognize.
    #[default]
    None,
    Minor,
    Major,
}

impl Severity {
    /// All severities, most severe first. This is the display order.
    pub const DESCENDING: [Severity; 3] = [Severity::Major, Severity::Minor, Severity::None];

    /// Classify a raw indicator string.
    ///
    /// Only the exact labels `"major"` and `"minor"` raise the severity;
    /// every other value, including `"none"` and provider-specific labels,
    /// maps to [`Severity::None`].
    pub fn from_indicator(indicator: &str) -> Self {
        match indicator {
            "major" => Severity::Major,
            "minor" => Severity::Minor,
            _ => Severity::None,
        }
    }

    /// The lowercase label used in configuration and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Minor => "minor",
            Severity::Major => "major",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
