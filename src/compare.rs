//! Structural ("alike") comparison contract.
//!
//! The diffing algorithm lives outside this crate. The engine only needs a
//! success flag plus an opaque report it can later hand back for formatting.

use crate::config::AlikeSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured diff produced by a [`StructuralComparator`].
///
/// Opaque to the engine: only the comparator that produced it interprets it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReport(Value);

impl DiffReport {
    pub fn new(report: Value) -> Self {
        DiffReport(report)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Result of one structural comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub success: bool,
    pub report: DiffReport,
}

impl Comparison {
    pub fn matched() -> Self {
        Comparison {
            success: true,
            report: DiffReport::default(),
        }
    }

    pub fn mismatched(report: DiffReport) -> Self {
        Comparison {
            success: false,
            report,
        }
    }
}

/// Extension point for structural matching.
pub trait StructuralComparator {
    /// Compares `actual` against `template`.
    ///
    /// `current` is the expression that produced `actual`, for use in the
    /// report.
    fn compare(
        &self,
        template: &Value,
        actual: &Value,
        current: &str,
        settings: &AlikeSettings,
    ) -> Comparison;

    /// Renders a report produced by [`compare`](Self::compare) into text
    /// fragments.
    fn format(&self, report: &DiffReport, settings: &AlikeSettings) -> Vec<String>;
}
