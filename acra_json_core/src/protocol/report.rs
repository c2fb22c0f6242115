/**
 * The assembled crash report handed to a sender.
 *
 * The host framework fills a `CrashReportData` with whatever it managed to
 * collect; fields it could not collect are either missing or hold the
 * `NULL_VALUE` sentinel. Senders only read from it.
 */
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::constants::NULL_VALUE;
use super::fields::ReportField;

/**
 * Mapping from report field to its collected string value.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrashReportData {
    values: HashMap<ReportField, String>,
}

impl CrashReportData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `field`, returning the previous value if any.
    pub fn put(&mut self, field: ReportField, value: impl Into<String>) -> Option<String> {
        self.values.insert(field, value.into())
    }

    /**
     * Returns the value collected for `field`.
     *
     * `None` when the field is missing *or* holds the null sentinel, so
     * callers never see `"N/A"` as if it were real data.
     */
    pub fn get(&self, field: ReportField) -> Option<&str> {
        self.values
            .get(&field)
            .map(String::as_str)
            .filter(|value| *value != NULL_VALUE)
    }

    /// Raw stored value, sentinel included.
    pub fn get_raw(&self, field: ReportField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: Into<String>> FromIterator<(ReportField, V)> for CrashReportData {
    fn from_iter<I: IntoIterator<Item = (ReportField, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(field, value)| (field, value.into()))
                .collect(),
        }
    }
}

/// `true` for a missing value or the `NULL_VALUE` sentinel.
pub fn is_null(value: Option<&str>) -> bool {
    matches!(value, None | Some(NULL_VALUE))
}
