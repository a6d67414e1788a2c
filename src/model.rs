// src/model.rs
// =============================================================================
// The data that crosses the public API of the link checker.
//
// A caller hands us an ordered list of LinkCheckRequest values (one metadata
// field plus the URLs found in it) and gets back a Report: one
// FieldCheckStatus per request, in the same order.
//
// The JSON shape (camelCase keys, SCREAMING_SNAKE_CASE field names) is the
// one the surrounding REST layer speaks:
//
//   [{"fieldName": "IS_SHOWN_BY", "urls": ["http://a.test", "http://b.test"]}]
//   [{"fieldName": "IS_SHOWN_BY", "succeededCount": 1, "failedCount": 1}]
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// The metadata fields whose values are web resources worth checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldName {
    /// `edm:isShownBy` - the resource itself
    IsShownBy,
    /// `edm:isShownAt` - the resource in its context on the provider's site
    IsShownAt,
    /// `edm:object` - a thumbnail-sized representation
    Object,
    /// `edm:hasView` - additional views of the resource
    HasView,
}

impl FieldName {
    /// Every recognized field, in declaration order.
    pub const ALL: [FieldName; 4] = [
        FieldName::IsShownBy,
        FieldName::IsShownAt,
        FieldName::Object,
        FieldName::HasView,
    ];

    /// The wire name, e.g. `IS_SHOWN_BY`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::IsShownBy => "IS_SHOWN_BY",
            FieldName::IsShownAt => "IS_SHOWN_AT",
            FieldName::Object => "OBJECT",
            FieldName::HasView => "HAS_VIEW",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for FieldName {
    type Err = String;

    // Accepts the wire name in any case, with '-' or '_' separators,
    // so `is-shown-by` on the command line works too
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        FieldName::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown field '{}' (expected one of: IS_SHOWN_BY, IS_SHOWN_AT, OBJECT, HAS_VIEW)",
                    s
                )
            })
    }
}

/// One batch item: a field and the URLs extracted from it.
///
/// Fields are private so a request cannot change after it is handed to the
/// coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCheckRequest {
    field_name: FieldName,
    urls: Vec<String>,
}

impl LinkCheckRequest {
    pub fn new(field_name: FieldName, urls: Vec<String>) -> Self {
        Self { field_name, urls }
    }

    pub fn field_name(&self) -> FieldName {
        self.field_name
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

/// The tally for one request: how many of its URLs were reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCheckStatus {
    pub field_name: FieldName,
    pub succeeded_count: usize,
    pub failed_count: usize,
}

impl FieldCheckStatus {
    /// Number of URLs this status covers.
    pub fn total(&self) -> usize {
        self.succeeded_count + self.failed_count
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count == 0
    }
}

/// The batch result: one status per input request, in input order.
pub type Report = Vec<FieldCheckStatus>;
