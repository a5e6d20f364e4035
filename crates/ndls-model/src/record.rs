//! Result records for standard validity lookups.

use serde::Serialize;

use crate::status::StandardStatus;

/// A standard that replaces a superseded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Replacement standard number, e.g. `GB 18030-2022`.
    pub standard_no: String,
    /// Title of the replacement standard; empty when the title lookup
    /// did not succeed.
    pub name: String,
}

/// Result of one validity lookup.
///
/// Constructed fresh per query and discarded once rendered or written to
/// an output row; nothing is persisted between queries.
#[derive(Debug, Clone, Serialize)]
pub struct StandardRecord {
    /// The standard number that was queried.
    pub standard_no: String,
    /// Internal record id (`yf001`) at the service, when matched.
    pub service_id: Option<String>,
    /// Standard title (`a298`), when matched.
    pub name: Option<String>,
    pub status: StandardStatus,
    /// Local time of the lookup, `%Y-%m-%d %H:%M:%S`.
    pub queried_at: String,
    /// Populated only for superseded standards whose detail lookup
    /// succeeded.
    pub replacements: Vec<Replacement>,
    /// Failure reason when the service could not be asked. The record still
    /// carries status [`StandardStatus::Unknown`]; this field only feeds
    /// logging and the run's error accounting.
    pub error: Option<String>,
}

impl StandardRecord {
    /// Record for a lookup that produced no usable answer.
    #[must_use]
    pub fn unknown(
        standard_no: impl Into<String>,
        queried_at: impl Into<String>,
        error: Option<String>,
    ) -> Self {
        Self {
            standard_no: standard_no.into(),
            service_id: None,
            name: None,
            status: StandardStatus::Unknown,
            queried_at: queried_at.into(),
            replacements: Vec::new(),
            error,
        }
    }

    /// True when the lookup failed outright (as opposed to a clean
    /// not-found or an unmapped status).
    #[must_use]
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Replacement numbers, comma-joined for display and table cells.
    #[must_use]
    pub fn replacement_nos(&self) -> String {
        self.replacements
            .iter()
            .map(|r| r.standard_no.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Replacement titles, comma-joined; titles that could not be fetched
    /// are omitted.
    #[must_use]
    pub fn replacement_names(&self) -> String {
        self.replacements
            .iter()
            .map(|r| r.name.as_str())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
