//! Lookup orchestration: single and batch queries.
//!
//! A query never fails outwardly. Network errors, service errors, and
//! malformed bodies all fold into a record with status 未知 so that one bad
//! identifier cannot abort a batch or spreadsheet run.

use std::thread;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, warn};

use ndls_model::{Replacement, StandardRecord, StandardStatus};

use crate::api::{SearchHit, StandardApi};

/// Default pause between successive service calls.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Orchestrates lookups against any [`StandardApi`] implementation.
pub struct Checker<A> {
    api: A,
    delay: Duration,
}

impl<A: StandardApi> Checker<A> {
    /// Checker with the default inter-call delay.
    pub fn new(api: A) -> Self {
        Self::with_delay(api, DEFAULT_DELAY)
    }

    /// Checker with an explicit inter-call delay.
    pub fn with_delay(api: A, delay: Duration) -> Self {
        Self { api, delay }
    }

    /// Look up the validity of one standard number.
    ///
    /// Worst case this issues one search call, one detail call, and one
    /// title-search call per replacement. Failures of the secondary calls
    /// are non-fatal and leave replacement data partial or empty.
    pub fn query_single(&self, standard_no: &str) -> StandardRecord {
        let queried_at = timestamp();
        let standard_no = standard_no.trim();
        if standard_no.is_empty() {
            return StandardRecord::unknown(
                standard_no,
                queried_at,
                Some("empty standard number".to_string()),
            );
        }

        let hits = match self.api.search(standard_no) {
            Ok(hits) => hits,
            Err(error) => {
                warn!(standard_no, %error, "search failed");
                return StandardRecord::unknown(standard_no, queried_at, Some(error.to_string()));
            }
        };
        let Some(hit) = best_match(standard_no, &hits) else {
            debug!(standard_no, "no search results");
            return StandardRecord::unknown(standard_no, queried_at, None);
        };

        let raw_status = hit.a000.as_deref().unwrap_or_default();
        let status = StandardStatus::from_raw(raw_status);
        if status == StandardStatus::Unknown && !raw_status.is_empty() {
            debug!(standard_no, raw_status, "unmapped status value");
        }

        let mut replacements = Vec::new();
        if status.is_superseded() {
            if let Some(service_id) = hit.yf001.as_deref().filter(|id| !id.is_empty()) {
                replacements = self.fetch_replacements(service_id);
            }
        }

        StandardRecord {
            standard_no: standard_no.to_string(),
            service_id: hit.yf001.clone(),
            name: hit.a298.clone(),
            status,
            queried_at,
            replacements,
            error: None,
        }
    }

    /// Query a sequence of standard numbers in order.
    ///
    /// Output is positionally aligned with the input, including the empty
    /// input. The configured delay is slept between successive calls.
    pub fn query_batch(&self, standard_nos: &[String]) -> Vec<StandardRecord> {
        self.query_batch_with(standard_nos, |_, _| {})
    }

    /// [`Self::query_batch`] with a per-record observer for progress
    /// reporting.
    pub fn query_batch_with<F>(&self, standard_nos: &[String], mut observer: F) -> Vec<StandardRecord>
    where
        F: FnMut(usize, &StandardRecord),
    {
        let mut records = Vec::with_capacity(standard_nos.len());
        for (index, standard_no) in standard_nos.iter().enumerate() {
            if index > 0 {
                thread::sleep(self.delay);
            }
            let record = self.query_single(standard_no);
            observer(index, &record);
            records.push(record);
        }
        records
    }

    /// Replacement numbers from the detail record, each with a best-effort
    /// title from one extra search call.
    fn fetch_replacements(&self, service_id: &str) -> Vec<Replacement> {
        let detail = match self.api.detail(service_id) {
            Ok(detail) => detail,
            Err(error) => {
                warn!(service_id, %error, "detail lookup failed");
                return Vec::new();
            }
        };

        let mut replacements = Vec::new();
        for entry in &detail.a461list {
            let standard_no = extract_replacement_no(entry);
            if standard_no.is_empty() {
                continue;
            }
            thread::sleep(self.delay / 2);
            let name = match self.api.search(&standard_no) {
                Ok(hits) => best_match(&standard_no, &hits)
                    .and_then(|hit| hit.a298.clone())
                    .unwrap_or_default(),
                Err(error) => {
                    debug!(replacement = standard_no, %error, "title lookup failed");
                    String::new()
                }
            };
            replacements.push(Replacement { standard_no, name });
        }
        replacements
    }
}

/// Exact match on the normalized number wins; otherwise the first hit in
/// service ranking order.
fn best_match<'a>(standard_no: &str, hits: &'a [SearchHit]) -> Option<&'a SearchHit> {
    let wanted = normalize(standard_no);
    hits.iter()
        .find(|hit| {
            hit.a100
                .as_deref()
                .is_some_and(|no| normalize(no) == wanted)
        })
        .or_else(|| hits.first())
}

/// Collapse interior whitespace and uppercase, so `gb  2757-2012` matches
/// `GB 2757-2012`.
fn normalize(standard_no: &str) -> String {
    standard_no
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// `a461list` entries are either bare numbers or `被<number>代替`.
fn extract_replacement_no(entry: &str) -> String {
    let entry = entry.trim();
    entry
        .strip_prefix('被')
        .and_then(|rest| rest.strip_suffix("代替"))
        .unwrap_or(entry)
        .trim()
        .to_string()
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
