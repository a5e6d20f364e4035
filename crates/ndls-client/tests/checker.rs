//! Integration tests for the lookup orchestration, driven by a stub API.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use ndls_client::{Checker, ClientError, DetailData, Result, SearchHit, StandardApi};
use ndls_model::StandardStatus;

#[derive(Default)]
struct StubApi {
    search_results: HashMap<String, Vec<SearchHit>>,
    details: HashMap<String, Vec<String>>,
    fail_search: Vec<String>,
    fail_detail: bool,
    calls: RefCell<Vec<String>>,
}

impl StubApi {
    fn with_hit(mut self, keyword: &str, hit: SearchHit) -> Self {
        self.search_results
            .entry(keyword.to_string())
            .or_default()
            .push(hit);
        self
    }

    fn with_detail(mut self, service_id: &str, entries: &[&str]) -> Self {
        self.details.insert(
            service_id.to_string(),
            entries.iter().map(|e| (*e).to_string()).collect(),
        );
        self
    }

    fn failing_search(mut self, keyword: &str) -> Self {
        self.fail_search.push(keyword.to_string());
        self
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

fn hit(no: &str, name: &str, status: &str, service_id: &str) -> SearchHit {
    SearchHit {
        a100: Some(no.to_string()),
        a298: Some(name.to_string()),
        a000: Some(status.to_string()),
        yf001: Some(service_id.to_string()),
    }
}

impl StandardApi for StubApi {
    fn search(&self, keyword: &str) -> Result<Vec<SearchHit>> {
        self.calls.borrow_mut().push(format!("search:{keyword}"));
        if self.fail_search.iter().any(|k| k == keyword) {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        Ok(self.search_results.get(keyword).cloned().unwrap_or_default())
    }

    fn detail(&self, service_id: &str) -> Result<DetailData> {
        self.calls.borrow_mut().push(format!("detail:{service_id}"));
        if self.fail_detail {
            return Err(ClientError::Http { status: 500 });
        }
        Ok(DetailData {
            a461list: self.details.get(service_id).cloned().unwrap_or_default(),
        })
    }
}

fn checker(api: &StubApi) -> Checker<&StubApi> {
    Checker::with_delay(api, Duration::ZERO)
}

#[test]
fn active_standard_maps_to_valid_label() {
    let api = StubApi::default().with_hit(
        "GB 2757-2012",
        hit("GB 2757-2012", "蒸馏酒及其配制酒", "现行", "yf-1"),
    );
    let record = checker(&api).query_single("GB 2757-2012");

    assert_eq!(record.status, StandardStatus::Active);
    assert_eq!(record.status.label(), "现行有效");
    assert_eq!(record.name.as_deref(), Some("蒸馏酒及其配制酒"));
    assert!(record.replacements.is_empty());
    assert!(!record.failed());
    // No detail call for an active standard.
    assert_eq!(api.call_count(), 1);
}

#[test]
fn not_found_yields_unknown_without_error() {
    let api = StubApi::default();
    let record = checker(&api).query_single("GB 0000-0000");

    assert_eq!(record.status, StandardStatus::Unknown);
    assert!(record.replacements.is_empty());
    assert!(!record.failed());
}

#[test]
fn search_failure_yields_unknown_with_error() {
    let api = StubApi::default().failing_search("GB 2757-2012");
    let record = checker(&api).query_single("GB 2757-2012");

    assert_eq!(record.status, StandardStatus::Unknown);
    assert!(record.failed());
    assert!(record.error.as_deref().unwrap().contains("network error"));
}

#[test]
fn superseded_fetches_replacements() {
    let api = StubApi::default()
        .with_hit(
            "GB 18030-2000",
            hit("GB 18030-2000", "信息技术 信息交换用汉字编码", "被代替", "yf-old"),
        )
        .with_detail("yf-old", &["被GB 18030-2022代替"])
        .with_hit(
            "GB 18030-2022",
            hit("GB 18030-2022", "信息技术 中文编码字符集", "现行", "yf-new"),
        );
    let record = checker(&api).query_single("GB 18030-2000");

    assert_eq!(record.status, StandardStatus::Superseded);
    assert_eq!(record.status.label(), "已被代替");
    assert_eq!(record.replacements.len(), 1);
    assert_eq!(record.replacements[0].standard_no, "GB 18030-2022");
    assert_eq!(record.replacements[0].name, "信息技术 中文编码字符集");
}

#[test]
fn detail_failure_is_non_fatal() {
    let mut api = StubApi::default().with_hit(
        "GB 18030-2000",
        hit("GB 18030-2000", "信息技术", "被代替", "yf-old"),
    );
    api.fail_detail = true;
    let record = checker(&api).query_single("GB 18030-2000");

    // Status survives; only the replacement fields stay empty.
    assert_eq!(record.status, StandardStatus::Superseded);
    assert!(record.replacements.is_empty());
    assert!(!record.failed());
}

#[test]
fn replacement_title_failure_keeps_the_number() {
    let api = StubApi::default()
        .with_hit("GB 9999-1988", hit("GB 9999-1988", "旧标准", "被代替", "yf-old"))
        .with_detail("yf-old", &["GB 9999-2020"])
        .failing_search("GB 9999-2020");
    let record = checker(&api).query_single("GB 9999-1988");

    assert_eq!(record.replacements.len(), 1);
    assert_eq!(record.replacements[0].standard_no, "GB 9999-2020");
    assert_eq!(record.replacements[0].name, "");
    assert_eq!(record.replacement_nos(), "GB 9999-2020");
    assert_eq!(record.replacement_names(), "");
}

#[test]
fn empty_standard_no_short_circuits() {
    let api = StubApi::default();
    let record = checker(&api).query_single("   ");

    assert_eq!(record.status, StandardStatus::Unknown);
    assert!(record.failed());
    assert_eq!(api.call_count(), 0);
}

#[test]
fn batch_output_is_positionally_aligned() {
    let api = StubApi::default()
        .with_hit("GB 2757-2012", hit("GB 2757-2012", "蒸馏酒", "现行", "yf-1"))
        .failing_search("GB 1-1");
    let inputs = vec![
        "GB 2757-2012".to_string(),
        "GB 1-1".to_string(),
        "GB 0000-0000".to_string(),
    ];
    let records = checker(&api).query_batch(&inputs);

    assert_eq!(records.len(), inputs.len());
    assert_eq!(records[0].standard_no, "GB 2757-2012");
    assert_eq!(records[0].status, StandardStatus::Active);
    assert_eq!(records[1].standard_no, "GB 1-1");
    assert!(records[1].failed());
    assert_eq!(records[2].standard_no, "GB 0000-0000");
    assert_eq!(records[2].status, StandardStatus::Unknown);
    assert!(!records[2].failed());
}

#[test]
fn batch_of_empty_input_is_empty() {
    let api = StubApi::default();
    let records = checker(&api).query_batch(&[]);
    assert!(records.is_empty());
}

#[test]
fn batch_observer_sees_every_record_in_order() {
    let api = StubApi::default();
    let inputs = vec!["GB 1-1".to_string(), "GB 2-2".to_string()];
    let mut seen = Vec::new();
    let records = checker(&api).query_batch_with(&inputs, |index, record| {
        seen.push((index, record.standard_no.clone()));
    });

    assert_eq!(records.len(), 2);
    assert_eq!(
        seen,
        vec![(0, "GB 1-1".to_string()), (1, "GB 2-2".to_string())]
    );
}
