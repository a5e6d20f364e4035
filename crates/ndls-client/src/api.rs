//! Wire types for the standard lookup API.
//!
//! The service speaks terse field names inherited from its bibliographic
//! schema: `a100` is the standard number, `a298` the title, `a000` the raw
//! status phrase, and `yf001` the internal record id used by the detail
//! endpoint.

use serde::Deserialize;

use crate::error::Result;

/// Response envelope shared by the list and detail endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// 0 on success; anything else is a service-level error.
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Payload of the search (`/api/standard/list`) endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One candidate match from a keyword search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    /// Standard number.
    #[serde(default)]
    pub a100: Option<String>,
    /// Standard title.
    #[serde(default)]
    pub a298: Option<String>,
    /// Raw status phrase.
    #[serde(default)]
    pub a000: Option<String>,
    /// Internal record id for the detail endpoint.
    #[serde(default)]
    pub yf001: Option<String>,
}

/// Payload of the detail (`/api/standard/detail/{yf001}`) endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DetailData {
    /// Replacement entries. Each is either a bare standard number or the
    /// phrase `被<number>代替`.
    #[serde(default)]
    pub a461list: Vec<String>,
}

/// Seam between the lookup orchestration and the HTTP transport.
///
/// The production implementation is [`crate::NdlsClient`]; tests supply
/// canned responses instead.
pub trait StandardApi {
    /// Search standards by keyword, returning candidate hits in service
    /// ranking order.
    fn search(&self, keyword: &str) -> Result<Vec<SearchHit>>;

    /// Fetch the full detail record for a service id.
    fn detail(&self, service_id: &str) -> Result<DetailData>;
}

impl<A: StandardApi + ?Sized> StandardApi for &A {
    fn search(&self, keyword: &str) -> Result<Vec<SearchHit>> {
        (**self).search(keyword)
    }

    fn detail(&self, service_id: &str) -> Result<DetailData> {
        (**self).detail(service_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_envelope() {
        let body = r#"{
            "code": 0,
            "message": null,
            "data": {
                "results": [
                    {"a100": "GB 2757-2012", "a298": "蒸馏酒及其配制酒", "a000": "现行", "yf001": "abc123"},
                    {"a100": "GB 2757-1981", "a000": "被代替", "yf001": "def456"}
                ]
            }
        }"#;
        let envelope: Envelope<SearchData> = serde_json::from_str(body).expect("parse");
        assert_eq!(envelope.code, 0);
        let data = envelope.data.expect("data");
        assert_eq!(data.results.len(), 2);
        assert_eq!(data.results[0].a100.as_deref(), Some("GB 2757-2012"));
        assert_eq!(data.results[1].a298, None);
    }

    #[test]
    fn parses_detail_envelope() {
        let body = r#"{"code": 0, "data": {"a461list": ["被GB 18030-2022代替"]}}"#;
        let envelope: Envelope<DetailData> = serde_json::from_str(body).expect("parse");
        assert_eq!(
            envelope.data.expect("data").a461list,
            vec!["被GB 18030-2022代替".to_string()]
        );
    }

    #[test]
    fn parses_error_envelope_without_data() {
        let body = r#"{"code": 1, "message": "访问频率过高"}"#;
        let envelope: Envelope<SearchData> = serde_json::from_str(body).expect("parse");
        assert_eq!(envelope.code, 1);
        assert!(envelope.data.is_none());
    }
}
