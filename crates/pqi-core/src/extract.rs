//! Metric extraction from Artillery-style reports.
//!
//! The value lives at `aggregate.summaries[<metric key>][<percentile key>]`.
//! Artillery metric keys contain dots (`plugins.metrics-by-endpoint...`), so
//! each step is a single map lookup, never a dotted-path walk.

use crate::config::MetricConfig;
use crate::error::{ExtractError, PathSegment};
use serde_json::Value;

const AGGREGATE_KEY: &str = "aggregate";
const SUMMARIES_KEY: &str = "summaries";

/// Return the configured metric from a parsed report.
///
/// Steps are checked in order and the first missing one is reported.
pub fn extract_metric(document: &Value, metric: &MetricConfig) -> Result<f64, ExtractError> {
    let steps = [
        (PathSegment::Aggregate, AGGREGATE_KEY),
        (PathSegment::Summaries, SUMMARIES_KEY),
        (PathSegment::Metric, metric.key.as_str()),
        (PathSegment::Percentile, metric.percentile.as_str()),
    ];

    let mut cursor = document;
    for (segment, key) in steps {
        cursor = match cursor.as_object().and_then(|obj| obj.get(key)) {
            Some(next) => next,
            None => {
                tracing::debug!(%segment, key, "metric lookup step missing");
                return Err(ExtractError::MissingField {
                    segment,
                    key: key.to_string(),
                });
            }
        };
    }

    coerce_f64(cursor).ok_or_else(|| ExtractError::InvalidValue {
        percentile: metric.percentile.clone(),
        found: cursor.to_string(),
    })
}

/// Numbers and numeric strings are accepted; the result must be finite.
pub(crate) fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metric(key: &str) -> MetricConfig {
        MetricConfig {
            key: key.to_string(),
            percentile: "p90".to_string(),
            title: "test".to_string(),
        }
    }

    fn report(p90: Value) -> Value {
        json!({
            "aggregate": {
                "summaries": {
                    "plugins.metrics-by-endpoint.response_time./api/login": {
                        "min": 12, "p50": 80.5, "p90": p90
                    }
                }
            }
        })
    }

    #[test]
    fn test_extracts_default_metric() {
        let value = extract_metric(&report(json!(200.0)), &MetricConfig::default()).unwrap();
        assert_eq!(value, 200.0);
    }

    #[test]
    fn test_integer_and_numeric_string_are_coerced() {
        let cfg = MetricConfig::default();
        assert_eq!(extract_metric(&report(json!(215)), &cfg).unwrap(), 215.0);
        assert_eq!(
            extract_metric(&report(json!("199.5")), &cfg).unwrap(),
            199.5
        );
    }

    #[test]
    fn test_dotted_key_is_atomic() {
        let flat = json!({"aggregate": {"summaries": {"a.b": {"p90": 5}}}});
        assert_eq!(extract_metric(&flat, &metric("a.b")).unwrap(), 5.0);

        let nested = json!({"aggregate": {"summaries": {"a": {"b": {"p90": 5}}}}});
        let err = extract_metric(&nested, &metric("a.b")).unwrap_err();
        assert_eq!(err.missing_segment(), Some(PathSegment::Metric));
    }

    #[test]
    fn test_missing_aggregate() {
        let err = extract_metric(&json!({"other": {}}), &metric("a.b")).unwrap_err();
        assert_eq!(err.missing_segment(), Some(PathSegment::Aggregate));
        assert!(err.to_string().contains("'aggregate'"), "{err}");
    }

    #[test]
    fn test_missing_summaries() {
        let doc = json!({"aggregate": {"counters": {}}});
        let err = extract_metric(&doc, &metric("a.b")).unwrap_err();
        assert_eq!(err.missing_segment(), Some(PathSegment::Summaries));
        assert!(err.to_string().contains("'summaries'"), "{err}");
    }

    #[test]
    fn test_missing_metric_key() {
        let doc = json!({"aggregate": {"summaries": {"x.y": {"p90": 1}}}});
        let err = extract_metric(&doc, &metric("a.b")).unwrap_err();
        assert_eq!(err.missing_segment(), Some(PathSegment::Metric));
        assert!(err.to_string().contains("'a.b'"), "{err}");
    }

    #[test]
    fn test_missing_percentile_key() {
        let doc = json!({"aggregate": {"summaries": {"a.b": {"p95": 1}}}});
        let err = extract_metric(&doc, &metric("a.b")).unwrap_err();
        assert_eq!(err.missing_segment(), Some(PathSegment::Percentile));
        assert!(err.to_string().contains("'p90'"), "{err}");
    }

    #[test]
    fn test_non_object_parent_reports_next_segment() {
        let doc = json!({"aggregate": [1, 2, 3]});
        let err = extract_metric(&doc, &metric("a.b")).unwrap_err();
        assert_eq!(err.missing_segment(), Some(PathSegment::Summaries));

        let err = extract_metric(&json!("not an object"), &metric("a.b")).unwrap_err();
        assert_eq!(err.missing_segment(), Some(PathSegment::Aggregate));
    }

    #[test]
    fn test_invalid_values() {
        let cfg = MetricConfig::default();
        for bad in [
            json!(null),
            json!("fast"),
            json!(true),
            json!([1]),
            json!("NaN"),
        ] {
            let err = extract_metric(&report(bad.clone()), &cfg).unwrap_err();
            assert!(
                matches!(err, ExtractError::InvalidValue { .. }),
                "expected InvalidValue for {bad}"
            );
            assert!(err.to_string().contains("not a valid number"));
        }
    }
}
