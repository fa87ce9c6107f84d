//! Request and response bodies of the `POST /calculate` contract.
//!
//! Field names follow the calculation service exactly; the Rust side uses
//! descriptive names and maps them with `serde(rename)`.

use chrono::NaiveDate;
use dca_utils::dates;
use serde::{Deserialize, Serialize};

use crate::{
    anchor::AnchorPoint, decline::DeclineType, error::ForecastError, series::ProductionSeries,
};

/// Body sent to the calculation service.
///
/// A non-finite `qf` serializes as JSON `null`, leaving it to the service
/// to reject an unusable cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub t1: usize,
    pub q1: f64,
    pub t2: usize,
    pub q2: f64,
    pub original_q: Vec<f64>,
    pub decline_type: DeclineType,
    pub start_date: String,
    pub qf: f64,
}

impl ForecastRequest {
    /// Build the request from the series and the two anchors, first picked
    /// becoming `t1/q1`. No chronological ordering is imposed.
    pub fn build(
        series: &ProductionSeries,
        first: &AnchorPoint,
        second: &AnchorPoint,
        decline_type: DeclineType,
        cutoff: f64,
    ) -> Result<Self, ForecastError> {
        for anchor in [first, second] {
            if !anchor.is_valid_for(series) {
                return Err(ForecastError::AnchorOutOfRange {
                    index: anchor.index,
                    len: series.len(),
                });
            }
        }
        Ok(ForecastRequest {
            t1: first.index,
            q1: first.value,
            t2: second.index,
            q2: second.value,
            original_q: series.flow_rates().to_vec(),
            decline_type,
            start_date: dates::format_date(&series.first_date()),
            qf: cutoff,
        })
    }
}

/// One forecast sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "q")]
    pub rate: f64,
}

/// Successful calculation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Cumulative production over the historical window (Np observed).
    #[serde(rename = "Np_observed")]
    pub observed_volume: f64,
    /// Volume produced from the end of history to the economic limit.
    #[serde(rename = "Np_extrapolated")]
    pub extrapolated_volume: f64,
    /// EUR: observed plus extrapolated.
    #[serde(rename = "Np_total")]
    pub total_volume: f64,
    pub curve: Vec<CurvePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_series() -> ProductionSeries {
        ProductionSeries::from_points(vec![
            (NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), 100.0),
            (NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(), 90.0),
            (NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), 81.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_request() {
        let series = scenario_series();
        let first = AnchorPoint { index: 0, value: 100.0 };
        let second = AnchorPoint { index: 2, value: 81.0 };
        let request =
            ForecastRequest::build(&series, &first, &second, DeclineType::Hyperbolic, 5.0)
                .unwrap();
        assert_eq!(request.t1, 0);
        assert_eq!(request.q1, 100.0);
        assert_eq!(request.t2, 2);
        assert_eq!(request.q2, 81.0);
        assert_eq!(request.original_q, vec![100.0, 90.0, 81.0]);
        assert_eq!(request.start_date, "2023-01-01");

        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["decline_type"], "hyperbolic");
        assert_eq!(json["qf"], 5.0);
    }

    #[test]
    fn test_build_request_is_deterministic() {
        let series = scenario_series();
        let first = AnchorPoint { index: 2, value: 81.0 };
        let second = AnchorPoint { index: 0, value: 100.0 };
        let a = ForecastRequest::build(&series, &first, &second, DeclineType::Harmonic, 2.5)
            .unwrap();
        let b = ForecastRequest::build(&series, &first, &second, DeclineType::Harmonic, 2.5)
            .unwrap();
        assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
        // reversed anchors are forwarded as picked
        assert_eq!(a.t1, 2);
        assert_eq!(a.t2, 0);
    }

    #[test]
    fn test_build_request_rejects_stale_anchor() {
        let series = scenario_series();
        let first = AnchorPoint { index: 0, value: 100.0 };
        let stale = AnchorPoint { index: 7, value: 1.0 };
        assert_eq!(
            ForecastRequest::build(&series, &first, &stale, DeclineType::Exponential, 5.0),
            Err(ForecastError::AnchorOutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn test_non_numeric_cutoff_is_sent_as_null() {
        let series = scenario_series();
        let first = AnchorPoint { index: 0, value: 100.0 };
        let second = AnchorPoint { index: 1, value: 90.0 };
        let request =
            ForecastRequest::build(&series, &first, &second, DeclineType::Exponential, f64::NAN)
                .unwrap();
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert!(json["qf"].is_null());
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "Np_observed": 1.25,
            "Np_extrapolated": 3.5,
            "Np_total": 4.75,
            "curve": [
                {"Date": "2023-01-01", "q": 100.0},
                {"Date": "2023-02-01", "q": 92.1}
            ]
        }"#;
        let result: ForecastResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.total_volume, 4.75);
        assert_eq!(result.curve.len(), 2);
        assert_eq!(result.curve[1].date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(result.curve[1].rate, 92.1);
    }

    #[test]
    fn test_parse_response_schema_mismatch() {
        let missing_total = r#"{"Np_observed": 1, "Np_extrapolated": 2, "curve": []}"#;
        assert!(serde_json::from_str::<ForecastResult>(missing_total).is_err());
        let bad_date = r#"{"Np_observed": 1, "Np_extrapolated": 2, "Np_total": 3,
            "curve": [{"Date": "01/02/2023", "q": 1}]}"#;
        assert!(serde_json::from_str::<ForecastResult>(bad_date).is_err());
    }
}
