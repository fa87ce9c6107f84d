use chrono::NaiveDate;
use dca_utils::{dates, numbers};
use serde::Serialize;

use crate::{
    cell::{read_csv_rows, CellValue, RawRow, DATE_FIELD, FLOW_RATE_FIELD},
    error::IngestError,
};

/// Why a single row was left out of the series.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RowRejection {
    MissingDate,
    UnparseableDate,
    MissingFlowRate,
    NonNumericFlowRate,
    NonFiniteFlowRate,
}

/// Index-aligned production history: `dates[i]` was measured at `flow_rates[i]`.
///
/// Never empty. Row order from the source is kept as-is; callers that need a
/// chronological series must supply sorted rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionSeries {
    dates: Vec<NaiveDate>,
    flow_rates: Vec<f64>,
}

/// A freshly ingested series plus how many rows were thrown away.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingestion {
    pub series: ProductionSeries,
    pub dropped: usize,
}

impl ProductionSeries {
    /// Build a series from `(date, flow rate)` pairs.
    pub fn from_points(points: Vec<(NaiveDate, f64)>) -> Result<Self, IngestError> {
        if points.is_empty() {
            return Err(IngestError::EmptyDataset);
        }
        let (dates, flow_rates) = points.into_iter().unzip();
        Ok(Self { dates, flow_rates })
    }

    /// Convert raw sheet rows into a series, dropping unusable rows.
    ///
    /// Fails with [`IngestError::EmptyDataset`] when no row survives.
    pub fn ingest(rows: &[RawRow]) -> Result<Ingestion, IngestError> {
        let mut points = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;
        for (row_number, row) in rows.iter().enumerate() {
            match Self::resolve_row(row) {
                Ok(point) => points.push(point),
                Err(reason) => {
                    log::debug!("dropping row {}: {:?}", row_number + 1, reason);
                    dropped += 1;
                }
            }
        }
        log::info!(
            "ingested {} samples, dropped {} of {} rows",
            points.len(),
            dropped,
            rows.len()
        );
        let series = Self::from_points(points)?;
        Ok(Ingestion { series, dropped })
    }

    /// Parse CSV text and ingest it in one go.
    pub fn from_csv(csv_data: &str) -> Result<Ingestion, IngestError> {
        let rows = read_csv_rows(csv_data)?;
        Self::ingest(&rows)
    }

    fn resolve_row(row: &RawRow) -> Result<(NaiveDate, f64), RowRejection> {
        let date = match row.get(DATE_FIELD) {
            None | Some(CellValue::Empty) => return Err(RowRejection::MissingDate),
            Some(CellValue::Number(serial)) => dates::from_serial(*serial),
            Some(CellValue::Text(text)) => dates::parse_free_text(text),
        }
        .ok_or(RowRejection::UnparseableDate)?;

        let flow_rate = match row.get(FLOW_RATE_FIELD) {
            None | Some(CellValue::Empty) => return Err(RowRejection::MissingFlowRate),
            Some(CellValue::Number(n)) => *n,
            Some(CellValue::Text(text)) => numbers::coerce(text),
        };
        if flow_rate.is_nan() {
            return Err(RowRejection::NonNumericFlowRate);
        }
        if flow_rate.is_infinite() {
            return Err(RowRejection::NonFiniteFlowRate);
        }
        Ok((date, flow_rate))
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false for a constructed series; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn flow_rates(&self) -> &[f64] {
        &self.flow_rates
    }

    pub fn date(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    pub fn flow_rate(&self, index: usize) -> Option<f64> {
        self.flow_rates.get(index).copied()
    }

    pub fn point(&self, index: usize) -> Option<(NaiveDate, f64)> {
        Some((self.date(index)?, self.flow_rate(index)?))
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// First index whose date equals `date`.
    pub fn index_of_date(&self, date: NaiveDate) -> Option<usize> {
        self.dates.iter().position(|d| *d == date)
    }

    /// Dates rendered in canonical `YYYY-MM-DD` form.
    pub fn date_labels(&self) -> Vec<String> {
        self.dates.iter().map(dates::format_date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(date: impl Into<CellValue>, flow: impl Into<CellValue>) -> RawRow {
        RawRow::new().with(DATE_FIELD, date).with(FLOW_RATE_FIELD, flow)
    }

    #[test]
    fn test_ingest_well_formed_rows() {
        let rows = vec![
            row("2023-01-01", 100.0),
            row("2023-02-01", 90.0),
            row("2023-03-01", 81.0),
        ];
        let ingestion = ProductionSeries::ingest(&rows).unwrap();
        let series = ingestion.series;
        assert_eq!(ingestion.dropped, 0);
        assert_eq!(series.len(), 3);
        assert_eq!(series.dates().len(), series.flow_rates().len());
        assert_eq!(series.flow_rates(), &[100.0, 90.0, 81.0]);
        assert_eq!(series.first_date(), ymd(2023, 1, 1));
        assert_eq!(series.date_labels()[2], "2023-03-01");
    }

    #[test]
    fn test_ingest_serial_and_text_dates() {
        let rows = vec![
            row(44927.0, 10.0),
            row("Feb 1, 2023", "9.5"),
            row("2023-03-01T06:30:00", 9.0),
        ];
        let series = ProductionSeries::ingest(&rows).unwrap().series;
        assert_eq!(
            series.dates(),
            &[ymd(2023, 1, 1), ymd(2023, 2, 1), ymd(2023, 3, 1)]
        );
        assert_eq!(series.flow_rates(), &[10.0, 9.5, 9.0]);
    }

    #[test]
    fn test_ingest_drops_unusable_rows() {
        let rows = vec![
            row("2023-01-01", 100.0),
            RawRow::new().with(FLOW_RATE_FIELD, 95.0),
            row("not a date", 94.0),
            RawRow::new().with(DATE_FIELD, "2023-01-04"),
            row("2023-01-05", CellValue::Empty),
            row("2023-01-06", "abc"),
            row("2023-01-07", 80.0),
        ];
        let ingestion = ProductionSeries::ingest(&rows).unwrap();
        assert_eq!(ingestion.dropped, 5);
        assert_eq!(ingestion.series.len(), 2);
        assert_eq!(ingestion.series.flow_rates(), &[100.0, 80.0]);
    }

    #[test]
    fn test_ingest_keeps_zero_and_negative_rates() {
        let rows = vec![row("2023-01-01", 0.0), row("2023-01-02", -4.0)];
        let series = ProductionSeries::ingest(&rows).unwrap().series;
        assert_eq!(series.flow_rates(), &[0.0, -4.0]);
    }

    #[test]
    fn test_ingest_preserves_source_order() {
        let rows = vec![row("2023-03-01", 81.0), row("2023-01-01", 100.0)];
        let series = ProductionSeries::ingest(&rows).unwrap().series;
        assert_eq!(series.first_date(), ymd(2023, 3, 1));
        assert_eq!(series.index_of_date(ymd(2023, 1, 1)), Some(1));
    }

    #[test]
    fn test_ingest_empty_dataset() {
        let rows = vec![
            RawRow::new().with("Day", "2023-01-01").with("Rate", 5.0),
            row("garbage", 1.0),
        ];
        let err = ProductionSeries::ingest(&rows).unwrap_err();
        assert!(matches!(err, IngestError::EmptyDataset));
        let message = err.to_string();
        assert!(message.contains("Date"));
        assert!(message.contains("FlowRate"));

        assert!(matches!(
            ProductionSeries::ingest(&[]),
            Err(IngestError::EmptyDataset)
        ));
    }

    #[test]
    fn test_from_csv() {
        let csv_data = "\
Date,FlowRate,Comment
2023-01-01,100,start
2023-02-01,90,
,85,no date
2023-03-01,81,
";
        let ingestion = ProductionSeries::from_csv(csv_data).unwrap();
        assert_eq!(ingestion.series.len(), 3);
        assert_eq!(ingestion.dropped, 1);
    }

    #[test]
    fn test_ingest_drops_non_finite_rates() {
        let csv_data = "Date,FlowRate\n2023-01-01,100\n2023-02-01,Infinity\n2023-03-01,1e400\n2023-04-01,-Infinity\n";
        let ingestion = ProductionSeries::from_csv(csv_data).unwrap();
        assert_eq!(ingestion.dropped, 3);
        assert_eq!(ingestion.series.flow_rates(), &[100.0]);

        assert_eq!(
            ProductionSeries::resolve_row(&row("2023-02-01", f64::INFINITY)),
            Err(RowRejection::NonFiniteFlowRate)
        );
        assert_eq!(
            ProductionSeries::resolve_row(&row("2023-02-01", "abc")),
            Err(RowRejection::NonNumericFlowRate)
        );
    }

    #[test]
    fn test_ingest_full_month_names() {
        let rows = vec![row("January 5, 2023", 100.0), row("5 February 2023", 90.0)];
        let ingestion = ProductionSeries::ingest(&rows).unwrap();
        assert_eq!(ingestion.dropped, 0);
        assert_eq!(ingestion.series.dates(), &[ymd(2023, 1, 5), ymd(2023, 2, 5)]);
    }

    #[test]
    fn test_point_accessors() {
        let series =
            ProductionSeries::from_points(vec![(ymd(2023, 1, 1), 100.0), (ymd(2023, 2, 1), 90.0)])
                .unwrap();
        assert_eq!(series.point(1), Some((ymd(2023, 2, 1), 90.0)));
        assert_eq!(series.point(2), None);
        assert_eq!(series.flow_rate(5), None);
        assert!(!series.is_empty());
    }
}
