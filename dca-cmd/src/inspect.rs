//! Summarise an uploaded production series without calling the service.

use dca_core::series::ProductionSeries;
use dca_workflow::session::WorkflowSession;
use log::info;

/// Load `input` and print what the workflow would plot.
pub async fn run_inspect(input: &str) -> anyhow::Result<()> {
    let csv_data = tokio::fs::read_to_string(input).await?;
    let mut session = WorkflowSession::new();
    let dropped = session.import_csv(&csv_data)?;
    if let Some(series) = session.series() {
        print!("{}", summarize(series, dropped));
    }
    info!("Inspect complete for {}", input);
    Ok(())
}

/// Human readable summary of a series.
pub fn summarize(series: &ProductionSeries, dropped: usize) -> String {
    let rates = series.flow_rates();
    let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
    let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out = format!("{} Records Loaded ({} rows dropped)\n", series.len(), dropped);
    if let (Some(first), Some(last)) = (series.dates().first(), series.dates().last()) {
        out.push_str(&format!("Range: {} .. {}\n", first, last));
    }
    out.push_str(&format!("Flow rate: min {:.2}, max {:.2} STB/d\n", min, max));
    for (index, (date, rate)) in series.dates().iter().zip(rates).enumerate() {
        out.push_str(&format!("{:>5}  {}  {}\n", index, date, rate));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let ingestion =
            ProductionSeries::from_csv("Date,FlowRate\n2023-01-01,100\n2023-02-01,90\nx,1\n")
                .unwrap();
        let summary = summarize(&ingestion.series, ingestion.dropped);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "2 Records Loaded (1 rows dropped)");
        assert_eq!(lines[1], "Range: 2023-01-01 .. 2023-02-01");
        assert_eq!(lines[2], "Flow rate: min 90.00, max 100.00 STB/d");
        assert_eq!(lines[3], "    0  2023-01-01  100");
        assert_eq!(lines.len(), 5);
    }

    #[tokio::test]
    async fn test_run_inspect_missing_file() {
        assert!(run_inspect("/nonexistent/dca/production.csv").await.is_err());
    }
}
