//! CSV export of the forecast curve.

use dca_core::forecast::CurvePoint;
use dca_utils::dates;
use log::info;

/// Header row of the exported curve, matching the service's field names.
pub const CURVE_HEADER: [&str; 2] = ["Date", "q"];

/// Render the curve as CSV text.
pub fn curve_to_csv(curve: &[CurvePoint]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CURVE_HEADER)?;
    for point in curve {
        wtr.write_record([
            dates::format_date(&point.date),
            point.rate.to_string(),
        ])?;
    }
    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV export: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Write the curve to `path`.
pub fn write_curve_csv(path: &str, curve: &[CurvePoint]) -> anyhow::Result<()> {
    std::fs::write(path, curve_to_csv(curve)?)?;
    info!("Exported {} curve points to {}", curve.len(), path);
    Ok(())
}
