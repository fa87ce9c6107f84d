use serde::{Deserialize, Serialize};

use crate::series::ProductionSeries;

/// A user-picked sample on the historical series.
///
/// `index` is a weak reference into the series it was picked from and must
/// be re-validated before use. `value` is the flow rate captured at pick
/// time and is forwarded verbatim, never re-read from the series.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub index: usize,
    pub value: f64,
}

impl AnchorPoint {
    /// Capture the sample at `index`, or `None` if it is out of bounds.
    pub fn capture(series: &ProductionSeries, index: usize) -> Option<Self> {
        series
            .flow_rate(index)
            .map(|value| AnchorPoint { index, value })
    }

    pub fn is_valid_for(&self, series: &ProductionSeries) -> bool {
        self.index < series.len()
    }
}
