//! Trace composition for the production chart.
//!
//! The renderer receives an ordered list of named `{x, y}` traces as JSON,
//! the same way the chart scripts receive their data. Order is part of the
//! contract: historical first, then forecast, then selection markers, so the
//! later traces layer on top.

use dca_core::{forecast::ForecastResult, series::ProductionSeries};
use dca_utils::dates;
use serde::Serialize;

use crate::selection::SelectionSet;

pub const HISTORICAL_NAME: &str = "Historical Data";
pub const FORECAST_NAME: &str = "Forecast";
pub const SELECTION_NAME: &str = "Selected Points";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Historical,
    Forecast,
    Selection,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Markers,
    Lines,
}

/// One named series of points for the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub kind: TraceKind,
    pub name: &'static str,
    pub mode: TraceMode,
    pub dashed: bool,
    /// Only clickable traces feed the selection state machine.
    pub clickable: bool,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

/// A click reported by the renderer: which trace, which point in it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PlotClick {
    pub trace: usize,
    pub point: usize,
}

/// Build the traces for the current state.
pub fn compose(
    series: Option<&ProductionSeries>,
    selection: &SelectionSet,
    result: Option<&ForecastResult>,
) -> Vec<Trace> {
    let mut traces = Vec::with_capacity(3);

    if let Some(series) = series.filter(|s| !s.is_empty()) {
        traces.push(Trace {
            kind: TraceKind::Historical,
            name: HISTORICAL_NAME,
            mode: TraceMode::Markers,
            dashed: false,
            clickable: true,
            x: series.date_labels(),
            y: series.flow_rates().to_vec(),
        });
    }

    if let Some(result) = result.filter(|r| !r.curve.is_empty()) {
        traces.push(Trace {
            kind: TraceKind::Forecast,
            name: FORECAST_NAME,
            mode: TraceMode::Lines,
            dashed: true,
            clickable: false,
            x: result.curve.iter().map(|p| dates::format_date(&p.date)).collect(),
            y: result.curve.iter().map(|p| p.rate).collect(),
        });
    }

    if let Some(series) = series {
        // anchors are re-validated against the series they are drawn on
        let (x, y): (Vec<String>, Vec<f64>) = selection
            .anchors()
            .iter()
            .filter_map(|a| series.date(a.index).map(|d| (dates::format_date(&d), a.value)))
            .unzip();
        if !x.is_empty() {
            traces.push(Trace {
                kind: TraceKind::Selection,
                name: SELECTION_NAME,
                mode: TraceMode::Markers,
                dashed: false,
                clickable: false,
                x,
                y,
            });
        }
    }

    traces
}

/// Map a renderer click back to a series index. Clicks on anything but a
/// clickable historical trace resolve to `None`.
pub fn route_click(traces: &[Trace], click: PlotClick) -> Option<usize> {
    let trace = traces.get(click.trace)?;
    if trace.kind != TraceKind::Historical || !trace.clickable {
        return None;
    }
    (click.point < trace.x.len()).then_some(click.point)
}

/// Serialize traces for the chart renderer.
pub fn to_json(traces: &[Trace]) -> serde_json::Result<String> {
    serde_json::to_string(traces)
}
