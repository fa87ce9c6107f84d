//! Workflow state owned by a single session.
//!
//! `WorkflowSession` bundles everything the four components share: the
//! imported series, the anchors, the latest forecast, the in-flight marker
//! and the user-visible error. Each component mutates only its own slice
//! through the methods here; the stage and the plot are derived on demand.

use chrono::NaiveDate;
use dca_core::{
    cell::RawRow,
    decline::DeclineType,
    error::IngestError,
    forecast::ForecastResult,
    series::{Ingestion, ProductionSeries},
};
use dca_utils::numbers;

use crate::{
    plot::{self, PlotClick, Trace},
    selection::{SelectionOutcome, SelectionSet},
    stage::WorkflowStage,
};

/// Economic limit used until the user types another one (STB/d).
pub const DEFAULT_CUTOFF: f64 = 5.0;

/// User inputs that feed the next forecast request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSettings {
    pub decline_type: DeclineType,
    /// Economic cutoff rate `qf`. May be NaN when the typed value was not a
    /// number; it is forwarded regardless.
    pub cutoff: f64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            decline_type: DeclineType::default(),
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

/// A result together with the settings it was computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub result: ForecastResult,
    pub settings: ForecastSettings,
}

/// Identity a request is built from. A response whose identity no longer
/// matches the session is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestIdentity {
    pub series_generation: u64,
    pub selection_revision: u64,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowSession {
    pub(crate) series: Option<ProductionSeries>,
    pub(crate) selection: SelectionSet,
    pub(crate) forecast: Option<Forecast>,
    pub(crate) settings: ForecastSettings,
    /// Ticket of the request currently awaiting its response.
    pub(crate) in_flight: Option<u64>,
    pub(crate) next_ticket: u64,
    pub(crate) error_msg: Option<String>,
    pub(crate) series_generation: u64,
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the series with the usable rows of an upload.
    ///
    /// On failure the message is kept for display and nothing else changes.
    /// On success the anchors and any forecast are discarded. Returns the
    /// number of dropped rows.
    pub fn import_rows(&mut self, rows: &[RawRow]) -> Result<usize, IngestError> {
        let ingestion = ProductionSeries::ingest(rows);
        self.install(ingestion)
    }

    /// Same as [`import_rows`](Self::import_rows) for CSV text.
    pub fn import_csv(&mut self, csv_data: &str) -> Result<usize, IngestError> {
        let ingestion = ProductionSeries::from_csv(csv_data);
        self.install(ingestion)
    }

    fn install(&mut self, ingestion: Result<Ingestion, IngestError>) -> Result<usize, IngestError> {
        match ingestion {
            Ok(Ingestion { series, dropped }) => {
                log::info!(
                    "installed series of {} samples starting {}",
                    series.len(),
                    series.first_date()
                );
                self.series = Some(series);
                self.selection.clear();
                self.forecast = None;
                self.error_msg = None;
                self.series_generation += 1;
                Ok(dropped)
            }
            Err(e) => {
                log::warn!("import failed: {}", e);
                self.error_msg = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn series(&self) -> Option<&ProductionSeries> {
        self.series.as_ref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn result(&self) -> Option<&ForecastResult> {
        self.forecast.as_ref().map(|f| &f.result)
    }

    pub fn settings(&self) -> ForecastSettings {
        self.settings
    }

    pub fn set_decline_type(&mut self, decline_type: DeclineType) {
        self.settings.decline_type = decline_type;
    }

    pub fn set_cutoff(&mut self, cutoff: f64) {
        self.settings.cutoff = cutoff;
    }

    /// Take the cutoff as typed; text that is not a number becomes NaN.
    pub fn set_cutoff_text(&mut self, text: &str) {
        self.settings.cutoff = numbers::coerce(text);
    }

    pub fn error(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error_msg = None;
    }

    /// True while a forecast request awaits its response.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn stage(&self) -> WorkflowStage {
        WorkflowStage::derive(
            self.series.as_ref(),
            &self.selection,
            self.forecast.is_some(),
        )
    }

    pub fn identity(&self) -> RequestIdentity {
        RequestIdentity {
            series_generation: self.series_generation,
            selection_revision: self.selection.revision(),
        }
    }

    /// Select the historical point at `index`.
    pub fn select_index(&mut self, index: usize) -> SelectionOutcome {
        let Some(series) = self.series.as_ref() else {
            return SelectionOutcome::Rejected;
        };
        let outcome = self.selection.click(series, index);
        if outcome.changed() {
            self.invalidate_forecast();
        }
        outcome
    }

    /// Select the first historical point recorded on `date`.
    pub fn select_date(&mut self, date: NaiveDate) -> SelectionOutcome {
        match self.series.as_ref().and_then(|s| s.index_of_date(date)) {
            Some(index) => self.select_index(index),
            None => SelectionOutcome::Rejected,
        }
    }

    /// Feed a renderer click through the trace router.
    pub fn handle_click(&mut self, click: PlotClick) -> SelectionOutcome {
        match plot::route_click(&self.traces(), click) {
            Some(index) => self.select_index(index),
            None => SelectionOutcome::Ignored,
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.invalidate_forecast();
        }
    }

    fn invalidate_forecast(&mut self) {
        if self.forecast.take().is_some() {
            log::debug!("anchors changed, forecast cleared");
        }
    }

    pub fn traces(&self) -> Vec<Trace> {
        plot::compose(self.series.as_ref(), &self.selection, self.result())
    }
}
