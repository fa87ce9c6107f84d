//! One-at-a-time forecast requests.
//!
//! A forecast is split into two reactions so the session is never borrowed
//! across the network call: [`WorkflowSession::begin_forecast`] builds and
//! tags the request, and [`WorkflowSession::complete_forecast`] applies the
//! response if the session still has the identity the request was built
//! from. The in-flight marker belongs to the ticket that set it and is only
//! released when that ticket completes, stale or not.

use dca_core::{
    error::{ForecastError, RequestError},
    forecast::{ForecastRequest, ForecastResult},
    service::ForecastService,
};

use crate::session::{Forecast, ForecastSettings, RequestIdentity, WorkflowSession};

/// Message shown for any failed calculation.
pub const CALCULATION_FAILED: &str =
    "Calculation failed. Please check your parameters or server status.";

/// A request that has been dispatched and awaits its response.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingForecast {
    ticket: u64,
    identity: RequestIdentity,
    settings: ForecastSettings,
    request: ForecastRequest,
}

impl PendingForecast {
    pub fn request(&self) -> &ForecastRequest {
        &self.request
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn identity(&self) -> RequestIdentity {
        self.identity
    }
}

/// How a response was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The result is now the session's forecast.
    Applied,
    /// The request failed; the previous forecast is untouched.
    Failed(RequestError),
    /// The series or anchors changed meanwhile; the response was dropped.
    Stale,
}

impl WorkflowSession {
    /// Build and tag a request from the current series, anchors and settings.
    pub fn begin_forecast(&mut self) -> Result<PendingForecast, ForecastError> {
        if self.in_flight.is_some() {
            log::debug!("forecast already in flight, ignoring request");
            return Err(ForecastError::InFlight);
        }
        let series = self.series.as_ref().ok_or(ForecastError::NoSeries)?;
        let (first, second) = self
            .selection
            .pair()
            .ok_or(ForecastError::NotEnoughAnchors {
                selected: self.selection.len(),
            })?;
        let request = ForecastRequest::build(
            series,
            first,
            second,
            self.settings.decline_type,
            self.settings.cutoff,
        )?;

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some(ticket);
        self.error_msg = None;
        log::info!(
            "forecast #{} dispatched: {} model, anchors t1={} t2={}, qf={}",
            ticket,
            request.decline_type,
            request.t1,
            request.t2,
            request.qf
        );
        Ok(PendingForecast {
            ticket,
            identity: self.identity(),
            settings: self.settings,
            request,
        })
    }

    /// Apply the outcome of a dispatched request.
    pub fn complete_forecast(
        &mut self,
        pending: PendingForecast,
        outcome: Result<ForecastResult, RequestError>,
    ) -> Completion {
        if self.in_flight == Some(pending.ticket) {
            self.in_flight = None;
        }
        if pending.identity != self.identity() {
            log::debug!(
                "discarding stale response for forecast #{} ({:?} != {:?})",
                pending.ticket,
                pending.identity,
                self.identity()
            );
            return Completion::Stale;
        }
        match outcome {
            Ok(result) => {
                log::info!(
                    "forecast #{} applied: EUR {:.2}, {} curve points",
                    pending.ticket,
                    result.total_volume,
                    result.curve.len()
                );
                self.forecast = Some(Forecast {
                    result,
                    settings: pending.settings,
                });
                self.error_msg = None;
                Completion::Applied
            }
            Err(e) => {
                log::warn!("forecast #{} failed: {}", pending.ticket, e);
                self.error_msg = Some(CALCULATION_FAILED.to_string());
                Completion::Failed(e)
            }
        }
    }

    /// Release the in-flight marker without applying anything, for callers
    /// that gave up waiting on a response.
    pub fn abandon_forecast(&mut self, pending: PendingForecast) {
        if self.in_flight == Some(pending.ticket) {
            log::debug!("forecast #{} abandoned", pending.ticket);
            self.in_flight = None;
        }
    }

    /// Begin, call the service and complete in one go.
    pub async fn run_forecast<S: ForecastService>(
        &mut self,
        service: &S,
    ) -> Result<Completion, ForecastError> {
        let pending = self.begin_forecast()?;
        let outcome = service.calculate(pending.request()).await;
        Ok(self.complete_forecast(pending, outcome))
    }
}
