use std::future::Future;

use crate::{
    error::RequestError,
    forecast::{ForecastRequest, ForecastResult},
};

/// Anything able to answer a forecast request: the HTTP client in
/// production, a scripted stand-in under test.
pub trait ForecastService {
    fn calculate(
        &self,
        request: &ForecastRequest,
    ) -> impl Future<Output = Result<ForecastResult, RequestError>>;
}
