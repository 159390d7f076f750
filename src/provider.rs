use crate::model::{Coordinate, CurrentWeather, Forecast, PlaceCandidate};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Everything that can go wrong talking to the upstream API. The controller
/// collapses all three into one generic displayed message; the variants
/// exist for logging and for tests.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse upstream payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Seam between the dashboard and the upstream weather API. The production
/// implementation is [`openweather::OpenWeatherProvider`]; tests substitute
/// scripted implementations.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions at a coordinate, in metric units.
    async fn current_weather(
        &self,
        coordinate: Coordinate,
    ) -> Result<CurrentWeather, ProviderError>;

    /// 5-day/3-hour forecast samples for a coordinate, in metric units.
    async fn forecast(&self, coordinate: Coordinate) -> Result<Forecast, ProviderError>;

    /// Up to 5 place candidates matching a free-text city query.
    async fn search_city(&self, query: &str) -> Result<Vec<PlaceCandidate>, ProviderError>;
}
