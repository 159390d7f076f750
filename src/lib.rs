//! Logic layer for a single-page weather dashboard.
//!
//! This crate defines:
//! - Configuration (API key, endpoints, startup location)
//! - The upstream weather/geocoding provider abstraction
//! - Forecast aggregation into daily summaries
//! - Debounced city search
//! - Presentation helpers (unit conversion, icons, clock formatting)
//! - The [`Dashboard`] controller owning session state
//!
//! The display layer that renders session state is an external collaborator:
//! it reads [`SessionState`] snapshots and calls the `display` helpers.

pub mod app;
pub mod config;
pub mod display;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod search;

pub use app::{Dashboard, FETCH_ERROR};
pub use config::Config;
pub use model::{
    Coordinate, CurrentWeather, DaySummary, Forecast, ForecastSample, PlaceCandidate,
    SessionState, Unit,
};
pub use provider::{ProviderError, WeatherProvider, openweather::OpenWeatherProvider};
pub use search::SearchBox;
