//! Top-level dashboard controller: owns session state and orchestrates
//! weather fetches and city selection.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::display;
use crate::forecast;
use crate::model::{Coordinate, SessionState, Unit};
use crate::provider::WeatherProvider;
use crate::provider::openweather::OpenWeatherProvider;
use crate::search::SearchBox;

/// The one user-visible failure message. Failure-cause detail goes to the
/// log only.
pub const FETCH_ERROR: &str = "Failed to fetch weather data. Please try again later.";

/// Session controller. All state mutations funnel through its methods; the
/// display layer reads snapshots via [`Dashboard::state`].
///
/// There is no request cancellation: if a second fetch starts before the
/// first settles, both complete and whichever settles last overwrites
/// session state (completion order, not call order).
#[derive(Debug)]
pub struct Dashboard {
    provider: Arc<dyn WeatherProvider>,
    // Synchronous lock: guards are never held across an await, and state
    // mutations must not introduce suspension points of their own.
    state: Mutex<SessionState>,
    search: SearchBox,
    default_coordinate: Coordinate,
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        Self::with_provider(
            Arc::new(OpenWeatherProvider::from_config(config)),
            config.default_coordinate(),
        )
    }

    /// Build against an arbitrary provider implementation. This is the seam
    /// the tests script against.
    pub fn with_provider(
        provider: Arc<dyn WeatherProvider>,
        default_coordinate: Coordinate,
    ) -> Self {
        Self {
            search: SearchBox::new(Arc::clone(&provider)),
            state: Mutex::new(SessionState::default()),
            provider,
            default_coordinate,
        }
    }

    /// Startup fetch for the configured default location.
    pub async fn refresh(&self) {
        self.fetch_weather(self.default_coordinate).await;
    }

    /// Fetch current conditions and the forecast concurrently and fold the
    /// outcome into session state.
    ///
    /// The join is all-or-nothing: if either request fails, the other's
    /// result is discarded, the fixed error message is set, and previously
    /// displayed data stays untouched. The loading flag is set before any
    /// suspension point and cleared on every exit path.
    pub async fn fetch_weather(&self, coordinate: Coordinate) {
        {
            let mut state = self.state.lock();
            state.loading = true;
            state.error = None;
        }

        let outcome = tokio::join!(
            self.provider.current_weather(coordinate),
            self.provider.forecast(coordinate),
        );

        let mut state = self.state.lock();
        match outcome {
            (Ok(current), Ok(raw_forecast)) => {
                state.forecast = forecast::summarize(&raw_forecast);
                state.current = Some(current);
                state.error = None;
            }
            (current, raw_forecast) => {
                for err in [current.err(), raw_forecast.err()].into_iter().flatten() {
                    tracing::error!(
                        latitude = coordinate.latitude,
                        longitude = coordinate.longitude,
                        error = %err,
                        "weather fetch failed"
                    );
                }
                state.error = Some(FETCH_ERROR.to_string());
            }
        }
        state.loading = false;
    }

    /// Pick a search candidate and fetch weather for it.
    pub async fn select_city(&mut self, index: usize) {
        if let Some(coordinate) = self.search.select(index) {
            self.fetch_weather(coordinate).await;
        }
    }

    pub fn search(&mut self) -> &mut SearchBox {
        &mut self.search
    }

    pub fn toggle_unit(&self) {
        let mut state = self.state.lock();
        state.unit = state.unit.toggled();
    }

    pub fn unit(&self) -> Unit {
        self.state.lock().unit
    }

    /// Snapshot of the session state for the display layer.
    pub fn state(&self) -> SessionState {
        self.state.lock().clone()
    }

    /// Temperature formatted for the session's current unit.
    pub fn temperature(&self, celsius: Option<f64>) -> String {
        display::convert_temp(celsius, self.unit())
    }

    /// Wind speed formatted for the session's current unit.
    pub fn wind_speed(&self, mps: Option<f64>) -> String {
        display::convert_speed(mps, self.unit())
    }

    /// Background gradient for the current condition; a dark fallback while
    /// no weather (or no condition label) is loaded.
    pub fn background(&self) -> &'static str {
        let state = self.state.lock();
        match state
            .current
            .as_ref()
            .and_then(|current| current.condition_main.as_deref())
        {
            Some(label) => display::condition_background(Some(label)),
            None => display::NO_DATA_BACKGROUND,
        }
    }
}
