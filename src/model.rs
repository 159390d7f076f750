use serde::{Deserialize, Serialize};

/// Latitude/longitude pair identifying a query location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions for a location, replaced wholesale on each successful
/// fetch. Temperatures are Celsius and wind speed is m/s regardless of the
/// display unit; fields the display layer guards against absence are `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub place_name: String,
    pub country_code: String,
    pub condition_main: Option<String>,
    pub condition_description: Option<String>,
    pub temperature_c: Option<f64>,
    pub feels_like_c: Option<f64>,
    pub humidity_pct: Option<u8>,
    pub wind_speed_mps: Option<f64>,
    pub sunrise_epoch: Option<i64>,
    pub sunset_epoch: Option<i64>,
    pub timezone_offset_secs: Option<i32>,
}

/// One 3-hourly forecast entry. Entries with a missing field still carry
/// their remaining fields; the aggregator excludes absent values per field
/// instead of dropping the whole sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub epoch_time: i64,
    pub temperature_c: Option<f64>,
    pub condition: Option<String>,
}

/// Raw forecast payload: the sample stream plus the city's UTC offset, which
/// the aggregator uses to resolve each sample's local calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub timezone_offset_secs: i32,
    pub samples: Vec<ForecastSample>,
}

/// Per-day forecast summary shown in the 5-day strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    /// Short weekday name, e.g. "Mon".
    pub day_label: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub dominant_condition: String,
}

/// A geocoding search hit the user can pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub coordinate: Coordinate,
}

impl PlaceCandidate {
    /// Display form: "Name, State, CC" when a state is present, "Name, CC"
    /// otherwise.
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Display unit preference. Toggling never refetches and never mutates the
/// stored metric values; conversion happens at presentation time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    pub fn toggled(self) -> Self {
        match self {
            Unit::Metric => Unit::Imperial,
            Unit::Imperial => Unit::Metric,
        }
    }
}

/// Top-level session state read by the display layer. A fetch failure sets
/// `error` but leaves any previously fetched data in place; `loading` only
/// governs spinner display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub current: Option<CurrentWeather>,
    pub forecast: Vec<DaySummary>,
    pub unit: Unit,
    pub error: Option<String>,
    pub loading: bool,
}
