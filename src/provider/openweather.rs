use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::model::{Coordinate, CurrentWeather, Forecast, ForecastSample, PlaceCandidate};

use super::{ProviderError, WeatherProvider};

/// Number of geocoding candidates requested per search.
const GEOCODING_LIMIT: &str = "5";

/// OpenWeatherMap client. All weather requests ask for `units=metric`, so
/// parsed values are always Celsius and m/s; display conversion happens
/// elsewhere. No timeout is configured beyond the transport default.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    current_url: String,
    forecast_url: String,
    geocoding_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            current_url: config.current_url.clone(),
            forecast_url: config.forecast_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize, Default)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    timezone: Option<i32>,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition_main, condition_description) = match parsed.weather.into_iter().next() {
            Some(w) => (w.main, w.description),
            None => (None, None),
        };

        CurrentWeather {
            place_name: parsed.name.unwrap_or_default(),
            country_code: parsed.sys.country.unwrap_or_default(),
            condition_main,
            condition_description,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            sunrise_epoch: parsed.sys.sunrise,
            sunset_epoch: parsed.sys.sunset,
            timezone_offset_secs: parsed.timezone,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: Option<i64>,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize, Default)]
struct OwCity {
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
    #[serde(default)]
    city: OwCity,
}

impl From<OwForecastResponse> for Forecast {
    fn from(parsed: OwForecastResponse) -> Self {
        let samples = parsed
            .list
            .into_iter()
            // An entry without a timestamp cannot be assigned to a day.
            .filter_map(|entry| {
                let epoch_time = entry.dt?;
                Some(ForecastSample {
                    epoch_time,
                    temperature_c: entry.main.temp,
                    condition: entry.weather.into_iter().next().and_then(|w| w.main),
                })
            })
            .collect();

        Forecast {
            timezone_offset_secs: parsed.city.timezone.unwrap_or(0),
            samples,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwPlace {
    name: String,
    state: Option<String>,
    #[serde(default)]
    country: String,
    lat: f64,
    lon: f64,
}

impl From<OwPlace> for PlaceCandidate {
    fn from(place: OwPlace) -> Self {
        PlaceCandidate {
            name: place.name,
            state: place.state,
            country: place.country,
            coordinate: Coordinate {
                latitude: place.lat,
                longitude: place.lon,
            },
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        coordinate: Coordinate,
    ) -> Result<CurrentWeather, ProviderError> {
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();

        let parsed: OwCurrentResponse = self
            .get_json(
                &self.current_url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        Ok(parsed.into())
    }

    async fn forecast(&self, coordinate: Coordinate) -> Result<Forecast, ProviderError> {
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();

        let parsed: OwForecastResponse = self
            .get_json(
                &self.forecast_url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        Ok(parsed.into())
    }

    async fn search_city(&self, query: &str) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let parsed: Vec<OwPlace> = self
            .get_json(
                &self.geocoding_url,
                &[
                    ("q", query),
                    ("limit", GEOCODING_LIMIT),
                    ("appid", self.api_key.as_str()),
                ],
            )
            .await?;

        Ok(parsed.into_iter().map(Into::into).collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary so multibyte bodies cannot panic.
        let cut = (0..=MAX)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_payload_maps_all_fields() {
        let parsed: OwCurrentResponse = serde_json::from_str(
            r#"{
                "name": "New Delhi",
                "timezone": 19800,
                "weather": [{"main": "Haze", "description": "haze"}],
                "main": {"temp": 31.2, "feels_like": 35.0, "humidity": 62},
                "wind": {"speed": 3.6},
                "sys": {"country": "IN", "sunrise": 1700000000, "sunset": 1700040000}
            }"#,
        )
        .expect("payload must parse");

        let current: CurrentWeather = parsed.into();
        assert_eq!(current.place_name, "New Delhi");
        assert_eq!(current.country_code, "IN");
        assert_eq!(current.condition_main.as_deref(), Some("Haze"));
        assert_eq!(current.condition_description.as_deref(), Some("haze"));
        assert_eq!(current.temperature_c, Some(31.2));
        assert_eq!(current.humidity_pct, Some(62));
        assert_eq!(current.timezone_offset_secs, Some(19800));
    }

    #[test]
    fn sparse_current_payload_yields_absent_fields() {
        let parsed: OwCurrentResponse =
            serde_json::from_str(r#"{"name": "Nowhere"}"#).expect("payload must parse");

        let current: CurrentWeather = parsed.into();
        assert_eq!(current.place_name, "Nowhere");
        assert!(current.country_code.is_empty());
        assert!(current.condition_main.is_none());
        assert!(current.temperature_c.is_none());
        assert!(current.sunrise_epoch.is_none());
    }

    #[test]
    fn forecast_entries_without_timestamp_are_dropped() {
        let parsed: OwForecastResponse = serde_json::from_str(
            r#"{
                "city": {"timezone": 3600},
                "list": [
                    {"dt": 1700000000, "main": {"temp": 10.0}, "weather": [{"main": "Rain"}]},
                    {"main": {"temp": 11.0}, "weather": [{"main": "Rain"}]},
                    {"dt": 1700010800, "weather": []}
                ]
            }"#,
        )
        .expect("payload must parse");

        let forecast: Forecast = parsed.into();
        assert_eq!(forecast.timezone_offset_secs, 3600);
        assert_eq!(forecast.samples.len(), 2);
        assert_eq!(forecast.samples[0].condition.as_deref(), Some("Rain"));
        assert!(forecast.samples[1].temperature_c.is_none());
        assert!(forecast.samples[1].condition.is_none());
    }

    #[test]
    fn geocoding_payload_maps_optional_state() {
        let parsed: Vec<OwPlace> = serde_json::from_str(
            r#"[
                {"name": "Delhi", "state": "Delhi", "country": "IN", "lat": 28.65, "lon": 77.22},
                {"name": "Delhi", "country": "CA", "lat": 42.85, "lon": -80.5}
            ]"#,
        )
        .expect("payload must parse");

        let candidates: Vec<PlaceCandidate> = parsed.into_iter().map(Into::into).collect();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].label(), "Delhi, Delhi, IN");
        assert_eq!(candidates[1].label(), "Delhi, CA");
        assert!((candidates[1].coordinate.longitude + 80.5).abs() < 1e-9);
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // 1 + 150*2 bytes puts the 200-byte mark inside a 2-byte char.
        let body = format!("a{}", "é".repeat(150));
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), 199 + 3);

        // 4-byte chars: the cut must land between them, not inside.
        let emoji = "🌧".repeat(60);
        assert!(truncate_body(&emoji).ends_with("..."));
    }
}
