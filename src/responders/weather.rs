use super::Responder;
use crate::config::WeatherConfig;
use crate::core::error::{ClimaError, Service};
use crate::responders::base_client::BaseApiClient;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::fmt;
use tracing::debug;

const CITY_NOT_FOUND: &str = "Ciudad no encontrada";

#[derive(Deserialize)]
struct CurrentWeatherResponse {
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Deserialize)]
struct MainReadings {
    temp: Number,
}

#[derive(Deserialize)]
struct Condition {
    description: String,
}

/// Current conditions for the city the user asked about.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    /// Kept as the raw JSON number so it prints exactly as the API sent it.
    pub temperature: Number,
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "El clima en {}: {}, temperatura: {} ºC",
            self.city, self.description, self.temperature
        )
    }
}

pub struct WeatherClient {
    client: BaseApiClient,
    api_key: Option<String>,
    units: String,
    lang: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig, api_key: Option<String>) -> Result<Self, ClimaError> {
        Ok(Self {
            client: BaseApiClient::new(Service::Weather, config.base_url(), config.timeout())?,
            api_key,
            units: config.units().to_string(),
            lang: config.lang().to_string(),
        })
    }

    pub async fn current(&self, city: &str) -> Result<WeatherReport, ClimaError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ClimaError::MissingCredential(Service::Weather))?;

        debug!(city, units = %self.units, lang = %self.lang, "requesting current weather");
        let response = self
            .client
            .get(
                "weather",
                &[
                    ("q", city),
                    ("appid", api_key),
                    ("units", self.units.as_str()),
                    ("lang", self.lang.as_str()),
                ],
            )
            .await?;

        let status = response.status();
        let body = self.client.read_body(response).await?;

        if status != StatusCode::OK {
            let message = error_message(&body);
            debug!(city, status = status.as_u16(), %message, "weather lookup rejected");
            return Err(ClimaError::Upstream {
                service: Service::Weather,
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CurrentWeatherResponse =
            serde_json::from_str(&body).map_err(|e| ClimaError::json(Service::Weather, &e))?;
        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or_else(|| ClimaError::Transport {
                service: Service::Weather,
                detail: "respuesta sin descripción del clima".to_string(),
            })?;

        Ok(WeatherReport {
            city: city.to_string(),
            description,
            temperature: parsed.main.temp,
        })
    }
}

/// The service's `message` field, or a generic not-found text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| CITY_NOT_FOUND.to_string())
}

#[async_trait]
impl Responder for WeatherClient {
    fn service(&self) -> Service {
        Service::Weather
    }

    async fn respond(&self, input: &str) -> Result<String, ClimaError> {
        self.current(input).await.map(|report| report.to_string())
    }
}
