use crate::config::{Config, Credentials};
use crate::core::error::ClimaError;
use crate::responders::{
    Responder, ResponderSet, openai::OpenAIResponder, weather::WeatherClient,
};
use tracing::warn;

/// Builds the real HTTP responders. A missing key is not an error here; the
/// responder reports it when it is asked for a reply.
pub fn build_responders(
    config: &Config,
    credentials: &Credentials,
) -> Result<ResponderSet, ClimaError> {
    if credentials.weather_key.is_none() {
        warn!("OpenWeather API key is not configured");
    }
    if credentials.openai_key.is_none() {
        warn!("OpenAI API key is not configured");
    }

    let weather = WeatherClient::new(&config.weather, credentials.weather_key.clone())?;
    let chat = OpenAIResponder::new(&config.openai, credentials.openai_key.clone())?;

    Ok(ResponderSet::new(
        Box::new(weather) as Box<dyn Responder>,
        Box::new(chat) as Box<dyn Responder>,
    ))
}
