use crate::chat::Mode;
use crate::core::error::{ClimaError, Service};
use async_trait::async_trait;

pub mod base_client;
pub mod factory;
pub mod openai;
pub mod weather;

pub use factory::build_responders;

/// Turns one user string into a reply through an external API call.
#[async_trait]
pub trait Responder: Send + Sync {
    fn service(&self) -> Service;

    async fn respond(&self, input: &str) -> Result<String, ClimaError>;
}

/// The two responders, indexed by mode.
pub struct ResponderSet {
    weather: Box<dyn Responder>,
    chat: Box<dyn Responder>,
}

impl ResponderSet {
    pub fn new(weather: Box<dyn Responder>, chat: Box<dyn Responder>) -> Self {
        Self { weather, chat }
    }

    pub fn for_mode(&self, mode: Mode) -> &dyn Responder {
        match mode {
            Mode::Weather => self.weather.as_ref(),
            Mode::Chat => self.chat.as_ref(),
        }
    }
}
