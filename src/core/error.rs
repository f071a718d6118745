use std::fmt;
use std::io;
use thiserror::Error;

/// External service a responder talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Weather,
    OpenAI,
}

impl Service {
    /// Vendor name shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            Service::Weather => "OpenWeather",
            Service::OpenAI => "OpenAI",
        }
    }

    fn upstream_prefix(self) -> &'static str {
        match self {
            Service::Weather => "Error al obtener el clima",
            Service::OpenAI => "Error al consultar OpenAI",
        }
    }

    fn transport_prefix(self) -> &'static str {
        match self {
            Service::Weather => "Error al consultar el clima",
            Service::OpenAI => "Error al consultar OpenAI",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Coarse classification of a [`ClimaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    UpstreamClientError,
    TransportOrParseFailure,
    /// Raised by the interface layer, never by a responder.
    Local,
}

/// Unified error type for climachat.
///
/// The `Display` output of the responder variants is the exact text shown in
/// the transcript, so the interface never formats these itself.
#[derive(Error, Debug)]
pub enum ClimaError {
    /// The API key for a service is absent or blank
    #[error("Error: La API Key de {} no está configurada.", .0.display_name())]
    MissingCredential(Service),

    /// The service answered with a non-success status
    #[error("{}: {message}", .service.upstream_prefix())]
    Upstream {
        service: Service,
        status: u16,
        message: String,
    },

    /// Network, timeout or decoding failure
    #[error("{}: {detail}", .service.transport_prefix())]
    Transport { service: Service, detail: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ClimaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClimaError::MissingCredential(_) => ErrorKind::MissingCredential,
            ClimaError::Upstream { .. } => ErrorKind::UpstreamClientError,
            ClimaError::Transport { .. } => ErrorKind::TransportOrParseFailure,
            ClimaError::Config(_) | ClimaError::Input(_) | ClimaError::Io { .. } => {
                ErrorKind::Local
            }
        }
    }

    /// Classifies a reqwest failure the same way for both services.
    ///
    /// The request URL is dropped from the message since the weather key
    /// travels in the query string.
    pub fn request(service: Service, err: reqwest::Error) -> Self {
        let err = err.without_url();
        let detail = if err.is_timeout() {
            format!("Request timed out: {}", err)
        } else if err.is_connect() {
            format!("Connection failed: {}", err)
        } else if err.is_decode() {
            format!("Invalid response body: {}", err)
        } else {
            format!("Request failed: {}", err)
        };
        ClimaError::Transport { service, detail }
    }

    pub fn json(service: Service, err: &serde_json::Error) -> Self {
        ClimaError::Transport {
            service,
            detail: format!("JSON error: {}", err),
        }
    }
}

impl From<serde_yml::Error> for ClimaError {
    fn from(err: serde_yml::Error) -> Self {
        ClimaError::Config(format!("YAML error: {}", err))
    }
}
