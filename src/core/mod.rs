pub mod error;

pub use error::{ClimaError, ErrorKind, Service};
