//! Logging setup shared by the binaries.

mod logging;

pub use logging::{build_filter, setup_logging, LogFormat, LoggingError};
