//! Error types for the dashboard binary.
//!
//! [`DashboardError`] wraps every startup and serving failure so `main`
//! can propagate with `?`.

/// Top-level error for the dashboard binary.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: emissions_core::ConfigError,
    },

    /// The emissions tables could not be loaded or validated.
    #[error("data load error: {source}")]
    DataLoad {
        /// The underlying load error.
        #[from]
        source: emissions_core::DataLoadError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: emissions_observer::ServerError,
    },
}
