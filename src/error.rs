use std::io;
use thiserror::Error;

/// Custom error type for the dashboard
#[derive(Error, Debug)]
pub enum DashError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("Interface lookup failed: {0}")]
    InterfaceLookup(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Display error: {0}")]
    Display(String),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the dashboard
pub type Result<T> = std::result::Result<T, DashError>;

impl DashError {
    pub fn sensor_unavailable<S: Into<String>>(msg: S) -> Self {
        DashError::SensorUnavailable(msg.into())
    }

    pub fn interface_lookup<S: Into<String>>(msg: S) -> Self {
        DashError::InterfaceLookup(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        DashError::MetricCollection(msg.into())
    }

    pub fn display<S: Into<String>>(msg: S) -> Self {
        DashError::Display(msg.into())
    }

    pub fn asset<S: Into<String>>(msg: S) -> Self {
        DashError::Asset(msg.into())
    }

    pub fn precondition<S: Into<String>>(msg: S) -> Self {
        DashError::Precondition(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DashError::Other(msg.into())
    }

    /// Failure class carried in log lines.
    ///
    /// Everything that is not a sensor, interface or precondition problem is
    /// contained at the tick boundary and therefore reported as transient.
    pub fn classification(&self) -> &'static str {
        match self {
            DashError::SensorUnavailable(_) => "SensorUnavailable",
            DashError::InterfaceLookup(_) => "InterfaceLookupFailure",
            DashError::Precondition(_) => "FatalPreconditionFailure",
            DashError::Io(_)
            | DashError::Image(_)
            | DashError::MetricCollection(_)
            | DashError::Display(_)
            | DashError::Asset(_)
            | DashError::Other(_) => "TransientTickFailure",
        }
    }
}
